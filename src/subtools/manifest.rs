use super::Options;
use ninj_manifest::manifest::read;
use std::io::Error;

/// Output the parsed manifest in debug form.
pub(super) fn main(opt: &Options) -> Result<(), Error> {
	let manifest = read(&opt.file)?;
	println!("{:#?}", manifest);
	Ok(())
}
