use super::Options;
use ninj_manifest::manifest::read;
use std::io::Error;

/// Output the file-level variables, in order of definition.
///
/// Redefinitions are listed too, even though only the first definition of a
/// name is ever used.
pub(super) fn main(opt: &Options) -> Result<(), Error> {
	let manifest = read(&opt.file)?;
	for (name, value) in manifest.global_bindings.iter() {
		println!("{} = {}", name, value);
	}
	Ok(())
}
