use super::Options;
use ninj_manifest::manifest::{read, resolve};
use std::io::{Error, ErrorKind};

/// Output the command of every non-phony build, in order.
pub(super) fn main(opt: &Options) -> Result<(), Error> {
	let manifest = read(&opt.file)?;
	let builds = resolve(&manifest).map_err(|e| Error::new(ErrorKind::Other, e))?;
	for command in builds.iter().filter_map(|build| build.command.as_ref()) {
		println!("{}", command.command);
	}
	Ok(())
}
