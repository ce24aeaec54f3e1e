use super::Options;
use ninj_manifest::manifest::read;
use std::io::Error;

/// Output every explicit output, with the name of the rule that builds it.
pub(super) fn main(opt: &Options) -> Result<(), Error> {
	let manifest = read(&opt.file)?;
	for build in &manifest.builds {
		for output in &build.explicit_outputs {
			println!("{}: {}", output, build.rule);
		}
	}
	Ok(())
}

/// Output the default targets.
pub(super) fn defaults(opt: &Options) -> Result<(), Error> {
	let manifest = read(&opt.file)?;
	for target in &manifest.defaults {
		println!("{}", target);
	}
	Ok(())
}
