use super::Options;
use ninj_manifest::manifest::read;
use std::io::Error;

/// Output the rules with their unevaluated variables.
pub(super) fn main(opt: &Options) -> Result<(), Error> {
	let manifest = read(&opt.file)?;
	for rule in &manifest.rules {
		println!("rule {}", rule.name);
		for binding in &rule.bindings {
			println!("  {} = {}", binding.name, binding.template.unparse());
		}
	}
	Ok(())
}
