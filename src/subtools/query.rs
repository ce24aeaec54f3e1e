use super::Options;
use ninj_manifest::manifest::{output_index, read, resolve};
use std::io::{Error, ErrorKind};

/// Show how the given targets are built.
pub(super) fn main(opt: &Options) -> Result<(), Error> {
	let manifest = read(&opt.file)?;
	let builds = resolve(&manifest).map_err(|e| Error::new(ErrorKind::Other, e))?;
	let index = output_index(&builds);
	for target in &opt.targets {
		let build = index
			.get(target)
			.map(|&i| &builds[i])
			.ok_or_else(|| Error::new(ErrorKind::Other, format!("Unknown target {}", target)))?;
		println!("{}:", target);
		println!("  rule: {}", build.rule_name);
		if let Some(command) = &build.command {
			println!("  command: {}", command.command);
			if !command.description.is_empty() {
				println!("  description: {}", command.description);
			}
		}
		for input in &build.explicit_inputs {
			println!("  input: {}", input);
		}
		for input in &build.implicit_inputs {
			println!("  implicit: {}", input);
		}
		for input in &build.order_only_inputs {
			println!("  order-only: {}", input);
		}
		for output in &build.outputs {
			println!("  output: {}", output);
		}
	}
	Ok(())
}
