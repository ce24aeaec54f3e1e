mod commands;
mod manifest;
mod query;
mod rules;
mod targets;
mod vars;

use super::Options;
use std::io::{Error, ErrorKind};

static SUBTOOLS: &'static [(&'static str, fn(&Options) -> Result<(), Error>)] = &[
	("commands", commands::main),
	("defaults", targets::defaults),
	("manifest", manifest::main),
	("query", query::main),
	("rules", rules::main),
	("targets", targets::main),
	("vars", vars::main),
	("list", list),
];

pub(super) fn run_subtool(tool: &str, options: &Options) -> Result<(), Error> {
	if let Some((_, main)) = SUBTOOLS.iter().find(|(name, _)| *name == tool) {
		main(options)
	} else {
		Err(Error::new(
			ErrorKind::Other,
			format!("Unknown subtool {:?}", tool),
		))
	}
}

fn list(_: &Options) -> Result<(), Error> {
	println!("Subtools:");
	for (name, _) in SUBTOOLS {
		println!("\t{}", name);
	}
	Ok(())
}
