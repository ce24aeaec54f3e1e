//! Turning `build` definitions into commands to run.
//!
//! This is the step after parsing: it looks up the rule of every `build`
//! definition, and expands the rule's `command` and `description` with the
//! inputs, outputs, and variables of that `build`.

use super::error::ResolveError;
use super::expand::{expand_template, expand_var};
use super::scope::{BuildScope, EdgeScope, Environment};
use super::{Build, Manifest};
use indexmap::IndexMap;
use log::debug;
use raw_string::RawString;

/// The command of a non-phony [`ResolvedBuild`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
	/// The (shell-escaped) command to be executed.
	pub command: RawString,
	/// The description to be shown to the user.
	pub description: RawString,
}

/// A `build` definition with its rule applied.
#[derive(Debug, Clone)]
pub struct ResolvedBuild {
	/// The name of the rule which was used.
	pub rule_name: String,
	/// The outputs. Never empty.
	pub outputs: Vec<RawString>,
	pub explicit_inputs: Vec<RawString>,
	pub implicit_inputs: Vec<RawString>,
	pub order_only_inputs: Vec<RawString>,
	/// The command to run, or `None` for phony rules.
	pub command: Option<ResolvedCommand>,
}

impl ResolvedBuild {
	/// Check if the build is just a phony rule.
	///
	/// Returns true iff `command` is `None`.
	pub fn is_phony(&self) -> bool {
		self.command.is_none()
	}
}

/// Resolve all `build` definitions of a manifest, in order.
pub fn resolve(manifest: &Manifest) -> Result<Vec<ResolvedBuild>, ResolveError> {
	for (i, rule) in manifest.rules.iter().enumerate() {
		if rule.name == "phony" || manifest.rules[..i].iter().any(|r| r.name == rule.name) {
			return Err(ResolveError::DuplicateRule(rule.name.clone()));
		}
	}
	let builds = manifest
		.builds
		.iter()
		.enumerate()
		.map(|(i, build)| resolve_build(manifest, i, build))
		.collect::<Result<Vec<_>, _>>()?;
	debug!("Resolved {} builds.", builds.len());
	Ok(builds)
}

fn resolve_build(
	manifest: &Manifest,
	index: usize,
	build: &Build,
) -> Result<ResolvedBuild, ResolveError> {
	if build.explicit_outputs.is_empty() {
		return Err(ResolveError::NoOutputs(index));
	}

	// The build variables are expanded right away, in the file scope and the
	// build variables before them.
	let mut build_vars = Environment::new();
	for binding in &build.bindings {
		let value = expand_template(
			&binding.template,
			&BuildScope {
				global: &manifest.global_bindings,
				build_vars: &build_vars,
			},
		)?;
		build_vars.push(binding.name.clone(), value);
	}

	let command = if build.rule == "phony" {
		None
	} else {
		let rule = manifest
			.rule(&build.rule)
			.ok_or_else(|| ResolveError::UndefinedRule(build.rule.clone()))?;

		let build_scope = BuildScope {
			global: &manifest.global_bindings,
			build_vars: &build_vars,
		};

		// Bring $in, $out, and the rule variables into scope.
		let scope = EdgeScope {
			build_scope: &build_scope,
			rule_vars: &rule.bindings,
			inputs: &build.explicit_inputs,
			outputs: &build.explicit_outputs,
		};

		Some(ResolvedCommand {
			command: expand_var("command", &scope)?,
			description: expand_var("description", &scope)?,
		})
	};

	Ok(ResolvedBuild {
		rule_name: build.rule.clone(),
		outputs: build.explicit_outputs.clone(),
		explicit_inputs: build.explicit_inputs.clone(),
		implicit_inputs: build.implicit_inputs.clone(),
		order_only_inputs: build.order_only_inputs.clone(),
		command,
	})
}

/// Map every output to the index of the build that produces it.
///
/// If multiple builds produce the same output, the first one is used.
pub fn output_index(builds: &[ResolvedBuild]) -> IndexMap<RawString, usize> {
	let mut index = IndexMap::new();
	for (i, build) in builds.iter().enumerate() {
		for output in &build.outputs {
			index.entry(output.clone()).or_insert(i);
		}
	}
	index
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::manifest::read_from;

	fn command(build: &ResolvedBuild) -> &str {
		build.command.as_ref().unwrap().command.to_str().unwrap()
	}

	#[test]
	fn test_resolve_command() {
		let m = read_from(
			b"cflags = -O2\n\
			rule cc\n  command = gcc $cflags $extra -c $in -o $out\n  description = CC $out\n\
			build a.o: cc a.c | a.h || gen\n  extra = -g\n",
		)
		.unwrap();
		let builds = resolve(&m).unwrap();
		assert_eq!(builds.len(), 1);
		let b = &builds[0];
		assert_eq!(command(b), "gcc -O2 -g -c a.c -o a.o");
		assert_eq!(
			b.command.as_ref().unwrap().description.to_str().unwrap(),
			"CC a.o"
		);
		assert_eq!(b.rule_name, "cc");
		assert_eq!(b.implicit_inputs.len(), 1);
		assert_eq!(b.order_only_inputs.len(), 1);
		assert!(!b.is_phony());
	}

	#[test]
	fn test_build_variables_override_rule_variables() {
		let m = read_from(
			b"flags = global\n\
			rule r\n  flags = rule\n  command = run $flags\n\
			build a: r\n\
			build b: r\n  flags = build $flags\n",
		)
		.unwrap();
		let builds = resolve(&m).unwrap();
		assert_eq!(command(&builds[0]), "run rule");
		assert_eq!(command(&builds[1]), "run build global");
	}

	#[test]
	fn test_phony() {
		let m = read_from(b"build all: phony a b\n").unwrap();
		let builds = resolve(&m).unwrap();
		assert!(builds[0].is_phony());
		assert_eq!(builds[0].explicit_inputs.len(), 2);
	}

	#[test]
	fn test_errors() {
		let m = read_from(b"build a: missing\n").unwrap();
		match resolve(&m) {
			Err(ResolveError::UndefinedRule(name)) => assert_eq!(name, "missing"),
			other => panic!("Unexpected result: {:?}", other),
		}

		let m = read_from(b"rule r\n  command = x\nbuild : r\n").unwrap();
		match resolve(&m) {
			Err(ResolveError::NoOutputs(0)) => {}
			other => panic!("Unexpected result: {:?}", other),
		}

		let m = read_from(b"rule r\n  command = x\nrule r\n  command = y\n").unwrap();
		match resolve(&m) {
			Err(ResolveError::DuplicateRule(name)) => assert_eq!(name, "r"),
			other => panic!("Unexpected result: {:?}", other),
		}

		let m = read_from(b"rule r\n  command = $a\n  a = $b\n  b = $a\nbuild x: r\n").unwrap();
		match resolve(&m) {
			Err(ResolveError::ExpansionError(e)) => {
				assert_eq!(e.to_string(), "Cycle in variable expansion: a -> b -> a");
			}
			other => panic!("Unexpected result: {:?}", other),
		}
	}

	#[test]
	fn test_output_index() {
		let m = read_from(
			b"rule r\n  command = x\nbuild a b: r\nbuild c: r a\nbuild a: phony\n",
		)
		.unwrap();
		let builds = resolve(&m).unwrap();
		let index = output_index(&builds);
		let keys: Vec<&str> = index.keys().map(|k| k.to_str().unwrap()).collect();
		assert_eq!(keys, vec!["a", "b", "c"]);
		assert_eq!(index.values().cloned().collect::<Vec<_>>(), vec![0, 0, 1]);
	}
}
