//! Variable scoping and lookup.
//!
//! Within every scope, the *first* definition of a name is the one that is
//! found. Later definitions of the same name are kept, but never seen.

use super::template::EvalTemplate;
use super::Binding;
use raw_string::{RawStr, RawString};

/// A list of variables with already evaluated values, in definition order.
#[derive(Clone, Debug, Default)]
pub struct Environment {
	vars: Vec<(String, RawString)>,
}

impl Environment {
	/// Create an environment without any definitions.
	pub fn new() -> Self {
		Environment { vars: Vec::new() }
	}

	/// Add a definition at the end.
	///
	/// If `name` was already defined, the earlier definition stays in effect.
	pub fn push(&mut self, name: impl Into<String>, value: RawString) {
		self.vars.push((name.into(), value));
	}

	/// Find the first definition of `name`.
	pub fn lookup(&self, name: &str) -> Option<&RawStr> {
		self.vars
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, value)| &**value)
	}

	/// All definitions, in order, including shadowed ones.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &RawStr)> {
		self.vars.iter().map(|(n, v)| (&n[..], &**v))
	}

	pub fn len(&self) -> usize {
		self.vars.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vars.is_empty()
	}
}

/// The scope which includes the evaluated `build` variables, on top of the
/// file-level variables.
#[derive(Debug)]
pub struct BuildScope<'a> {
	/// The file scope.
	pub global: &'a Environment,

	/// The variables of the current `build` definition.
	pub build_vars: &'a Environment,
}

/// The scope which includes both the `build` and the `rule` variables, and
/// `$in`, `$in_newline` and `$out`.
///
/// A rule's `command` and `description` are expanded in this scope.
#[derive(Debug)]
pub struct EdgeScope<'a> {
	/// The file and `build` definition scope.
	pub build_scope: &'a BuildScope<'a>,

	/// The (unevaluated) variables of the `rule`.
	pub rule_vars: &'a [Binding],

	/// The explicit inputs, used for `$in` and `$in_newline`.
	pub inputs: &'a [RawString],

	/// The explicit outputs, used for `$out`.
	pub outputs: &'a [RawString],
}

/// The result of looking a variable up in a `VarScope`.
pub enum FoundVar<'a> {
	/// The variable is found, and the value was already expanded.
	Expanded(&'a RawStr),

	/// The variable is found, and the value needs to be expanded.
	///
	/// This is the case for variables defined in a `rule` definition.
	Unexpanded(&'a EvalTemplate<'a>),

	/// The variable is a special variable (`$in`, `$out`, or `$in_newline`)
	/// containing paths which need to be escaped and separated by either
	/// spaces or newlines.
	Paths {
		paths: &'a [RawString],
		newlines: bool,
	},
}

/// A scope containing variable definitions.
pub trait VarScope {
	/// Look up a variable definition.
	fn lookup_var(&self, var_name: &str) -> Option<FoundVar<'_>>;
}

impl VarScope for Environment {
	fn lookup_var(&self, var_name: &str) -> Option<FoundVar<'_>> {
		self.lookup(var_name).map(FoundVar::Expanded)
	}
}

impl VarScope for [Binding] {
	fn lookup_var(&self, var_name: &str) -> Option<FoundVar<'_>> {
		self.iter()
			.find(|binding| binding.name == var_name)
			.map(|binding| FoundVar::Unexpanded(&binding.template))
	}
}

impl<'a> VarScope for BuildScope<'a> {
	fn lookup_var(&self, var_name: &str) -> Option<FoundVar<'_>> {
		self.build_vars
			.lookup_var(var_name)
			.or_else(|| self.global.lookup_var(var_name))
	}
}

impl<'a> VarScope for EdgeScope<'a> {
	fn lookup_var(&self, var_name: &str) -> Option<FoundVar<'_>> {
		match var_name {
			"in" => Some(FoundVar::Paths {
				paths: self.inputs,
				newlines: false,
			}),
			"out" => Some(FoundVar::Paths {
				paths: self.outputs,
				newlines: false,
			}),
			"in_newline" => Some(FoundVar::Paths {
				paths: self.inputs,
				newlines: true,
			}),
			_ => self
				.build_scope
				.build_vars
				.lookup_var(var_name)
				.or_else(|| {
					self.rule_vars
						.lookup_var(var_name)
						.or_else(|| self.build_scope.global.lookup_var(var_name))
				}),
		}
	}
}
