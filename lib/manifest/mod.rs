//! Everything related to the `build.ninja` file format.
//!
//! > `build.ninja` file → [`read()`][read()] → [`Manifest`]
//!
//! A [`Manifest`] is the literal content of the file: the rules are kept
//! unevaluated, and the build edges are not checked against them. Turning
//! edges into commands to run is done separately, by [`resolve()`].

mod cursor;
mod eat;
mod read;

pub mod error;
pub mod expand;
pub mod parse;
pub mod resolve;
pub mod scope;
pub mod template;

pub use self::cursor::Cursor;
pub use self::read::{read, read_from};
pub use self::resolve::{output_index, resolve, ResolvedBuild, ResolvedCommand};
pub use self::scope::Environment;
pub use self::template::{EvalPart, EvalTemplate};

use raw_string::RawString;

/// The result of parsing a `build.ninja` file.
#[derive(Debug, Default)]
pub struct Manifest {
	/// The file-level variables, evaluated, in order of definition.
	pub global_bindings: Environment,
	/// All `rule` definitions, in order.
	pub rules: Vec<Rule>,
	/// All `build` definitions, in order.
	pub builds: Vec<Build>,
	/// The targets named by `default` statements.
	pub defaults: Vec<RawString>,
}

/// A variable definition inside a `rule` or `build` block.
///
/// The value is kept unevaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
	pub name: String,
	pub template: EvalTemplate<'static>,
}

/// A `rule` definition.
#[derive(Clone, Debug)]
pub struct Rule {
	pub name: String,
	pub bindings: Vec<Binding>,
}

/// A `build` definition: How to produce a set of outputs from a set of inputs.
///
/// All paths are already evaluated, in the file-level scope as it was at the
/// `build` line.
#[derive(Clone, Debug)]
pub struct Build {
	/// The name of the rule to use. Not checked while parsing.
	pub rule: String,
	/// The outputs.
	///
	/// Usually just one. Can be empty: The parser doesn't reject that, but
	/// [`resolve()`] does.
	pub explicit_outputs: Vec<RawString>,
	/// The inputs that appear in `$in`.
	pub explicit_inputs: Vec<RawString>,
	/// The inputs after a `|`.
	pub implicit_inputs: Vec<RawString>,
	/// The inputs after a `||`.
	pub order_only_inputs: Vec<RawString>,
	/// The variables defined in the indented block below the `build` line.
	pub bindings: Vec<Binding>,
}

impl Manifest {
	/// Create an empty manifest.
	pub fn new() -> Self {
		Manifest::default()
	}

	/// Find the first rule with the given name.
	pub fn rule(&self, name: &str) -> Option<&Rule> {
		self.rules.iter().find(|rule| rule.name == name)
	}
}

impl Rule {
	/// Find the first binding with the given name.
	pub fn binding(&self, name: &str) -> Option<&EvalTemplate<'static>> {
		self.bindings
			.iter()
			.find(|binding| binding.name == name)
			.map(|binding| &binding.template)
	}
}

impl Build {
	/// All inputs: explicit, implicit, and order-only, in that order.
	pub fn all_inputs(&self) -> impl Iterator<Item = &RawString> {
		self.explicit_inputs
			.iter()
			.chain(&self.implicit_inputs)
			.chain(&self.order_only_inputs)
	}
}
