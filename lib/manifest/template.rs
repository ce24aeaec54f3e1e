//! Unevaluated strings: literal text mixed with variable references.

use super::scope::Environment;
use raw_string::{RawStr, RawString};
use std::borrow::Cow;
use std::iter::FromIterator;

/// A piece of an [`EvalTemplate`].
///
/// While parsing, both variants borrow from the source buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalPart<'a> {
	/// Text which is copied as-is.
	Literal(Cow<'a, RawStr>),
	/// A `$name` or `${name}` reference.
	VarRef(Cow<'a, str>),
}

impl<'a> EvalPart<'a> {
	pub fn literal(text: &'a RawStr) -> Self {
		EvalPart::Literal(Cow::Borrowed(text))
	}

	pub fn var(name: &'a str) -> Self {
		EvalPart::VarRef(Cow::Borrowed(name))
	}

	fn is_empty(&self) -> bool {
		match self {
			EvalPart::Literal(text) => text.is_empty(),
			EvalPart::VarRef(name) => name.is_empty(),
		}
	}

	/// Copy the borrowed text, detaching it from the source buffer.
	pub fn into_owned(self) -> EvalPart<'static> {
		match self {
			EvalPart::Literal(text) => EvalPart::Literal(Cow::Owned(text.into_owned())),
			EvalPart::VarRef(name) => EvalPart::VarRef(Cow::Owned(name.into_owned())),
		}
	}
}

/// A string which still needs variable expansion.
///
/// Never contains empty parts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalTemplate<'a> {
	parts: Vec<EvalPart<'a>>,
}

impl<'a> EvalTemplate<'a> {
	/// Create a template without any parts, which evaluates to an empty string.
	pub fn new() -> Self {
		EvalTemplate { parts: Vec::new() }
	}

	/// Append a part, unless it is empty.
	pub fn push(&mut self, part: EvalPart<'a>) {
		if !part.is_empty() {
			self.parts.push(part);
		}
	}

	pub fn push_literal(&mut self, text: &'a RawStr) {
		self.push(EvalPart::literal(text));
	}

	pub fn push_var(&mut self, name: &'a str) {
		self.push(EvalPart::var(name));
	}

	pub fn parts(&self) -> &[EvalPart<'a>] {
		&self.parts
	}

	/// True if there are no parts at all.
	///
	/// Note that a non-empty template can still evaluate to an empty string.
	pub fn is_empty(&self) -> bool {
		self.parts.is_empty()
	}

	/// The names of all referenced variables, in order of appearance.
	pub fn var_refs(&self) -> impl Iterator<Item = &str> {
		self.parts.iter().filter_map(|part| match part {
			EvalPart::VarRef(name) => Some(&**name),
			EvalPart::Literal(_) => None,
		})
	}

	/// Copy all borrowed text, detaching the template from the source buffer.
	pub fn into_owned(self) -> EvalTemplate<'static> {
		EvalTemplate {
			parts: self.parts.into_iter().map(EvalPart::into_owned).collect(),
		}
	}

	/// Resolve all variable references in `env`, and concatenate everything.
	///
	/// Unknown variables expand to nothing.
	pub fn evaluate(&self, env: &Environment) -> RawString {
		let mut result = RawString::new();
		self.evaluate_into(env, &mut result);
		result
	}

	/// [`evaluate()`][Self::evaluate], but appending to an existing string.
	pub fn evaluate_into(&self, env: &Environment, result: &mut RawString) {
		for part in &self.parts {
			match part {
				EvalPart::Literal(text) => result.push_str(text.as_bytes()),
				EvalPart::VarRef(name) => {
					if let Some(value) = env.lookup(name) {
						result.push_str(value.as_bytes());
					}
				}
			}
		}
	}

	/// Write the template back in `build.ninja` syntax.
	///
	/// `$`, spaces, and colons in literal text are escaped, and references are
	/// always written in the `${name}` form. A literal `|` can not be
	/// escaped, so templates containing one don't survive as a path.
	pub fn unparse(&self) -> RawString {
		let mut result = RawString::new();
		for part in &self.parts {
			match part {
				EvalPart::Literal(text) => {
					for c in text.bytes() {
						if c == b'$' || c == b' ' || c == b':' {
							result.push(b'$');
						}
						result.push(c);
					}
				}
				EvalPart::VarRef(name) => {
					result.push_str(&b"${"[..]);
					result.push_str(name.as_bytes());
					result.push(b'}');
				}
			}
		}
		result
	}
}

impl<'a> FromIterator<EvalPart<'a>> for EvalTemplate<'a> {
	fn from_iter<I: IntoIterator<Item = EvalPart<'a>>>(iter: I) -> Self {
		let mut template = EvalTemplate::new();
		for part in iter {
			template.push(part);
		}
		template
	}
}
