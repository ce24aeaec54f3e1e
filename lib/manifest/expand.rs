//! Expanding templates in layered scopes.
//!
//! Unlike [`EvalTemplate::evaluate()`], this handles variables which are
//! themselves unevaluated templates (the variables of a `rule`), and the
//! `$in` and `$out` path lists.

use super::error::ExpansionError;
use super::scope::{FoundVar, VarScope};
use super::template::{EvalPart, EvalTemplate};
use raw_string::{RawStr, RawString};

/// Expand a template in a scope.
pub fn expand_template<S: VarScope + ?Sized>(
	template: &EvalTemplate,
	scope: &S,
) -> Result<RawString, ExpansionError> {
	let mut result = RawString::new();
	expand_template_to(template, scope, &mut result, None)?;
	Ok(result)
}

/// Expand a variable in a scope. Unknown variables expand to nothing.
pub fn expand_var<S: VarScope + ?Sized>(
	var_name: &str,
	scope: &S,
) -> Result<RawString, ExpansionError> {
	let mut result = RawString::new();
	expand_var_to(var_name, scope, &mut result, None)?;
	Ok(result)
}

struct RecursionProtection<'a> {
	parent: Option<&'a RecursionProtection<'a>>,
	var_name: &'a str,
}

impl<'a> RecursionProtection<'a> {
	fn contains(&self, var_name: &str) -> bool {
		let mut prot = Some(self);
		while let Some(p) = prot {
			if p.var_name == var_name {
				return true;
			}
			prot = p.parent;
		}
		false
	}

	// The names on the stack, up to and including the earlier `var_name`.
	fn cycle(&self, var_name: &str) -> Box<[String]> {
		let mut cycle = Vec::new();
		let mut prot = Some(self);
		while let Some(p) = prot {
			cycle.push(p.var_name.to_string());
			if p.var_name == var_name {
				break;
			}
			prot = p.parent;
		}
		cycle.into_boxed_slice()
	}
}

fn expand_template_to<S: VarScope + ?Sized>(
	template: &EvalTemplate,
	scope: &S,
	result: &mut RawString,
	prot: Option<&RecursionProtection>,
) -> Result<(), ExpansionError> {
	for part in template.parts() {
		match part {
			EvalPart::Literal(text) => result.push_str(text.as_bytes()),
			EvalPart::VarRef(name) => expand_var_to(name, scope, result, prot)?,
		}
	}
	Ok(())
}

fn expand_var_to<S: VarScope + ?Sized>(
	var_name: &str,
	scope: &S,
	result: &mut RawString,
	prot: Option<&RecursionProtection>,
) -> Result<(), ExpansionError> {
	match scope.lookup_var(var_name) {
		Some(FoundVar::Expanded(value)) => result.push_str(value.as_bytes()),
		Some(FoundVar::Paths { paths, newlines }) => {
			let separator = if newlines { b'\n' } else { b' ' };
			for (i, path) in paths.iter().enumerate() {
				if i > 0 {
					result.push(separator);
				}
				push_shell_escaped(result, path);
			}
		}
		Some(FoundVar::Unexpanded(template)) => {
			if let Some(prot) = prot {
				if prot.contains(var_name) {
					return Err(ExpansionError {
						cycle: prot.cycle(var_name),
					});
				}
			}
			expand_template_to(
				template,
				scope,
				result,
				Some(&RecursionProtection {
					parent: prot,
					var_name,
				}),
			)?;
		}
		None => {}
	}
	Ok(())
}

fn is_shell_safe(c: u8) -> bool {
	c.is_ascii_alphanumeric() || b"_+-./".contains(&c)
}

/// Append `path`, single-quoted if it contains anything a shell would
/// interpret.
pub fn push_shell_escaped(result: &mut RawString, path: &RawStr) {
	if !path.is_empty() && path.bytes().all(is_shell_safe) {
		result.push_str(path.as_bytes());
		return;
	}
	result.push(b'\'');
	for c in path.bytes() {
		if c == b'\'' {
			result.push_str(&b"'\\''"[..]);
		} else {
			result.push(c);
		}
	}
	result.push(b'\'');
}
