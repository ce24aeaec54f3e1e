//! The parser.

use super::cursor::Cursor;
use super::eat::{
	eat_comment, eat_end_of_line, eat_identifier, eat_spaces, eat_template, unexpected, TemplateMode,
};
use super::error::ParseError;
use super::scope::Environment;
use super::template::EvalTemplate;
use super::{Binding, Build, Manifest, Rule};
use log::{debug, trace};
use raw_string::{RawStr, RawString};

/// A `build.ninja` file parser.
pub struct Parser<'a> {
	cursor: Cursor<'a>,
}

/// A variable definition, with a name and an (unevaluated) definition.
#[derive(Debug)]
pub struct Variable<'a> {
	pub name: &'a str,
	pub value: EvalTemplate<'a>,
}

/// A statement in a `build.ninja` file.
#[derive(Debug)]
pub enum Statement<'a> {
	/// A file-level variable definition.
	Variable(Variable<'a>),

	/// A rule definition.
	Rule { name: &'a str },

	/// A build definition.
	Build {
		rule_name: &'a str,
		explicit_outputs: Vec<EvalTemplate<'a>>,
		explicit_deps: Vec<EvalTemplate<'a>>,
		implicit_deps: Vec<EvalTemplate<'a>>,
		order_deps: Vec<EvalTemplate<'a>>,
	},

	/// A default target declaration.
	Default { path: EvalTemplate<'a> },
}

impl<'a> Parser<'a> {
	/// Create a new parser, to parse `source`.
	pub fn new(source: &'a RawStr) -> Self {
		Parser {
			cursor: Cursor::new(source),
		}
	}

	/// The byte offset of the parser in the source.
	pub fn position(&self) -> usize {
		self.cursor.position()
	}

	/// Read the next statement in the file.
	///
	/// Skips empty lines and comments. Returns `None` at the end of the file.
	///
	/// Does *not* read the variables underneath a `build` or `rule` statement.
	/// That is a separate step, for which `next_binding` needs to be called
	/// in a loop right after such a statement is read.
	pub fn next_statement(&mut self) -> Result<Option<Statement<'a>>, ParseError> {
		loop {
			match self.cursor.advance() {
				None => return Ok(None),
				Some(b'#') => eat_comment(&mut self.cursor)?,
				Some(b'\n') => {}
				Some(_) => {
					self.cursor.retreat();
					break;
				}
			}
		}

		let ident = eat_identifier(&mut self.cursor)?;
		eat_spaces(&mut self.cursor);

		Ok(Some(match ident {
			"build" => self.build()?,
			"rule" => {
				let name = eat_identifier(&mut self.cursor)?;
				eat_spaces(&mut self.cursor);
				eat_end_of_line(&mut self.cursor)?;
				Statement::Rule { name }
			}
			"default" => {
				let path = eat_template(&mut self.cursor, TemplateMode::Path)?;
				if path.is_empty() {
					return Err(unexpected(&self.cursor, "default target"));
				}
				eat_spaces(&mut self.cursor);
				eat_end_of_line(&mut self.cursor)?;
				Statement::Default { path }
			}
			name => Statement::Variable(self.assignment(name)?),
		}))
	}

	/// Read an (indented) variable definition.
	///
	/// To be used (repeatedly) right after a `build` or `rule` statement.
	/// Returns `None` at the first line that isn't indented.
	pub fn next_binding(&mut self) -> Result<Option<Variable<'a>>, ParseError> {
		while self.cursor.peek() == Some(b' ') {
			eat_spaces(&mut self.cursor);
			match self.cursor.peek() {
				Some(b'\n') => {
					self.cursor.advance();
				}
				Some(b'#') => {
					self.cursor.advance();
					eat_comment(&mut self.cursor)?;
				}
				_ => {
					let name = eat_identifier(&mut self.cursor)?;
					eat_spaces(&mut self.cursor);
					return self.assignment(name).map(Some);
				}
			}
		}
		Ok(None)
	}

	/// Read all indented variable definitions, as owned bindings.
	pub fn bindings(&mut self) -> Result<Vec<Binding>, ParseError> {
		let mut bindings = Vec::new();
		while let Some(Variable { name, value }) = self.next_binding()? {
			bindings.push(Binding {
				name: name.to_string(),
				template: value.into_owned(),
			});
		}
		Ok(bindings)
	}

	// Reads the `= value` part of a variable definition, and the newline.
	fn assignment(&mut self, name: &'a str) -> Result<Variable<'a>, ParseError> {
		if self.cursor.peek() != Some(b'=') {
			return Err(unexpected(&self.cursor, "assignment"));
		}
		self.cursor.advance();
		eat_spaces(&mut self.cursor);
		let value = eat_template(&mut self.cursor, TemplateMode::Value)?;
		eat_end_of_line(&mut self.cursor)?;
		Ok(Variable { name, value })
	}

	// Reads paths until something that isn't a path.
	fn paths(&mut self) -> Result<Vec<EvalTemplate<'a>>, ParseError> {
		let mut paths = Vec::new();
		loop {
			eat_spaces(&mut self.cursor);
			let path = eat_template(&mut self.cursor, TemplateMode::Path)?;
			if path.is_empty() {
				return Ok(paths);
			}
			paths.push(path);
		}
	}

	// Reads the rest of the `build` line, after the `build` keyword.
	fn build(&mut self) -> Result<Statement<'a>, ParseError> {
		let explicit_outputs = self.paths()?;

		if self.cursor.peek() != Some(b':') {
			return Err(unexpected(&self.cursor, "build colon"));
		}
		self.cursor.advance();
		eat_spaces(&mut self.cursor);

		let rule_name = eat_identifier(&mut self.cursor)?;

		let explicit_deps = self.paths()?;

		let mut implicit_deps = Vec::new();
		if self.cursor.peek() == Some(b'|') {
			self.cursor.advance();
			if self.cursor.peek() == Some(b'|') {
				// That's `||`, which is handled below.
				self.cursor.retreat();
			} else {
				implicit_deps = self.paths()?;
			}
		}

		let mut order_deps = Vec::new();
		if self.cursor.peek() == Some(b'|') {
			self.cursor.advance();
			if self.cursor.peek() != Some(b'|') {
				return Err(unexpected(&self.cursor, "build inputs"));
			}
			self.cursor.advance();
			order_deps = self.paths()?;
		}

		eat_end_of_line(&mut self.cursor)?;

		Ok(Statement::Build {
			rule_name,
			explicit_outputs,
			explicit_deps,
			implicit_deps,
			order_deps,
		})
	}
}

fn evaluate_all(paths: &[EvalTemplate], env: &Environment) -> Vec<RawString> {
	paths.iter().map(|path| path.evaluate(env)).collect()
}

/// Parse a whole `build.ninja` file.
///
/// File-level variables and paths are evaluated right away, in the variables
/// defined so far. Everything in `rule` and `build` blocks is kept
/// unevaluated.
pub fn parse(source: &RawStr) -> Result<Manifest, ParseError> {
	let mut parser = Parser::new(source);
	let mut manifest = Manifest::new();

	while let Some(statement) = parser.next_statement()? {
		add_statement(&mut parser, &mut manifest, statement)?;
	}

	debug!(
		"Parsed {} variables, {} rules, {} builds, {} defaults.",
		manifest.global_bindings.len(),
		manifest.rules.len(),
		manifest.builds.len(),
		manifest.defaults.len()
	);

	Ok(manifest)
}

fn add_statement<'a>(
	parser: &mut Parser<'a>,
	manifest: &mut Manifest,
	statement: Statement<'a>,
) -> Result<(), ParseError> {
	let env = &mut manifest.global_bindings;
	match statement {
		Statement::Variable(Variable { name, value }) => {
			let value = value.evaluate(env);
			trace!("Variable {} = {}", name, value);
			env.push(name, value);
		}
		Statement::Rule { name } => {
			let bindings = parser.bindings()?;
			trace!("Rule {} with {} bindings", name, bindings.len());
			manifest.rules.push(Rule {
				name: name.to_string(),
				bindings,
			});
		}
		Statement::Build {
			rule_name,
			explicit_outputs,
			explicit_deps,
			implicit_deps,
			order_deps,
		} => {
			let build = Build {
				rule: rule_name.to_string(),
				explicit_outputs: evaluate_all(&explicit_outputs, env),
				explicit_inputs: evaluate_all(&explicit_deps, env),
				implicit_inputs: evaluate_all(&implicit_deps, env),
				order_only_inputs: evaluate_all(&order_deps, env),
				bindings: parser.bindings()?,
			};
			trace!("Build {:?} using {}", build.explicit_outputs, rule_name);
			manifest.builds.push(build);
		}
		Statement::Default { path } => {
			let path = path.evaluate(env);
			trace!("Default {}", path);
			manifest.defaults.push(path);
		}
	}
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::manifest::template::EvalPart;

	fn parse_str(source: &str) -> Result<Manifest, ParseError> {
		parse(RawStr::from_bytes(source.as_bytes()))
	}

	fn strs(paths: &[RawString]) -> Vec<&str> {
		paths.iter().map(|p| p.to_str().unwrap()).collect()
	}

	fn global<'m>(manifest: &'m Manifest, name: &str) -> Option<&'m str> {
		manifest
			.global_bindings
			.lookup(name)
			.map(|v| v.to_str().unwrap())
	}

	#[test]
	fn test_empty() {
		let m = parse_str("").unwrap();
		assert!(m.global_bindings.is_empty());
		assert!(m.rules.is_empty());
		assert!(m.builds.is_empty());
		assert!(m.defaults.is_empty());
		let m = parse_str("\n\n# just a comment\n\n").unwrap();
		assert!(m.builds.is_empty());
	}

	#[test]
	fn test_variables() {
		let m = parse_str("a = 1\nb = ${a}-2\nc = ${b}3 $unknown\n").unwrap();
		assert_eq!(global(&m, "a"), Some("1"));
		assert_eq!(global(&m, "b"), Some("1-2"));
		assert_eq!(global(&m, "c"), Some("1-23 "));
	}

	#[test]
	fn test_redefinition_does_not_shadow() {
		let m = parse_str("x = 1\nx = 2\ny = $x\n").unwrap();
		assert_eq!(global(&m, "x"), Some("1"));
		assert_eq!(global(&m, "y"), Some("1"));
		assert_eq!(m.global_bindings.len(), 3);
	}

	#[test]
	fn test_value_continuation() {
		let m = parse_str("v = foo$\n    bar\n").unwrap();
		assert_eq!(global(&m, "v"), Some("foobar"));
	}

	#[test]
	fn test_build() {
		let m = parse_str("build out1 out2: cc in1 in2 | dep1 || order1\n").unwrap();
		let b = &m.builds[0];
		assert_eq!(strs(&b.explicit_outputs), vec!["out1", "out2"]);
		assert_eq!(b.rule, "cc");
		assert_eq!(strs(&b.explicit_inputs), vec!["in1", "in2"]);
		assert_eq!(strs(&b.implicit_inputs), vec!["dep1"]);
		assert_eq!(strs(&b.order_only_inputs), vec!["order1"]);
		assert!(b.bindings.is_empty());
	}

	#[test]
	fn test_build_order_only_without_implicit() {
		let m = parse_str("build a: cc b || c d\n").unwrap();
		let b = &m.builds[0];
		assert_eq!(strs(&b.explicit_inputs), vec!["b"]);
		assert!(b.implicit_inputs.is_empty());
		assert_eq!(strs(&b.order_only_inputs), vec!["c", "d"]);
	}

	#[test]
	fn test_build_without_spaces_around_pipes() {
		let m = parse_str("build a: cc b|c||d\n").unwrap();
		let b = &m.builds[0];
		assert_eq!(strs(&b.explicit_inputs), vec!["b"]);
		assert_eq!(strs(&b.implicit_inputs), vec!["c"]);
		assert_eq!(strs(&b.order_only_inputs), vec!["d"]);
	}

	#[test]
	fn test_build_paths_are_evaluated() {
		let m = parse_str("dir = obj\nbuild $dir/a.o: cc a$ b.c ${dir}/x$:y\n").unwrap();
		let b = &m.builds[0];
		assert_eq!(strs(&b.explicit_outputs), vec!["obj/a.o"]);
		assert_eq!(strs(&b.explicit_inputs), vec!["a b.c", "obj/x:y"]);
	}

	#[test]
	fn test_build_paths_continue_on_next_line() {
		let m = parse_str("build a: cc b $\n    c\n").unwrap();
		assert_eq!(strs(&m.builds[0].explicit_inputs), vec!["b", "c"]);
	}

	#[test]
	fn test_build_bindings() {
		let m = parse_str("x = global\nbuild a: cc b\n  flags = -O2 $x\n  # comment\n  \n  more = 1\nx = later\n").unwrap();
		let b = &m.builds[0];
		assert_eq!(b.bindings.len(), 2);
		assert_eq!(b.bindings[0].name, "flags");
		assert_eq!(b.bindings[0].template.var_refs().collect::<Vec<_>>(), vec!["x"]);
		assert_eq!(b.bindings[1].name, "more");
		assert_eq!(m.global_bindings.len(), 2);
		assert!(global(&m, "flags").is_none());
	}

	#[test]
	fn test_build_with_zero_outputs() {
		let m = parse_str("build : rule\n").unwrap();
		assert!(m.builds[0].explicit_outputs.is_empty());
		assert_eq!(m.builds[0].rule, "rule");
	}

	#[test]
	fn test_build_errors() {
		let e = parse_str("build a b\n").unwrap_err();
		assert_eq!(e.label, "build colon");
		assert_eq!(e.position, 9);
		assert_eq!(e.unexpected, Some(b'\n'));

		let e = parse_str("build a: cc b | | c\n").unwrap_err();
		assert_eq!(e.label, "build inputs");

		let e = parse_str("build a: cc b | x | y\n").unwrap_err();
		assert_eq!(e.label, "build inputs");
		assert_eq!(e.unexpected, Some(b' '));

		let e = parse_str("build a: : b\n").unwrap_err();
		assert_eq!(e.label, "identifier");

		let e = parse_str("build a: cc b || c | d\n").unwrap_err();
		assert_eq!(e.label, "end of line");

		let e = parse_str("build a: cc b").unwrap_err();
		assert_eq!(e.label, "end of line");
		assert_eq!(e.unexpected, None);
	}

	#[test]
	fn test_rule() {
		let m = parse_str("rule cc\n  command = gcc $in -o $out\n  description = CC $out\n").unwrap();
		let r = &m.rules[0];
		assert_eq!(r.name, "cc");
		assert_eq!(r.bindings.len(), 2);
		assert_eq!(r.bindings[0].name, "command");
		let command = r.binding("command").unwrap();
		assert_eq!(
			command.parts(),
			&[
				EvalPart::literal(RawStr::from_bytes(b"gcc ")),
				EvalPart::var("in"),
				EvalPart::literal(RawStr::from_bytes(b" -o ")),
				EvalPart::var("out"),
			]
		);
		assert_eq!(r.binding("description").unwrap().var_refs().collect::<Vec<_>>(), vec!["out"]);
		assert!(r.binding("depfile").is_none());
	}

	#[test]
	fn test_rule_block_ends_at_unindented_line() {
		let m = parse_str("rule a\n  command = x\nrule b\n  command = y\nz = 1\n").unwrap();
		assert_eq!(m.rules.len(), 2);
		assert_eq!(m.rules[1].name, "b");
		assert_eq!(m.rules[1].bindings.len(), 1);
		assert_eq!(global(&m, "z"), Some("1"));
	}

	#[test]
	fn test_rule_errors() {
		let e = parse_str("rule\n").unwrap_err();
		assert_eq!(e.label, "identifier");
		assert_eq!(e.position, 4);
		let e = parse_str("rule cc extra\n").unwrap_err();
		assert_eq!(e.label, "end of line");
		let e = parse_str("rule cc\n  command gcc\n").unwrap_err();
		assert_eq!(e.label, "assignment");
		let e = parse_str("rule cc\n  = gcc\n").unwrap_err();
		assert_eq!(e.label, "identifier");
	}

	#[test]
	fn test_default() {
		let m = parse_str("out = bin\ndefault $out/app\n").unwrap();
		assert_eq!(strs(&m.defaults), vec!["bin/app"]);
		let m = parse_str("default a\ndefault b \n").unwrap();
		assert_eq!(strs(&m.defaults), vec!["a", "b"]);
	}

	#[test]
	fn test_default_takes_one_path() {
		let e = parse_str("default a b\n").unwrap_err();
		assert_eq!(e.label, "end of line");
		assert_eq!(e.unexpected, Some(b'b'));
		let e = parse_str("default\n").unwrap_err();
		assert_eq!(e.label, "default target");
	}

	#[test]
	fn test_statement_errors() {
		let e = parse_str("x\n").unwrap_err();
		assert_eq!(e.label, "assignment");
		let e = parse_str("x = 1").unwrap_err();
		assert_eq!(e.label, "value");
		let e = parse_str("# comment").unwrap_err();
		assert_eq!(e.label, "comment");
		let e = parse_str("  x = 1\n").unwrap_err();
		assert_eq!(e.label, "identifier");
		assert_eq!(e.position, 0);
		let e = parse_str("a = ${b\n").unwrap_err();
		assert_eq!(e.label, "variable reference");
	}

	#[test]
	fn test_template_round_trip() {
		let source = "a = 1\nv = x$ y$$z${a}w $a:b\n";
		let m = parse_str(source).unwrap();
		let mut parser = Parser::new(RawStr::from_bytes(b"v = x$ y$$z${a}w $a:b\n"));
		let value = match parser.next_statement().unwrap() {
			Some(Statement::Variable(var)) => var.value,
			other => panic!("Unexpected statement: {:?}", other),
		};
		let unparsed = value.unparse();
		let mut reparsed_source = b"v = ".to_vec();
		reparsed_source.extend_from_slice(unparsed.as_bytes());
		reparsed_source.push(b'\n');
		let mut parser = Parser::new(RawStr::from_bytes(&reparsed_source));
		let reparsed = match parser.next_statement().unwrap() {
			Some(Statement::Variable(var)) => var.value,
			other => panic!("Unexpected statement: {:?}", other),
		};
		let env = &m.global_bindings;
		assert_eq!(reparsed.evaluate(env), value.evaluate(env));
		assert_eq!(global(&m, "v"), Some("x y$z1w 1:b"));
		assert_eq!(reparsed.evaluate(env).to_str().unwrap(), "x y$z1w 1:b");
	}
}
