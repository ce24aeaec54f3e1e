//! The lexical layer: spaces, identifiers, line ends, comments, and
//! `$`-escaped text.

use super::cursor::Cursor;
use super::error::ParseError;
use super::template::EvalTemplate;
use std::str::from_utf8_unchecked;

/// Where a template ends.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TemplateMode {
	/// The right hand side of `name = value`: runs until the end of the line.
	Value,
	/// A path in a `build` or `default` line: also ends at a space, `:` or `|`.
	Path,
}

/// Create an error for the byte at the cursor.
pub fn unexpected(cursor: &Cursor, label: &'static str) -> ParseError {
	ParseError {
		position: cursor.position(),
		unexpected: cursor.peek(),
		label,
	}
}

pub fn is_identifier_char(c: u8) -> bool {
	c.is_ascii_alphanumeric() || c == b'_' || c == b'-'
}

// Eats spaces. Returns the amount of space eaten.
pub fn eat_spaces(cursor: &mut Cursor) -> usize {
	let mut n = 0;
	while cursor.peek() == Some(b' ') {
		cursor.advance();
		n += 1;
	}
	n
}

pub fn eat_identifier<'a>(cursor: &mut Cursor<'a>) -> Result<&'a str, ParseError> {
	let start = cursor.position();
	while let Some(c) = cursor.advance() {
		if !is_identifier_char(c) {
			cursor.retreat();
			break;
		}
	}
	let ident = cursor.since(start);
	if ident.is_empty() {
		Err(unexpected(cursor, "identifier"))
	} else {
		// Identifiers consist of ASCII characters only.
		Ok(unsafe { from_utf8_unchecked(ident.as_bytes()) })
	}
}

/// Eats the newline at the end of a statement.
pub fn eat_end_of_line(cursor: &mut Cursor) -> Result<(), ParseError> {
	if cursor.peek() == Some(b'\n') {
		cursor.advance();
		Ok(())
	} else {
		Err(unexpected(cursor, "end of line"))
	}
}

/// Eats the rest of a comment line, including the newline.
pub fn eat_comment(cursor: &mut Cursor) -> Result<(), ParseError> {
	match memchr::memchr(b'\n', cursor.rest().as_bytes()) {
		Some(n) => {
			cursor.restore(cursor.position() + n + 1);
			Ok(())
		}
		None => {
			cursor.restore(cursor.source().len());
			Err(unexpected(cursor, "comment"))
		}
	}
}

/// Eats text up to the end of the template, splitting it into literal text
/// and variable references.
///
/// The byte that ends the template (a newline, or in path mode also a space,
/// `:` or `|`) is not consumed.
pub fn eat_template<'a>(
	cursor: &mut Cursor<'a>,
	mode: TemplateMode,
) -> Result<EvalTemplate<'a>, ParseError> {
	let mut template = EvalTemplate::new();
	let mut literal_start = cursor.position();
	loop {
		match cursor.advance() {
			None if mode == TemplateMode::Value => {
				return Err(unexpected(cursor, "value"));
			}
			None => break,
			Some(b'\n') => {
				cursor.retreat();
				break;
			}
			Some(b' ') | Some(b':') | Some(b'|') if mode == TemplateMode::Path => {
				cursor.retreat();
				break;
			}
			Some(b'$') => {
				cursor.retreat();
				template.push_literal(cursor.since(literal_start));
				cursor.advance();
				eat_escape(cursor, &mut template)?;
				literal_start = cursor.position();
			}
			Some(_) => {}
		}
	}
	template.push_literal(cursor.since(literal_start));
	Ok(template)
}

// Eats what comes after a `$`.
fn eat_escape<'a>(cursor: &mut Cursor<'a>, template: &mut EvalTemplate<'a>) -> Result<(), ParseError> {
	let start = cursor.position();
	match cursor.advance() {
		Some(b'\n') => {
			eat_spaces(cursor);
		}
		Some(b'$') | Some(b' ') | Some(b':') => {
			template.push_literal(cursor.since(start));
		}
		Some(b'{') => {
			let name = eat_identifier(cursor)?;
			if cursor.peek() != Some(b'}') {
				return Err(unexpected(cursor, "variable reference"));
			}
			cursor.advance();
			template.push_var(name);
		}
		Some(_) => {
			cursor.retreat();
			template.push_var(eat_identifier(cursor)?);
		}
		None => return Err(unexpected(cursor, "variable reference")),
	}
	Ok(())
}
