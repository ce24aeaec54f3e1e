//! Errors that can occur while reading, parsing or resolving `build.ninja` files.

use crate::error::{line_at, Location};
use raw_string::{RawStr, RawString};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// A syntax error: an unexpected byte (or end of input) at some offset.
///
/// Only the first error is reported. The parse is aborted right away.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ParseError {
	/// The byte offset of the unexpected byte.
	pub position: usize,
	/// The unexpected byte, or `None` for the end of the input.
	pub unexpected: Option<u8>,
	/// What was being parsed, e.g. `"build colon"`.
	pub label: &'static str,
}

impl ParseError {
	/// Look up where the error is in `source`, and copy the line it is on.
	pub fn diagnostic(&self, source: &RawStr) -> Diagnostic {
		Diagnostic {
			label: self.label,
			location: Location::of(source, self.position),
			unexpected: self.unexpected,
			source_line: line_at(source, self.position).to_owned(),
		}
	}
}

struct Unexpected(Option<u8>);

impl fmt::Display for Unexpected {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.0 {
			Some(c) => write!(f, "'{}'", std::ascii::escape_default(c)),
			None => write!(f, "end of input"),
		}
	}
}

impl fmt::Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"{} at offset {}: unexpected {}",
			self.label,
			self.position,
			Unexpected(self.unexpected)
		)
	}
}

impl Error for ParseError {}

/// A [`ParseError`] with its line and column, and a copy of the source line.
///
/// Displays as the error message, the source line, and a caret under the
/// offending column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
	pub label: &'static str,
	pub location: Location,
	pub unexpected: Option<u8>,
	pub source_line: RawString,
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(
			f,
			"{} at {}: unexpected {}",
			self.label,
			self.location,
			Unexpected(self.unexpected)
		)?;
		writeln!(f, "{}", self.source_line)?;
		let indent = self.location.column.get() as usize - 1;
		write!(f, "{:indent$}^", "", indent = indent)
	}
}

impl Error for Diagnostic {}

/// An error while expanding variables: Variable definitions make an infinite
/// cycle.
#[derive(Debug)]
pub struct ExpansionError {
	/// The 'stack trace' of the cycle, containing the variable names.
	///
	/// Starts with the name of the variable that was last expanded before
	/// the cycle was found:
	/// So, for `a -> b -> c -> a`, contains: `["c", "b", "a"]`.
	pub cycle: Box<[String]>,
}

impl fmt::Display for ExpansionError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "Cycle in variable expansion: ")?;
		for var in self.cycle.iter().rev() {
			write!(f, "{} -> ", var)?;
		}
		if let Some(last) = self.cycle.last() {
			write!(f, "{}", last)?;
		}
		Ok(())
	}
}

impl Error for ExpansionError {}

/// An error while turning `build` definitions into commands.
#[derive(Debug)]
pub enum ResolveError {
	/// A `build` definition refers to a `rule` which doesn't exist.
	UndefinedRule(String),
	/// A rule with this name was already defined.
	DuplicateRule(String),
	/// A `build` definition (the n-th one) without any outputs.
	NoOutputs(usize),
	/// Variable expansion encountered a cycle.
	ExpansionError(ExpansionError),
}

impl fmt::Display for ResolveError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			ResolveError::UndefinedRule(n) => write!(f, "Undefined rule name: {}", n),
			ResolveError::DuplicateRule(n) => write!(f, "Duplicate rule: {}", n),
			ResolveError::NoOutputs(i) => write!(f, "Build definition #{} has no outputs", i + 1),
			ResolveError::ExpansionError(e) => write!(f, "{}", e),
		}
	}
}

impl Error for ResolveError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			ResolveError::ExpansionError(e) => Some(e),
			_ => None,
		}
	}
}

impl From<ExpansionError> for ResolveError {
	fn from(src: ExpansionError) -> ResolveError {
		ResolveError::ExpansionError(src)
	}
}

/// An error while reading a `build.ninja` file.
#[derive(Debug)]
pub enum ReadError {
	/// A problem while trying to open or read the file.
	IoError {
		file_name: PathBuf,
		error: std::io::Error,
	},
	/// A syntax error in the file.
	ParseError {
		file_name: PathBuf,
		diagnostic: Diagnostic,
	},
}

impl fmt::Display for ReadError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			ReadError::IoError { file_name, error } => {
				write!(f, "Unable to read {:?}: {}", file_name, error)
			}
			ReadError::ParseError {
				file_name,
				diagnostic,
			} => write!(f, "{}: {}", file_name.display(), diagnostic),
		}
	}
}

impl Error for ReadError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			ReadError::IoError { error, .. } => Some(error),
			ReadError::ParseError { diagnostic, .. } => Some(diagnostic),
		}
	}
}

impl From<ReadError> for std::io::Error {
	fn from(src: ReadError) -> std::io::Error {
		std::io::Error::new(std::io::ErrorKind::Other, src)
	}
}
