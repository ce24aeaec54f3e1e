//! Locating byte offsets in a source buffer, for error reporting.

use raw_string::RawStr;
use std::fmt;
use std::num::NonZeroU32;

/// A place in a source buffer: The place where something went wrong.
///
/// Both numbers start at 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Location {
	pub line: NonZeroU32,
	pub column: NonZeroU32,
}

impl Location {
	/// The location of the very first byte of a buffer.
	pub const START: Self = Location {
		line: unsafe { NonZeroU32::new_unchecked(1) },
		column: unsafe { NonZeroU32::new_unchecked(1) },
	};

	/// Find the line and column of byte `offset` in `source`.
	///
	/// An offset at (or beyond) the end of the buffer refers to the position
	/// right after the last byte.
	pub fn of(source: &RawStr, offset: usize) -> Location {
		let offset = offset.min(source.len());
		let before = &source.as_bytes()[..offset];
		let line = memchr::memchr_iter(b'\n', before).count() + 1;
		let line_start = line_start(source, offset);
		let column = offset - line_start + 1;
		Location {
			line: to_nonzero(line),
			column: to_nonzero(column),
		}
	}
}

fn to_nonzero(n: usize) -> NonZeroU32 {
	NonZeroU32::new(n.min(u32::MAX as usize) as u32).unwrap_or(Location::START.line)
}

fn line_start(source: &RawStr, offset: usize) -> usize {
	memchr::memrchr(b'\n', &source.as_bytes()[..offset]).map_or(0, |n| n + 1)
}

/// The full line containing byte `offset`, without its newline.
pub fn line_at(source: &RawStr, offset: usize) -> &RawStr {
	let offset = offset.min(source.len());
	let start = line_start(source, offset);
	let end = memchr::memchr(b'\n', &source.as_bytes()[offset..]).map_or(source.len(), |n| offset + n);
	&source[start..end]
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn loc(source: &str, offset: usize) -> (u32, u32) {
		let l = Location::of(RawStr::from_bytes(source.as_bytes()), offset);
		(l.line.get(), l.column.get())
	}

	#[test]
	fn test_location() {
		assert_eq!(loc("", 0), (1, 1));
		assert_eq!(loc("abc", 2), (1, 3));
		assert_eq!(loc("abc\ndef", 3), (1, 4));
		assert_eq!(loc("abc\ndef", 4), (2, 1));
		assert_eq!(loc("abc\ndefgh\n", 8), (2, 5));
		assert_eq!(loc("a\n", 2), (2, 1));
		assert_eq!(loc("a\n", 100), (2, 1));
		assert_eq!(Location::of(RawStr::from_bytes(b"x"), 0), Location::START);
	}

	#[test]
	fn test_line_at() {
		let source = RawStr::from_bytes(b"first\nsecond line\nthird");
		assert_eq!(line_at(source, 0).as_bytes(), b"first");
		assert_eq!(line_at(source, 5).as_bytes(), b"first");
		assert_eq!(line_at(source, 6).as_bytes(), b"second line");
		assert_eq!(line_at(source, 10).as_bytes(), b"second line");
		assert_eq!(line_at(source, 21).as_bytes(), b"third");
		assert_eq!(line_at(source, 23).as_bytes(), b"third");
		assert_eq!(line_at(RawStr::from_bytes(b"a\n"), 2).as_bytes(), b"");
	}
}
