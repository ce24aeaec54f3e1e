//! A byte cursor with one byte of lookahead and one byte of undo.

use raw_string::RawStr;

/// A position in an immutable source buffer.
///
/// `None` is returned when reading at the end of the buffer.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
	source: &'a RawStr,
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at the start of `source`.
	pub fn new(source: &'a RawStr) -> Self {
		Cursor { source, pos: 0 }
	}

	/// The whole buffer this cursor moves over.
	pub fn source(&self) -> &'a RawStr {
		self.source
	}

	/// The current byte offset.
	pub fn position(&self) -> usize {
		self.pos
	}

	/// Go back to a position previously returned by [`position()`][Self::position].
	pub fn restore(&mut self, pos: usize) {
		assert!(pos <= self.source.len(), "Restored cursor beyond end of input");
		self.pos = pos;
	}

	/// The byte at the current position, without consuming it.
	pub fn peek(&self) -> Option<u8> {
		self.source.as_bytes().get(self.pos).cloned()
	}

	/// Consume and return the byte at the current position.
	///
	/// At the end of the input, this returns `None` and doesn't move.
	pub fn advance(&mut self) -> Option<u8> {
		let c = self.peek()?;
		self.pos += 1;
		Some(c)
	}

	/// Step back exactly one byte.
	///
	/// Only valid right after consuming a byte. Retreating from the start
	/// of the buffer is a bug in the grammar, not in its input.
	pub fn retreat(&mut self) {
		assert!(self.pos > 0, "Retreated cursor before start of input");
		self.pos -= 1;
	}

	/// Whether the whole buffer has been consumed.
	pub fn at_end(&self) -> bool {
		self.pos == self.source.len()
	}

	/// The bytes between `start` and the current position.
	pub fn since(&self, start: usize) -> &'a RawStr {
		&self.source[start..self.pos]
	}

	/// The unconsumed rest of the buffer.
	pub fn rest(&self) -> &'a RawStr {
		&self.source[self.pos..]
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_advance_and_retreat() {
		let mut c = Cursor::new(RawStr::from_bytes(b"ab"));
		assert_eq!(c.peek(), Some(b'a'));
		assert_eq!(c.advance(), Some(b'a'));
		assert_eq!(c.advance(), Some(b'b'));
		assert!(c.at_end());
		assert_eq!(c.advance(), None);
		assert_eq!(c.peek(), None);
		assert_eq!(c.position(), 2);
		c.retreat();
		assert_eq!(c.peek(), Some(b'b'));
		assert_eq!(c.since(0).as_bytes(), b"a");
		assert_eq!(c.rest().as_bytes(), b"b");
	}

	#[test]
	fn test_restore() {
		let mut c = Cursor::new(RawStr::from_bytes(b"xyz"));
		let saved = c.position();
		c.advance();
		c.advance();
		c.restore(saved);
		assert_eq!(c.advance(), Some(b'x'));
	}

	#[test]
	#[should_panic(expected = "before start")]
	fn test_retreat_at_start() {
		let mut c = Cursor::new(RawStr::from_bytes(b"a"));
		c.retreat();
	}

	#[test]
	fn test_empty() {
		let mut c = Cursor::new(RawStr::from_bytes(b""));
		assert!(c.at_end());
		assert_eq!(c.advance(), None);
		assert_eq!(c.position(), 0);
	}
}
