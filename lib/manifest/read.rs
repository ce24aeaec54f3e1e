use super::error::{Diagnostic, ReadError};
use super::parse::parse;
use super::Manifest;
use log::debug;
use raw_string::RawStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

fn read_bytes(file_name: &Path) -> Result<Vec<u8>, ReadError> {
	let mut bytes = Vec::new();
	File::open(file_name)
		.and_then(|f| BufReader::with_capacity(0x10000, f).read_to_end(&mut bytes))
		.map_err(|error| ReadError::IoError {
			file_name: file_name.to_owned(),
			error,
		})?;
	Ok(bytes)
}

/// Read and parse a `build.ninja` file.
pub fn read(file_name: &Path) -> Result<Manifest, ReadError> {
	let source = read_bytes(file_name)?;
	debug!("Read {} bytes from {:?}.", source.len(), file_name);
	read_from(&source).map_err(|diagnostic| ReadError::ParseError {
		file_name: file_name.to_owned(),
		diagnostic,
	})
}

/// [`read()`], but with the source given directly instead of read from a file.
///
/// On failure, the error is already rendered against `source`, so it stays
/// usable after `source` is gone.
pub fn read_from(source: &[u8]) -> Result<Manifest, Diagnostic> {
	let source = RawStr::from_bytes(source);
	parse(source).map_err(|e| e.diagnostic(source))
}
