use log::{Level, Metadata, Record};

/// Logs to standard error.
///
/// Debug and trace messages also show the module they come from.
pub struct Logger;

impl log::Log for Logger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= log::max_level()
	}

	fn log(&self, record: &Record) {
		if !self.enabled(record.metadata()) {
			return;
		}
		if record.level() >= Level::Debug {
			eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
		} else {
			eprintln!("[{}] {}", record.level(), record.args());
		}
	}

	fn flush(&self) {}
}
