mod logger;
mod subtools;

use self::logger::Logger;
use log::{debug, error};
use raw_string::RawString;
use std::path::PathBuf;
use std::process::exit;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Options {
	/// The targets to look up with `-t query`.
	#[structopt(parse(from_str))]
	targets: Vec<RawString>,

	/// Change directory before doing anything else.
	#[structopt(short = "C", parse(from_os_str))]
	directory: Option<PathBuf>,

	/// Run a subtool. Use -t list to list subtools.
	#[structopt(short = "t", default_value = "manifest")]
	tool: String,

	/// The build file to read.
	#[structopt(short = "f", default_value = "build.ninja", parse(from_os_str))]
	file: PathBuf,

	/// Enable debug messages.
	#[structopt(long)]
	debug: bool,
}

fn main() {
	log::set_logger(&Logger).unwrap();
	log::set_max_level(log::LevelFilter::Warn);

	let opt = Options::from_args();

	if let Some(dir) = opt.directory.as_ref() {
		std::env::set_current_dir(dir).unwrap_or_else(|e| {
			error!("Unable to change directory to {:?}: {}", dir, e);
			exit(1);
		});
	}

	if opt.debug {
		log::set_max_level(log::LevelFilter::Debug);
		debug!("Debug messages enabled.");
	}

	subtools::run_subtool(&opt.tool, &opt).unwrap_or_else(|e| {
		error!("{}", e);
		exit(1);
	});
}
