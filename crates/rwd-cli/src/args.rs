use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::{
	extract::ExtractArgs, info::InfoArgs, list::ListArgs, pipe::PipeArgs, update::UpdateArgs,
};

/// Inspect, extract, and update files in RWD game archives.
#[derive(Debug, Clone, Parser)]
#[command(
	name = "rwd",
	bin_name = "rwd",
	author,
	version,
	after_help = "Want more detail? Try the long '--help' flag!",
	after_long_help = "Didn't expect this much output? Use the short '-h' flag to get short help."
)]
#[cfg_attr(debug_assertions, command(before_help = "⚠ DEBUG BUILD ⚠"))]
pub struct Args {
	/// Set diagnostic log level.
	///
	/// This enables diagnostic logging, which is useful for investigating bugs. Use multiple times
	/// to increase verbosity. Ignored if RUST_LOG is set.
	#[arg(long, short, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	/// Write diagnostic logs to a file.
	///
	/// If the path is a directory, a timestamped log file is created in it.
	#[arg(
		long,
		global = true,
		value_hint = ValueHint::AnyPath,
		value_name = "PATH",
	)]
	pub log_file: Option<PathBuf>,

	/// What to do.
	#[command(subcommand)]
	pub action: Action,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
	/// List entries.
	List(ListArgs),

	/// Display details of the header and trailer.
	Info(InfoArgs),

	/// Extract entries to files.
	Extract(ExtractArgs),

	/// Write entries to stdout.
	Pipe(PipeArgs),

	/// Replace entries with files of the same name, and save the archive.
	Update(UpdateArgs),
}

/// The archive to work on.
#[derive(Debug, Clone, Parser)]
pub struct ArchiveArgs {
	/// Archive file.
	#[arg(
		long,
		short = 'f',
		env = "RWD_FILENAME",
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub file: PathBuf,
}
