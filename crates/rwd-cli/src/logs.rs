use std::{
	env::var,
	fs::File,
	io::{Error, Result},
	path::{Path, PathBuf},
	sync::Mutex,
};

use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::args::Args;

/// Initialise logging from `RUST_LOG`, if it's set.
///
/// Returns whether logging was initialised.
pub fn from_env() -> Result<bool> {
	if var("RUST_LOG").is_err() {
		return Ok(false);
	}

	tracing_subscriber::fmt::try_init().map_err(Error::other)?;
	Ok(true)
}

/// Initialise logging from the `-v` and `--log-file` options.
pub fn from_args(args: &Args) -> Result<()> {
	let Some(level) = level(args.verbose) else {
		return Ok(());
	};

	let log_file = args
		.log_file
		.as_deref()
		.map(|path| File::create(log_file_path(path)))
		.transpose()?;

	let mut builder = tracing_subscriber::fmt().with_env_filter(level);
	if args.verbose > 2 {
		builder = builder.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);
	}

	let init = if let Some(writer) = log_file {
		builder.json().with_writer(Mutex::new(writer)).try_init()
	} else if args.verbose > 3 {
		builder.pretty().try_init()
	} else {
		builder.try_init()
	};

	match init {
		Ok(()) => info!(%level, "logging initialised"),
		Err(e) => eprintln!("Failed to initialise logging, continuing with none\n{e}"),
	}

	Ok(())
}

fn level(verbosity: u8) -> Option<&'static str> {
	match verbosity {
		0 => None,
		1 => Some("warn"),
		2 => Some("info"),
		3 => Some("debug"),
		_ => Some("trace"),
	}
}

/// A directory gets a timestamped log file created inside it.
fn log_file_path(path: &Path) -> PathBuf {
	if path.is_dir() {
		path.join(format!(
			"rwd.{}.log",
			chrono::Utc::now().format("%Y-%m-%dT%H-%M-%SZ")
		))
	} else {
		path.to_owned()
	}
}
