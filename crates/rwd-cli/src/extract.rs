use std::{
	fs::{create_dir_all, File},
	path::PathBuf,
};

use clap::{Parser, ValueHint};
use miette::IntoDiagnostic;
use tracing::{debug, info};

use rwd::Archive;

use crate::{args::ArchiveArgs, select::Selection};

#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
	#[command(flatten)]
	pub archive: ArchiveArgs,

	/// Directory to extract into.
	///
	/// Directories named in entry filenames are created under it as needed.
	#[arg(
		long,
		short = 'd',
		default_value = ".",
		value_hint = ValueHint::DirPath,
		value_name = "DIR",
	)]
	pub dir: PathBuf,

	#[command(flatten)]
	pub selection: Selection,
}

pub(crate) fn extract(args: ExtractArgs) -> miette::Result<()> {
	info!(path=?args.archive.file, "open archive");
	let archive = Archive::open(&args.archive.file)?;

	for entry in archive.list()? {
		if !args.selection.matches(&entry.filename) {
			continue;
		}

		let path = args.dir.join(&entry.filename);
		if let Some(parent) = path.parent() {
			debug!(?parent, "create parent directories");
			create_dir_all(parent).into_diagnostic()?;
		}

		info!(?path, filename=%entry.filename, "extract entry");
		let mut file = File::create(&path).into_diagnostic()?;
		entry.write_to(&mut file)?;
	}

	Ok(())
}
