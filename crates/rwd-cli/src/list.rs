use clap::Parser;
use tracing::info;

use rwd::Archive;

use crate::{args::ArchiveArgs, select::Selection};

#[derive(Debug, Clone, Parser)]
pub struct ListArgs {
	#[command(flatten)]
	pub archive: ArchiveArgs,

	#[command(flatten)]
	pub selection: Selection,
}

pub(crate) fn list(args: ListArgs) -> miette::Result<()> {
	info!(path=?args.archive.file, "open archive");
	let archive = Archive::open(&args.archive.file)?;

	info!("list entries");
	for (n, entry) in archive.list()?.iter().enumerate() {
		if !args.selection.matches(&entry.filename) {
			continue;
		}

		println!(
			"{:3}. {} (o={}, l={})",
			n + 1,
			entry.filename,
			entry.offset,
			entry.length
		);
	}

	Ok(())
}
