use std::io::{stdout, Write};

use clap::Parser;
use miette::IntoDiagnostic;
use tracing::info;

use rwd::Archive;

use crate::{args::ArchiveArgs, select::Selection};

#[derive(Debug, Clone, Parser)]
pub struct PipeArgs {
	#[command(flatten)]
	pub archive: ArchiveArgs,

	#[command(flatten)]
	pub selection: Selection,
}

pub(crate) fn pipe(args: PipeArgs) -> miette::Result<()> {
	info!(path=?args.archive.file, "open archive");
	let archive = Archive::open(&args.archive.file)?;

	let mut out = stdout().lock();
	for entry in archive.list()? {
		if !args.selection.matches(&entry.filename) {
			continue;
		}

		writeln!(out, "File: {}", entry.filename).into_diagnostic()?;
		entry.write_to(&mut out)?;
	}

	out.flush().into_diagnostic()
}
