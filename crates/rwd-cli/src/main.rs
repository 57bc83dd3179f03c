#![warn(clippy::unwrap_used)]
#![deny(rust_2018_idioms)]

use clap::Parser;
use miette::IntoDiagnostic;
use tracing::{debug, warn};

use crate::args::Action;

mod args;
mod extract;
mod info;
mod list;
mod logs;
mod pipe;
mod select;
mod update;

fn main() -> miette::Result<()> {
	let logs_on = logs::from_env().into_diagnostic()?;

	debug!("parsing arguments");
	let args = args::Args::parse();

	if logs_on {
		warn!("ignoring logging options from args");
	} else {
		logs::from_args(&args).into_diagnostic()?;
	}

	debug!(?args, "got arguments");

	match args.action {
		Action::List(args) => list::list(args),
		Action::Info(args) => info::info(args),
		Action::Extract(args) => extract::extract(args),
		Action::Pipe(args) => pipe::pipe(args),
		Action::Update(args) => update::update(args),
	}
}
