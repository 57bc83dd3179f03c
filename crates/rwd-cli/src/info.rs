use clap::Parser;
use tracing::info;

use rwd::{trailer::Section, Archive};

use crate::args::ArchiveArgs;

#[derive(Debug, Clone, Parser)]
pub struct InfoArgs {
	#[command(flatten)]
	pub archive: ArchiveArgs,
}

pub(crate) fn info(args: InfoArgs) -> miette::Result<()> {
	info!(path=?args.archive.file, "open archive");
	let archive = Archive::open(&args.archive.file)?;

	let header = archive.header()?;
	println!("*** HEADER ***");
	println!(
		"Magic Bytes: {} ({})",
		header
			.magic
			.iter()
			.map(|b| format!("{b:02x}"))
			.collect::<String>(),
		header.magic.iter().copied().map(char::from).collect::<String>()
	);
	for (n, value) in header.values.iter().enumerate() {
		println!("Value {n}:     {value:08x} ({value})");
	}
	println!(
		"Name Length: {l:04x} ({l})",
		l = header.name_length
	);
	println!("Name:        {}", header.name());
	println!("Unknown      {u:08x} ({u})", u = header.unknown);
	println!();

	let trailer = archive.trailer()?;
	println!("*** TRAILER ***");
	for (role, section) in trailer.sections() {
		print_section(role, section);
	}

	Ok(())
}

fn print_section(role: &str, section: &Section) {
	println!("--> Section    {role}");
	println!("    Name:      {}", section.name());
	for (label, value) in [
		("Offset:   ", section.offset),
		("Unknown1: ", section.unknown1),
		("Length:   ", section.length),
		("Unknown3: ", section.unknown3),
		("Unknown4: ", section.unknown4),
		("Unknown5: ", section.unknown5),
		("Alt. Len.:", section.alternate_length),
		("Unknown7: ", section.unknown7),
	] {
		println!("    {label} {value:08x} ({value})");
	}
}
