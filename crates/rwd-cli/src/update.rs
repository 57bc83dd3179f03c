use std::path::{Path, PathBuf};

use clap::{Parser, ValueHint};
use tracing::{info, warn};

use rwd::Archive;

use crate::{args::ArchiveArgs, select::Selection};

#[derive(Debug, Clone, Parser)]
pub struct UpdateArgs {
	#[command(flatten)]
	pub archive: ArchiveArgs,

	/// Directory to read replacement files from.
	///
	/// Each selected entry is replaced by the file at the same relative path under this directory,
	/// if there is one.
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

pub(crate) fn update(args: UpdateArgs) -> miette::Result<()> {
	info!(path=?args.archive.file, "open archive");
	let archive = Archive::open(&args.archive.file)?;

	let updated = register_replacements(&archive, &args.dir, &args.selection)?;
	if updated == 0 {
		info!("nothing to update, leaving archive as is");
		return Ok(());
	}

	info!(%updated, "save archive");
	archive.save()?;
	Ok(())
}

/// Register a replacement for every selected entry that has a file under `dir`.
///
/// Returns how many entries were registered.
fn register_replacements(
	archive: &Archive,
	dir: &Path,
	selection: &Selection,
) -> miette::Result<usize> {
	let mut updated = 0_usize;
	for entry in archive.list()? {
		if !selection.matches(&entry.filename) {
			continue;
		}

		let source = dir.join(&entry.filename);
		if !source.is_file() {
			warn!(?source, filename=%entry.filename, "replacement file does not exist, skipping");
			eprintln!("WARNING: File '{}' does not exist.", source.display());
			continue;
		}

		println!("Updating file '{}' in archive.", entry.filename);
		entry.replace_with_file(source);
		updated += 1;
	}

	Ok(updated)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use rwd::ContentSource;
	use tempfile::TempDir;

	use super::*;

	const HEADER_LENGTH: usize = 30;

	/// Smallest well-formed archive holding the given entries, packed.
	fn archive_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
		let mut bytes = b"TGCK".to_vec();
		for value in [1u32, 0, 0] {
			bytes.extend(value.to_le_bytes());
		}
		bytes.extend([0; 14]);

		let mut windows = Vec::new();
		for (_, content) in entries {
			windows.push(((bytes.len() - HEADER_LENGTH) as i32, content.len() as i32));
			bytes.extend(*content);
		}

		let directory_offset = bytes.len();
		bytes.extend((entries.len() as i32).to_le_bytes());
		for ((name, _), (offset, length)) in entries.iter().zip(windows) {
			bytes.extend((name.len() as i16).to_le_bytes());
			for unit in name.encode_utf16() {
				bytes.extend(unit.to_le_bytes());
			}
			for slot in [offset, 0, length, 0, 0, 0] {
				bytes.extend(slot.to_le_bytes());
			}
		}

		let files_length = directory_offset - HEADER_LENGTH;
		let footer_length = bytes.len() - directory_offset + 288;
		for (offset, length) in [
			(0, HEADER_LENGTH),
			(HEADER_LENGTH, files_length),
			(directory_offset, footer_length),
		] {
			bytes.extend([0; 64]);
			for value in [offset, 0, length, 0, 0, 0, length, 0] {
				bytes.extend((value as u32).to_le_bytes());
			}
		}

		bytes
	}

	fn setup(entries: &[(&str, &[u8])]) -> (TempDir, PathBuf) {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("Data.rwd");
		fs::write(&path, archive_bytes(entries)).unwrap();
		(dir, path)
	}

	fn everything() -> Selection {
		Selection {
			patterns: Vec::new(),
		}
	}

	#[test]
	fn only_present_files_are_registered() {
		let (dir, path) = setup(&[("present.txt", b"old"), ("missing.txt", b"old")]);
		let replacements = dir.path().join("new");
		fs::create_dir(&replacements).unwrap();
		fs::write(replacements.join("present.txt"), b"new").unwrap();

		let archive = Archive::open(&path).unwrap();
		let count = register_replacements(&archive, &replacements, &everything()).unwrap();
		assert_eq!(count, 1);

		let entries = archive.list().unwrap();
		assert_eq!(
			entries[0].source().unwrap(),
			ContentSource::Replacement(replacements.join("present.txt"))
		);
		assert!(matches!(
			entries[1].source().unwrap(),
			ContentSource::Archive { .. }
		));
	}

	#[test]
	fn unselected_entries_are_skipped() {
		let (dir, path) = setup(&[("a.ini", b"1"), ("b.txt", b"2")]);
		fs::write(dir.path().join("a.ini"), b"one").unwrap();
		fs::write(dir.path().join("b.txt"), b"two").unwrap();

		let archive = Archive::open(&path).unwrap();
		let selection = Selection {
			patterns: vec![glob::Pattern::new("*.txt").unwrap()],
		};
		assert_eq!(register_replacements(&archive, dir.path(), &selection).unwrap(), 1);
		assert_eq!(archive.replacement("a.ini"), None);
	}

	#[test]
	fn nothing_to_register_does_not_save() {
		let (dir, path) = setup(&[("missing.txt", b"old")]);
		let original = fs::read(&path).unwrap();
		let empty = dir.path().join("empty");
		fs::create_dir(&empty).unwrap();

		update(UpdateArgs {
			archive: ArchiveArgs { file: path.clone() },
			dir: empty,
			selection: everything(),
		})
		.unwrap();

		assert_eq!(fs::read(&path).unwrap(), original);
		assert!(!dir.path().join("Data.rwd.bak").exists());
	}

	#[test]
	fn registered_replacement_is_saved() {
		let (dir, path) = setup(&[("present.txt", b"old")]);
		fs::write(dir.path().join("present.txt"), b"brand new").unwrap();

		update(UpdateArgs {
			archive: ArchiveArgs { file: path.clone() },
			dir: dir.path().to_path_buf(),
			selection: everything(),
		})
		.unwrap();

		assert!(dir.path().join("Data.rwd.bak").exists());
		let archive = Archive::open(&path).unwrap();
		let mut content = Vec::new();
		archive.list().unwrap()[0].write_to(&mut content).unwrap();
		assert_eq!(content, b"brand new");
	}
}
