#![allow(dead_code)]

use std::{
	fs,
	path::{Path, PathBuf},
};

use tempfile::TempDir;

pub const HEADER_LENGTH: usize = 30;

/// Build an archive from scratch.
///
/// `gap` bytes of junk are put before each entry's content, so offsets aren't packed.
pub fn build_archive(entries: &[(&str, &[u8])], gap: usize) -> Vec<u8> {
	let mut bytes = Vec::new();

	// header
	bytes.extend([0x54, 0x47, 0x43, 0x4B]);
	for value in [1u32, 0x20, 0xCAFE] {
		bytes.extend(value.to_le_bytes());
	}
	bytes.extend(2u16.to_le_bytes());
	for unit in [0x44u16, 0x41, 0x00, 0x00] {
		bytes.extend(unit.to_le_bytes());
	}
	bytes.extend(0x0102_0304u32.to_le_bytes());
	assert_eq!(bytes.len(), HEADER_LENGTH);

	// content
	let mut windows = Vec::new();
	for (_, content) in entries {
		bytes.extend(std::iter::repeat(0xEE).take(gap));
		windows.push(((bytes.len() - HEADER_LENGTH) as i32, content.len() as i32));
		bytes.extend(*content);
	}
	let files_length = bytes.len() - HEADER_LENGTH;

	// directory
	let directory_offset = bytes.len();
	bytes.extend((entries.len() as i32).to_le_bytes());
	for ((name, _), (offset, length)) in entries.iter().zip(windows) {
		let units: Vec<u16> = name.encode_utf16().collect();
		bytes.extend((units.len() as i16).to_le_bytes());
		for unit in units {
			bytes.extend(unit.to_le_bytes());
		}
		for slot in [offset, 0, length, 0, 0, 0] {
			bytes.extend(slot.to_le_bytes());
		}
	}
	let footer_length = bytes.len() - directory_offset + 288;

	// trailer
	bytes.extend(section("HEADER", 0, HEADER_LENGTH as u32));
	bytes.extend(section("FILES", HEADER_LENGTH as u32, files_length as u32));
	bytes.extend(section("FOOTER", directory_offset as u32, footer_length as u32));

	bytes
}

fn section(name: &str, offset: u32, length: u32) -> Vec<u8> {
	let mut bytes = Vec::new();
	let mut units = [0u16; 32];
	for (slot, unit) in units.iter_mut().zip(name.encode_utf16()) {
		*slot = unit;
	}
	for unit in units {
		bytes.extend(unit.to_le_bytes());
	}
	for value in [offset, 0x11, length, 0x33, 0x44, 0x55, length, 0x77] {
		bytes.extend(value.to_le_bytes());
	}
	bytes
}

/// Directory with an archive written in it.
pub struct Fixture {
	pub dir: TempDir,
	pub path: PathBuf,
}

impl Fixture {
	pub fn new(bytes: &[u8]) -> Self {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("Data.rwd");
		fs::write(&path, bytes).unwrap();
		Self { dir, path }
	}

	pub fn sample() -> Self {
		Self::new(&build_archive(SAMPLE, 0))
	}

	pub fn file(&self, name: &str, content: &[u8]) -> PathBuf {
		let path = self.dir.path().join(name);
		fs::write(&path, content).unwrap();
		path
	}

	pub fn backup(&self) -> PathBuf {
		let mut backup = self.path.clone().into_os_string();
		backup.push(".bak");
		backup.into()
	}

	/// Names of everything in the fixture directory, sorted.
	pub fn listing(&self) -> Vec<String> {
		listing(self.dir.path())
	}
}

pub fn listing(dir: &Path) -> Vec<String> {
	let mut names: Vec<String> = fs::read_dir(dir)
		.unwrap()
		.map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
		.collect();
	names.sort();
	names
}

pub const SAMPLE: &[(&str, &[u8])] = &[
	("Config/game.ini", b"[video]\nwidth=1024\n"),
	("foo.txt", b"hello"),
	("empty.dat", b""),
	("Textures/tree.tga", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0xFF]),
];
