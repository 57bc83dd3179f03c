//! Archive entries.

use std::{
	fs::File,
	io::{copy, Error as IoError, ErrorKind as IoErrorKind, Read, Seek, SeekFrom, Write},
	path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use crate::{
	archive::Archive,
	constants::HEADER_LENGTH,
	directory::DirectoryRecord,
	error::{Error, ErrorKind, Result},
};

/// One file inside an archive.
///
/// This is a view on the directory record, bound to the [`Archive`] it was listed from. Reading its
/// content goes through the archive, and takes replacements into account.
#[derive(Clone, Debug)]
pub struct Entry<'archive> {
	archive: &'archive Archive,

	/// Raw name units, as they were on disk.
	name: Vec<i16>,

	/// Decoded filename.
	pub filename: String,

	/// Offset of the content, relative to the end of the header.
	pub offset: i32,

	/// Length of the content in bytes.
	pub length: i32,
}

/// Where an entry's content currently comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContentSource {
	/// A window of the archive file.
	Archive {
		/// Absolute offset of the first byte.
		start: u64,

		/// Length in bytes.
		length: u64,
	},

	/// A replacement file on the filesystem.
	Replacement(PathBuf),
}

impl<'archive> Entry<'archive> {
	pub(crate) fn from_record(archive: &'archive Archive, record: DirectoryRecord) -> Self {
		Self {
			archive,
			filename: record.filename(),
			offset: record.offset(),
			length: record.length(),
			name: record.name,
		}
	}

	pub(crate) fn to_record(&self) -> Result<DirectoryRecord> {
		DirectoryRecord::create(self.name.clone(), self.offset, self.length)
			.map_err(|_| ErrorKind::TooLarge("filename length").into())
	}

	/// Resolve where the content comes from right now.
	///
	/// This is looked up on every call, so a replacement registered after the entry was listed
	/// still applies.
	pub fn source(&self) -> Result<ContentSource> {
		if let Some(path) = self.archive.replacement(&self.filename) {
			return Ok(ContentSource::Replacement(path));
		}

		let (Ok(offset), Ok(length)) = (u64::try_from(self.offset), u64::try_from(self.length))
		else {
			return Err(ErrorKind::InvalidWindow {
				offset: self.offset,
				length: self.length,
			}
			.into());
		};

		Ok(ContentSource::Archive {
			start: HEADER_LENGTH as u64 + offset,
			length,
		})
	}

	/// Copy the content of this entry to a writer.
	///
	/// Returns the number of bytes written.
	#[instrument(level = "debug", skip(self, writer), fields(filename = %self.filename))]
	pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<u64> {
		match self.source()? {
			ContentSource::Replacement(path) => self.write_replacement_to(&path, writer),
			ContentSource::Archive { start, length } => {
				let mut file = self.archive.file();
				file.seek(SeekFrom::Start(start))?;

				let written = copy(&mut file.take(length), writer)?;
				debug!(%start, %length, %written, "copied from archive");
				if written < length {
					return Err(IoError::new(
						IoErrorKind::UnexpectedEof,
						format!(
							"entry {:?} wants {length} bytes at {start}, only {written} available",
							self.filename
						),
					)
					.into());
				}

				Ok(written)
			}
		}
	}

	fn write_replacement_to<W: Write + ?Sized>(&self, path: &Path, writer: &mut W) -> Result<u64> {
		let replacement_error = |source| Error::Replacement {
			filename: self.filename.clone(),
			path: path.to_path_buf(),
			source,
		};

		let mut source = File::open(path).map_err(replacement_error)?;
		let written = copy(&mut source, writer)?;
		debug!(?path, %written, "copied from replacement");
		Ok(written)
	}

	/// Replace this entry's content with a file.
	///
	/// This is the same as calling [`Archive::replace()`] with this entry's filename.
	pub fn replace_with_file(&self, source: impl Into<PathBuf>) {
		self.archive.replace(self.filename.clone(), source);
	}
}
