//! The archive handle.

use std::{
	cell::RefCell,
	collections::HashMap,
	fs::File,
	io::{Read, Seek, SeekFrom},
	path::{Path, PathBuf},
};

use tracing::{debug, instrument, trace};

use crate::{
	constants::{RWD_MAGIC, TRAILER_LENGTH},
	directory::read_directory,
	entry::Entry,
	error::{ErrorKind, Result},
	header::Header,
	trailer::Trailer,
};

mod save;

/// An open RWD archive.
///
/// Nothing read from the file is cached: [`header()`](Self::header),
/// [`trailer()`](Self::trailer) and [`list()`](Self::list) decode from disk on every call, so
/// changes made to the file between calls are visible.
///
/// The only state kept is the set of pending replacements, which is applied when the archive is
/// [saved](Self::save). Until then the file on disk is never written to.
#[derive(Debug)]
pub struct Archive {
	file: File,
	path: PathBuf,

	/// Entry filename to replacement source path.
	replacements: RefCell<HashMap<String, PathBuf>>,
}

impl Archive {
	/// Open an archive and check its magic.
	#[instrument(level = "debug", skip(path), fields(path = ?path.as_ref()))]
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref().to_path_buf();
		let mut file = File::open(&path)?;

		file.seek(SeekFrom::Start(0))?;
		let mut magic = [0; 4];
		file.read_exact(&mut magic)?;
		trace!(?magic, "read magic");
		if magic != RWD_MAGIC {
			return Err(ErrorKind::BadMagic { actual: magic }.into());
		}

		debug!("opened rwd archive");
		Ok(Self {
			file,
			path,
			replacements: RefCell::default(),
		})
	}

	/// Path this archive was opened from.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Close the archive.
	///
	/// Pending replacements that were not saved are discarded.
	pub fn close(self) {
		debug!(path = ?self.path, "close rwd archive");
	}

	/// Read the header.
	#[instrument(level = "debug", skip(self))]
	pub fn header(&self) -> Result<Header> {
		let mut file = &self.file;
		file.seek(SeekFrom::Start(0))?;
		let header = Header::read_from(&mut file)?;
		debug!(?header, "read rwd header");
		Ok(header)
	}

	/// Read the trailer.
	#[instrument(level = "debug", skip(self))]
	pub fn trailer(&self) -> Result<Trailer> {
		let mut file = &self.file;
		let length = file.seek(SeekFrom::End(0))?;
		if length < TRAILER_LENGTH as u64 {
			return Err(ErrorKind::TooShort { length }.into());
		}

		file.seek(SeekFrom::End(-(TRAILER_LENGTH as i64)))?;
		let trailer = Trailer::read_from(&mut file)?;
		debug!(?trailer, "read rwd trailer");
		Ok(trailer)
	}

	/// List the entries, in directory order.
	///
	/// The position of an entry in this list is its stable index.
	#[instrument(level = "debug", skip(self))]
	pub fn list(&self) -> Result<Vec<Entry<'_>>> {
		let trailer = self.trailer()?;
		let mut file = &self.file;
		let records = read_directory(&mut file, trailer.directory_offset())?;
		Ok(records
			.into_iter()
			.map(|record| Entry::from_record(self, record))
			.collect())
	}

	/// Register a replacement for an entry.
	///
	/// From now on, that entry's content comes from the file at `source`, both when it's read and
	/// when the archive is saved. Registering again for the same filename overwrites the previous
	/// registration. The source isn't checked until it is read.
	pub fn replace(&self, filename: impl Into<String>, source: impl Into<PathBuf>) {
		let filename = filename.into();
		let source = source.into();
		debug!(%filename, ?source, "register replacement");

		if let Some(previous) = self.replacements.borrow_mut().insert(filename, source) {
			debug!(?previous, "overwrote previous replacement");
		}
	}

	/// The registered replacement for an entry, if any.
	pub fn replacement(&self, filename: &str) -> Option<PathBuf> {
		self.replacements.borrow().get(filename).cloned()
	}

	pub(crate) fn file(&self) -> &File {
		&self.file
	}
}
