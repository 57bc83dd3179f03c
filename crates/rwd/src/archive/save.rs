use std::{
	ffi::OsString,
	fs::rename,
	io::{BufWriter, Seek, Write},
	path::{Path, PathBuf},
};

use tempfile::{Builder, NamedTempFile, TempPath};
use tracing::{debug, error, info, instrument, trace};

use crate::{
	constants::HEADER_LENGTH,
	directory::write_directory,
	error::{Error, ErrorKind, Result},
};

use super::Archive;

impl Archive {
	/// Rebuild the archive in place.
	///
	/// The new archive is written to a temporary file next to the original, with every entry's
	/// content (replaced or not) packed after the header and the directory rewritten to match. Only
	/// once that has fully succeeded is the original moved to `<path>.bak` (replacing any previous
	/// backup) and the new file moved to the original path.
	///
	/// If this fails before the renames, the original is untouched. If one of the renames fails,
	/// the error is [`Error::Swap`] and the rebuilt archive is left at its temporary path.
	///
	/// This consumes the archive, as its file is closed before the swap.
	#[instrument(level = "debug", skip(self), fields(path = ?self.path))]
	pub fn save(self) -> Result<()> {
		let temp = self.rebuild_next_to(&self.path)?;

		let Self { file, path, .. } = self;
		drop(file);

		let backup = backup_path(&path);
		debug!(?backup, "move original to backup");
		if let Err(source) = rename(&path, &backup) {
			return Err(abandon(temp, "move the original archive to its backup path", source));
		}

		debug!(temp = ?temp, "move rebuilt archive into place");
		if let Err(err) = temp.persist(&path) {
			return Err(abandon(
				err.path,
				"move the rebuilt archive into place",
				err.error,
			));
		}

		info!(?path, ?backup, "saved rwd archive");
		Ok(())
	}

	/// Rebuild the archive to another path.
	///
	/// This writes to a temporary file next to `target` and then moves it there, replacing
	/// whatever was at `target`. The open archive is not modified and no backup is made.
	#[instrument(level = "debug", skip(self, target), fields(path = ?self.path, target = ?target.as_ref()))]
	pub fn save_as(&self, target: impl AsRef<Path>) -> Result<()> {
		let target = target.as_ref();
		let temp = self.rebuild_next_to(target)?;

		if let Err(err) = temp.persist(target) {
			return Err(abandon(
				err.path,
				"move the rebuilt archive into place",
				err.error,
			));
		}

		info!(?target, "saved rwd archive");
		Ok(())
	}

	/// Rebuild into a temporary file in the same directory as `target`.
	///
	/// The file is closed before returning, and is deleted if the returned path is dropped.
	fn rebuild_next_to(&self, target: &Path) -> Result<TempPath> {
		let dir = match target.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent,
			_ => Path::new("."),
		};

		let mut temp: NamedTempFile = Builder::new().prefix("rwd-").tempfile_in(dir)?;
		debug!(temp = ?temp.path(), "created temporary file");

		{
			let mut writer = BufWriter::new(temp.as_file_mut());
			self.rebuild(&mut writer)?;
			writer.flush()?;
		}
		temp.as_file().sync_all()?;

		Ok(temp.into_temp_path())
	}

	/// Write a complete rebuilt archive.
	#[cfg_attr(feature = "expose-internals", visibility::make(pub))]
	fn rebuild<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
		let header = self.header()?;
		let mut entries = self.list()?;
		let mut trailer = self.trailer()?;

		header.write_to(writer)?;

		for entry in &mut entries {
			let position = writer.stream_position()?;
			let written = entry.write_to(writer)?;

			// only update once the content is actually written
			entry.offset = i32::try_from(position - HEADER_LENGTH as u64)
				.map_err(|_| ErrorKind::TooLarge("entry offset"))?;
			entry.length =
				i32::try_from(written).map_err(|_| ErrorKind::TooLarge("entry length"))?;
			trace!(filename = %entry.filename, offset = %entry.offset, length = %entry.length, "wrote entry");
		}

		let directory_offset = writer.stream_position()?;
		if u64::from(trailer.footer.offset) != directory_offset {
			debug!(
				from = %trailer.footer.offset,
				to = %directory_offset,
				"directory moved, updating footer offset"
			);
			trailer.footer.offset = u32::try_from(directory_offset)
				.map_err(|_| ErrorKind::TooLarge("directory offset"))?;
		}

		let records = entries
			.iter()
			.map(|entry| entry.to_record())
			.collect::<Result<Vec<_>>>()?;
		let count = write_directory(writer, records)?;

		trailer.write_to(writer)?;
		debug!(entries = %count, "rebuilt rwd archive");
		Ok(())
	}
}

/// The backup path for an archive: the same path with `.bak` appended.
pub(crate) fn backup_path(path: &Path) -> PathBuf {
	let mut backup = OsString::from(path.as_os_str());
	backup.push(".bak");
	PathBuf::from(backup)
}

/// Keep a rebuilt archive on disk after a failed swap, and build the error pointing at it.
fn abandon(temp: TempPath, stage: &'static str, source: std::io::Error) -> Error {
	let path = temp.to_path_buf();
	if let Err(err) = temp.keep() {
		error!(?path, %err, "could not keep rebuilt archive");
	}

	error!(?path, %source, "{stage} failed");
	Error::Swap {
		stage,
		temp: path,
		source,
	}
}
