//! RWD Directory records.
//!
//! The directory sits at the absolute offset given by the trailer's footer section. It is a
//! signed 32-bit count followed by that many [`DirectoryRecord`]s, in file order.

use std::{
	io::{Read, Seek, SeekFrom, Write},
	num::TryFromIntError,
};

use deku::prelude::*;
use tracing::{debug, instrument, trace};

use crate::{
	constants::RECORD_SLOTS,
	error::{ErrorKind, Result, SimpleError},
	strings::decode_signed,
};

/// RWD Directory
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "little")]
pub struct Directory {
	/// Number of records.
	#[deku(assert = "*count >= 0")]
	pub count: i32,

	/// Records, in file order.
	#[deku(count = "count")]
	pub records: Vec<DirectoryRecord>,
}

impl Directory {
	/// Build a directory from its records.
	///
	/// Returns `Err` if there are too many records for the count.
	pub fn create(records: Vec<DirectoryRecord>) -> Result<Self, TryFromIntError> {
		i32::try_from(records.len()).map(|count| Self { count, records })
	}

	/// Decode a directory from the current position of a reader.
	pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Self> {
		let (_, directory) = Self::from_reader((reader, 0)).map_err(SimpleError::from_deku)?;
		Ok(directory)
	}

	/// Encode the directory to a writer.
	pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
		let bytes = self.to_bytes().map_err(SimpleError::from_deku)?;
		writer.write_all(&bytes)?;
		Ok(())
	}
}

/// One directory record.
///
/// Of the six slots after the name, only the first (offset) and the third (length) have a known
/// meaning. The others are ignored when reading and written as zero.
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(
	endian = "endian",
	ctx = "endian: deku::ctx::Endian",
	ctx_default = "deku::ctx::Endian::Little"
)]
pub struct DirectoryRecord {
	/// Number of code units in the name.
	#[deku(assert = "*name_length >= 0")]
	pub name_length: i16,

	/// Name, as raw code units.
	#[deku(count = "name_length")]
	pub name: Vec<i16>,

	/// Offset, reserved, length, reserved, reserved, reserved.
	pub slots: [i32; RECORD_SLOTS],
}

impl DirectoryRecord {
	/// Build a record from raw name units and a content window.
	///
	/// Returns `Err` if the name is too long for the length prefix.
	pub fn create(name: Vec<i16>, offset: i32, length: i32) -> Result<Self, TryFromIntError> {
		i16::try_from(name.len()).map(|name_length| Self {
			name_length,
			name,
			slots: [offset, 0, length, 0, 0, 0],
		})
	}

	/// Decode a record from the current position of a reader.
	pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Self> {
		let (_, record) = Self::from_reader((reader, 0)).map_err(SimpleError::from_deku)?;
		Ok(record)
	}

	/// Encode the record to a writer.
	pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
		let bytes = self.to_bytes().map_err(SimpleError::from_deku)?;
		writer.write_all(&bytes)?;
		Ok(())
	}

	/// The decoded filename.
	pub fn filename(&self) -> String {
		decode_signed(&self.name)
	}

	/// Content offset, relative to the end of the header.
	pub fn offset(&self) -> i32 {
		self.slots[0]
	}

	/// Content length in bytes.
	pub fn length(&self) -> i32 {
		self.slots[2]
	}
}

/// Read the whole directory, starting at the given absolute offset.
#[cfg_attr(feature = "expose-internals", visibility::make(pub))]
#[instrument(level = "debug", skip(reader))]
pub(crate) fn read_directory<R: Read + Seek>(
	reader: &mut R,
	offset: u64,
) -> Result<Vec<DirectoryRecord>> {
	reader.seek(SeekFrom::Start(offset))?;
	let directory = Directory::read_from(reader)?;
	debug!(count = %directory.count, "read directory");
	for (n, record) in directory.records.iter().enumerate() {
		trace!(%n, ?record, "read directory record");
	}

	Ok(directory.records)
}

/// Write the directory count and records.
///
/// Returns the number of records written.
#[instrument(level = "debug", skip(writer, records), fields(count = records.len()))]
pub(crate) fn write_directory<W: Write>(
	writer: &mut W,
	records: Vec<DirectoryRecord>,
) -> Result<usize> {
	let directory = Directory::create(records)
		.map_err(|_| SimpleError::new(ErrorKind::TooLarge("entry count")))?;
	directory.write_to(writer)?;
	Ok(directory.records.len())
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use super::*;
	use crate::strings::encode_signed;

	#[test]
	fn decode_record() {
		#[rustfmt::skip]
		let bytes = [
			0x02, 0x00, // name length
			0x41, 0x00, 0x42, 0x00, // name
			0x10, 0x00, 0x00, 0x00, // offset
			0x01, 0x00, 0x00, 0x00, // reserved
			0x20, 0x00, 0x00, 0x00, // length
			0x02, 0x00, 0x00, 0x00, // reserved
			0x03, 0x00, 0x00, 0x00, // reserved
			0x04, 0x00, 0x00, 0x00, // reserved
		];
		let record = DirectoryRecord::read_from(&mut Cursor::new(&bytes[..])).unwrap();
		assert_eq!(record.filename(), "AB");
		assert_eq!(record.offset(), 0x10);
		assert_eq!(record.length(), 0x20);
	}

	#[test]
	fn create_zeroes_reserved_slots() {
		let record = DirectoryRecord::create(encode_signed("a.ini"), 5, 9).unwrap();
		assert_eq!(record.name_length, 5);
		assert_eq!(record.slots, [5, 0, 9, 0, 0, 0]);

		let bytes = record.to_bytes().unwrap();
		assert_eq!(bytes.len(), 2 + 5 * 2 + RECORD_SLOTS * 4);
	}

	#[test]
	fn negative_name_length_is_an_error() {
		let bytes = [0xFF, 0xFF, 0, 0, 0, 0];
		assert!(DirectoryRecord::read_from(&mut Cursor::new(&bytes[..])).is_err());
	}

	#[test]
	fn directory_roundtrip() {
		let records = vec![
			DirectoryRecord::create(encode_signed("one"), 0, 3).unwrap(),
			DirectoryRecord::create(encode_signed("two/three"), 3, 10).unwrap(),
		];

		let mut bytes = vec![0xAA; 7];
		assert_eq!(write_directory(&mut bytes, records.clone()).unwrap(), 2);

		let decoded = read_directory(&mut Cursor::new(&bytes), 7).unwrap();
		assert_eq!(decoded, records);
	}

	#[test]
	fn truncated_directory_is_an_error() {
		let mut bytes = Vec::new();
		write_directory(
			&mut bytes,
			vec![DirectoryRecord::create(encode_signed("one"), 0, 3).unwrap()],
		)
		.unwrap();
		bytes.truncate(bytes.len() - 4);

		assert!(read_directory(&mut Cursor::new(&bytes), 0).is_err());
	}

	#[test]
	fn negative_count_is_an_error() {
		let bytes = (-1i32).to_le_bytes();
		assert!(read_directory(&mut Cursor::new(&bytes[..]), 0).is_err());
	}

	#[test]
	fn count_prefix_matches_records() {
		let directory = Directory::create(vec![
			DirectoryRecord::create(encode_signed("a"), 0, 1).unwrap(),
			DirectoryRecord::create(encode_signed("b"), 1, 1).unwrap(),
			DirectoryRecord::create(encode_signed("c"), 2, 1).unwrap(),
		])
		.unwrap();
		assert_eq!(directory.count, 3);

		let mut bytes = Vec::new();
		directory.write_to(&mut bytes).unwrap();
		assert_eq!(bytes[..4], 3i32.to_le_bytes());
		assert_eq!(Directory::read_from(&mut Cursor::new(&bytes)).unwrap(), directory);
	}
}
