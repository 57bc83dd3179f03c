//! RWD Header structure
//!
//! The header is the first [`HEADER_LENGTH`] bytes of an archive. It starts with the
//! [magic][RWD_MAGIC], and entry content offsets are counted from its end. Apart from the magic
//! and the name, none of its fields are understood: they are decoded so they can be shown and
//! written back out verbatim.

use std::io::{Read, Seek, Write};

use deku::prelude::*;

use crate::{
	constants::{HEADER_LENGTH, RWD_MAGIC},
	error::{Result, SimpleError},
	strings::decode_counted,
};

/// RWD Header
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "little")]
pub struct Header {
	/// Magic number. Should match [`RWD_MAGIC`].
	///
	/// This is not asserted here; [`Archive::open()`][crate::Archive::open] does the check.
	pub magic: [u8; 4],

	/// Three values of unknown meaning.
	pub values: [u32; 3],

	/// Number of meaningful code units in [`name`](Self::name).
	pub name_length: u16,

	/// Fixed-width name field, padded.
	pub name: [u16; 4],

	/// Trailing value of unknown meaning.
	pub unknown: u32,
}

impl Header {
	/// Decode a header from the current position of a reader.
	pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Self> {
		let (_, header) = Self::from_reader((reader, 0)).map_err(SimpleError::from_deku)?;
		Ok(header)
	}

	/// Encode the header to a writer.
	pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
		let bytes = self.to_bytes().map_err(SimpleError::from_deku)?;
		debug_assert_eq!(bytes.len(), HEADER_LENGTH);
		writer.write_all(&bytes)?;
		Ok(())
	}

	/// Whether the magic matches [`RWD_MAGIC`].
	pub fn has_valid_magic(&self) -> bool {
		self.magic == RWD_MAGIC
	}

	/// The decoded name.
	///
	/// Only the first [`name_length`](Self::name_length) units are used.
	pub fn name(&self) -> String {
		decode_counted(&self.name, usize::from(self.name_length))
	}
}
