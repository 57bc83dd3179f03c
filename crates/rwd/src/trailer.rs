//! RWD Trailer structure
//!
//! The trailer is the last [`TRAILER_LENGTH`] bytes of an archive: three [`Section`]s in a fixed
//! order. Only the footer section's offset is used, to find the [directory][crate::directory].
//! Everything else is copied through unchanged when an archive is rebuilt.

use std::io::{Read, Seek, Write};

use deku::prelude::*;

use crate::{
	constants::TRAILER_LENGTH,
	error::{Result, SimpleError},
	strings::decode_zero_terminated,
};

/// One of the three sections described by the trailer.
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
pub struct Section {
	/// Zero-terminated name.
	pub name: [u16; 32],

	/// Offset in bytes from the start of the file to where this section begins.
	pub offset: u32,

	/// Unknown.
	pub unknown1: u32,

	/// Length in bytes of this section.
	pub length: u32,

	/// Unknown.
	pub unknown3: u32,

	/// Unknown.
	pub unknown4: u32,

	/// Unknown.
	pub unknown5: u32,

	/// Appears to duplicate [`length`](Self::length).
	pub alternate_length: u32,

	/// Unknown.
	pub unknown7: u32,
}

impl Section {
	/// The decoded name, up to the first zero unit.
	pub fn name(&self) -> String {
		decode_zero_terminated(&self.name)
	}
}

/// RWD Trailer
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "little")]
pub struct Trailer {
	/// Header section.
	pub header: Section,

	/// Files section.
	pub files: Section,

	/// Footer section.
	///
	/// Its offset is the absolute position of the directory.
	pub footer: Section,
}

impl Trailer {
	/// Decode a trailer from the current position of a reader.
	pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Self> {
		let (_, trailer) = Self::from_reader((reader, 0)).map_err(SimpleError::from_deku)?;
		Ok(trailer)
	}

	/// Encode the trailer to a writer.
	pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
		let bytes = self.to_bytes().map_err(SimpleError::from_deku)?;
		debug_assert_eq!(bytes.len(), TRAILER_LENGTH);
		writer.write_all(&bytes)?;
		Ok(())
	}

	/// Absolute offset of the directory from the start of the file.
	pub fn directory_offset(&self) -> u64 {
		u64::from(self.footer.offset)
	}

	/// The sections in file order, with their role names.
	pub fn sections(&self) -> [(&'static str, &Section); 3] {
		[
			("Header", &self.header),
			("Files", &self.files),
			("Footer", &self.footer),
		]
	}
}
