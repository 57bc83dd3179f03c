//! Fixed values of the RWD layout.

/// Magic bytes
pub const RWD_MAGIC: [u8; 4] = [0x54, 0x47, 0x43, 0x4B];

/// Length in bytes of the [`Header`][crate::header::Header] on disk.
///
/// Entry offsets in the directory are relative to the end of the header.
pub const HEADER_LENGTH: usize = 30;

/// Length in bytes of one [`Section`][crate::trailer::Section] on disk.
pub const SECTION_LENGTH: usize = 96;

/// Length in bytes of the [`Trailer`][crate::trailer::Trailer] on disk.
pub const TRAILER_LENGTH: usize = SECTION_LENGTH * 3;

/// Number of 32-bit slots after the name in a directory record.
pub const RECORD_SLOTS: usize = 6;
