//! RWD: reader and rewriter for RWD game archives.
//!
//! An RWD archive is a [header][header], the content of every entry packed one after the other,
//! a [directory][directory] of entry names and content windows, and a [trailer][trailer] that
//! says where the directory is. All integers are little-endian.
//!
//! Open an [`Archive`], [`list()`](Archive::list) its entries and
//! [stream](Entry::write_to) their content, or register replacements and
//! [save](Archive::save) a rebuilt archive.
//!
//! The layout is reverse-engineered, so fields of unknown meaning are decoded only so that they
//! can be shown and written back unchanged.

#![warn(clippy::unwrap_used, missing_docs)]
#![deny(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[doc(inline)]
pub use self::archive::Archive;
#[doc(inline)]
pub use self::entry::{ContentSource, Entry};
#[doc(inline)]
pub use self::error::{Error, ErrorKind, Result};

mod archive;
pub mod constants;
pub mod directory;
mod entry;
pub mod error;
pub mod header;
pub mod strings;
pub mod trailer;
