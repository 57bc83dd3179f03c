//! Error types for [`Archive`](crate::Archive) and the format codecs.
use std::{borrow::Cow, path::PathBuf};

use deku::DekuError;
use miette::Diagnostic;
use thiserror::Error;

/// Convenience return type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Combined return error type.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
	/// I/O error.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Format error that's just a message.
	#[error(transparent)]
	Simple(#[from] SimpleError),

	/// A replacement source could not be read.
	///
	/// The source is checked when the entry is streamed, not when it is registered.
	#[error("rwd: replacement for {filename:?} at {path:?} is unreadable")]
	#[diagnostic(help("the replacement file must still exist when the archive is saved"))]
	Replacement {
		/// Entry filename.
		filename: String,

		/// Replacement source path.
		path: PathBuf,

		/// Underlying error, of kind `NotFound` if the file is missing.
		#[source]
		source: std::io::Error,
	},

	/// A rename failed while swapping a rebuilt archive into place.
	///
	/// The rebuilt archive is left at `temp`, and must be recovered by hand.
	#[error("rwd: could not {stage} (rebuilt archive kept at {temp:?})")]
	#[diagnostic(help("the original archive may have been moved to its .bak path"))]
	Swap {
		/// What was being renamed.
		stage: &'static str,

		/// Where the rebuilt archive is.
		temp: PathBuf,

		/// Underlying error.
		#[source]
		source: std::io::Error,
	},
}

impl Error {
	/// The format error kind, if this is a format error.
	pub fn kind(&self) -> Option<ErrorKind> {
		match self {
			Self::Simple(err) => Some(err.kind),
			_ => None,
		}
	}
}

/// Format error.
#[derive(Error, Diagnostic, Debug)]
#[error("rwd: {message}")]
pub struct SimpleError {
	/// Error kind.
	pub kind: ErrorKind,

	/// Error message.
	pub message: Cow<'static, str>,
}

impl SimpleError {
	/// New error with the default message.
	pub fn new(kind: ErrorKind) -> Self {
		Self {
			kind,
			message: kind.default_message(),
		}
	}

	/// New error from deku.
	pub fn from_deku(orig: DekuError) -> Self {
		Self::new(ErrorKind::Parse).with_message(orig.to_string())
	}

	/// Change the error message.
	pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
		self.message = message.into();
		self
	}
}

/// Format error kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// The file does not start with [`RWD_MAGIC`][crate::constants::RWD_MAGIC].
	BadMagic {
		/// The first four bytes of the file.
		actual: [u8; 4],
	},

	/// The file is too short to hold a trailer.
	TooShort {
		/// File length in bytes.
		length: u64,
	},

	/// A directory record describes a content window that can't exist.
	InvalidWindow {
		/// Offset from the directory record.
		offset: i32,
		/// Length from the directory record.
		length: i32,
	},

	/// A value is too large for its field in the rebuilt archive.
	TooLarge(&'static str),

	/// Parse error.
	Parse,
}

impl ErrorKind {
	/// Get the default error message for this error kind.
	pub fn default_message(self) -> Cow<'static, str> {
		match self {
			ErrorKind::BadMagic { actual } => Cow::Owned(format!(
				"unexpected magic bytes: {:02x}{:02x}{:02x}{:02x}",
				actual[0], actual[1], actual[2], actual[3]
			)),
			ErrorKind::TooShort { length } => Cow::Owned(format!(
				"file is {length} bytes, too short to hold a trailer ({} bytes)",
				crate::constants::TRAILER_LENGTH
			)),
			ErrorKind::InvalidWindow { offset, length } => {
				Cow::Owned(format!("invalid content window: offset={offset} length={length}"))
			}
			ErrorKind::TooLarge(what) => Cow::Owned(format!("{what} does not fit in 32 bits")),
			ErrorKind::Parse => Cow::Borrowed("parse error"),
		}
	}
}

impl From<ErrorKind> for SimpleError {
	fn from(ek: ErrorKind) -> Self {
		Self::new(ek)
	}
}

impl From<ErrorKind> for Error {
	fn from(ek: ErrorKind) -> Self {
		Self::Simple(ek.into())
	}
}
