//! Contains the errors that can arise while extracting comments
//!
//! The primary error is [`OggMetaError`]. The type of error is determined
//! by [`ErrorKind`], which can be extended at any time.

use std::fmt::{Debug, Display, Formatter};

use blobview::ViewError;

/// Alias for `Result<T, OggMetaError>`
pub type Result<T> = std::result::Result<T, OggMetaError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Page/codec framing errors, always fatal to the parse
	/// A page did not begin with the `OggS` capture pattern
	MalformedPageHeader,
	/// The identification header was not the only packet of the first page
	UnexpectedPacketCount,
	/// The comment packet did not begin with a known codec signature
	MalformedCommentPacket,

	// Per-entry errors, isolated by the comment loop
	/// A comment entry is missing its `=` delimiter
	MissingDelimiter,

	// Conversions for external errors
	/// Errors that arise while reading the byte window
	Window(ViewError),
	/// Represents all cases of [`std::io::Error`]
	Io(std::io::Error),
}

/// Errors that could occur while extracting comments
pub struct OggMetaError {
	kind: ErrorKind,
}

impl OggMetaError {
	/// Create an `OggMetaError` from an [`ErrorKind`]
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for OggMetaError {}

impl Debug for OggMetaError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl Display for OggMetaError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::Window(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),

			ErrorKind::MalformedPageHeader => {
				write!(f, "OGG: Page is missing its capture pattern")
			},
			ErrorKind::UnexpectedPacketCount => write!(
				f,
				"OGG: Expected the identification header as the only packet of the first page"
			),
			ErrorKind::MalformedCommentPacket => write!(f, "OGG: Malformed comment packet"),
			ErrorKind::MissingDelimiter => {
				write!(f, "OGG: Comment entry is missing its `=` delimiter")
			},
		}
	}
}

impl From<ViewError> for OggMetaError {
	fn from(input: ViewError) -> Self {
		Self {
			kind: ErrorKind::Window(input),
		}
	}
}

impl From<std::io::Error> for OggMetaError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}
