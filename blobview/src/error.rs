use std::error::Error;
use std::fmt;
use std::string::FromUtf8Error;

/// Alias for `Result<T, ViewError>`
pub type Result<T> = std::result::Result<T, ViewError>;

/// Errors that can occur while performing `BlobView` operations
#[derive(Debug)]
pub enum ViewError {
	/// The view contains too little resident data for the requested read
	NotEnoughData,
	/// The read bytes were not valid UTF-8
	Utf8(FromUtf8Error),
	/// Any std::io::Error raised by the backing source
	Io(std::io::Error),
}

impl fmt::Display for ViewError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ViewError::NotEnoughData => {
				write!(f, "Too little data is resident for the expected read")
			},
			ViewError::Utf8(err) => write!(f, "{}", err),
			ViewError::Io(err) => write!(f, "{}", err),
		}
	}
}

impl Error for ViewError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match *self {
			ViewError::Utf8(ref e) => Some(e),
			ViewError::Io(ref e) => Some(e),
			_ => None,
		}
	}
}

impl From<std::io::Error> for ViewError {
	fn from(err: std::io::Error) -> ViewError {
		ViewError::Io(err)
	}
}

impl From<FromUtf8Error> for ViewError {
	fn from(err: FromUtf8Error) -> ViewError {
		ViewError::Utf8(err)
	}
}
