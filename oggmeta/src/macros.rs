// Shorthand for return Err(OggMetaError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant) -> return Err(OggMetaError::new(ErrorKind::Variant))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::OggMetaError::new(
			crate::error::ErrorKind::$variant,
		))
	};
}

pub(crate) use err;
