use crate::error::Result;
use crate::macros::err;
use crate::ogg::constants::CAPTURE_PATTERN;

use blobview::BlobView;

// An OGG page header, reduced to the part this decoder needs
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct PageHeader {
	// Ordered byte lengths of the page's segments
	pub(crate) segment_table: Vec<u8>,
}

impl PageHeader {
	pub(crate) fn read<S>(view: &mut BlobView<S>) -> Result<Self> {
		let capture_pattern = view.read_ascii(4)?;
		if capture_pattern != CAPTURE_PATTERN {
			err!(MalformedPageHeader);
		}

		// Stream structure version, header type flag, granule position,
		// serial number, page sequence number, checksum
		view.skip(22)?;

		let segments = view.read_u8()?;
		let segment_table = view.read_bytes(usize::from(segments))?;

		Ok(Self { segment_table })
	}
}
