use crate::error::Result;
use crate::macros::err;
use crate::metadata::{FieldKey, FieldValue, Metadata, TagFormat};
use crate::ogg::constants::{
	OPUS_LEAD_BYTE, OPUS_SIGNATURE, VORBIS_COMMENT_PACKET_TYPE, VORBIS_SIGNATURE,
};
use crate::ogg::page::PageHeader;

use std::collections::HashSet;

use blobview::{BlobSource, BlobView};
use byteorder::LittleEndian;

// The outcome of decoding a single comment entry
#[derive(Debug)]
enum CommentRead {
	// A whitelisted field and its (possibly coerced) value
	Entry { key: FieldKey, value: FieldValue },
	// An entry the decoder does not store
	Skipped,
	// Not enough resident bytes for the next length prefix or payload
	Truncated,
}

/// Extract the comment header of an OGG Vorbis or OGG Opus stream into
/// `metadata`
///
/// The record is enriched in place: fields found in the stream overwrite
/// pre-populated values, repeated fields are joined with `" / "`, and
/// fields outside the stored set are ignored. The identification page is
/// skipped without being interpreted; the parse suspends once, while the
/// comment packet is made resident.
///
/// A comment block continuing past the resident window is not an error;
/// enumeration stops and the fields decoded so far are kept.
///
/// # Errors
///
/// * [`MalformedPageHeader`](crate::error::ErrorKind::MalformedPageHeader)
///   if a page does not start with the capture pattern
/// * [`UnexpectedPacketCount`](crate::error::ErrorKind::UnexpectedPacketCount)
///   if the identification header is not the first page's only packet
/// * [`MalformedCommentPacket`](crate::error::ErrorKind::MalformedCommentPacket)
///   if the comment packet carries no known codec signature
/// * [`Window`](crate::error::ErrorKind::Window) if the window fails,
///   including I/O errors from the extension request
///
/// # Examples
///
/// ```rust,no_run
/// use blobview::{BlobView, MemoryBlob};
/// use oggmeta::metadata::Metadata;
/// use oggmeta::ogg::read_from;
///
/// # async fn example() -> oggmeta::error::Result<()> {
/// let source = MemoryBlob::new(std::fs::read("holy_land_04.ogg")?);
/// let mut view = BlobView::open(source, 8 * 1024).await?;
///
/// let mut metadata = Metadata::new();
/// read_from(&mut view, &mut metadata).await?;
///
/// println!("{:?} - {:?}", metadata.artist(), metadata.title());
/// # Ok(()) }
/// ```
pub async fn read_from<S>(view: &mut BlobView<S>, metadata: &mut Metadata) -> Result<()>
where
	S: BlobSource,
{
	skip_identification(view)?;
	read_comment_header(view, metadata).await
}

fn skip_identification<S>(view: &mut BlobView<S>) -> Result<()> {
	let header = PageHeader::read(view)?;

	if header.segment_table.len() != 1 {
		err!(UnexpectedPacketCount);
	}

	// Skip over the identification header without interpreting it
	view.skip(u64::from(header.segment_table[0]))?;

	Ok(())
}

async fn read_comment_header<S>(view: &mut BlobView<S>, metadata: &mut Metadata) -> Result<()>
where
	S: BlobSource,
{
	let header = PageHeader::read(view)?;

	// The comment packet spans the page's entire payload
	let comment_length = header
		.segment_table
		.iter()
		.map(|&b| usize::from(b))
		.sum::<usize>();

	// The only suspension point in the parse
	view.ensure_resident(view.position(), comment_length).await?;

	// Look for a comment header from a supported codec
	let first_byte = view.read_u8()?;
	let valid = match first_byte {
		VORBIS_COMMENT_PACKET_TYPE => {
			let valid = view.read_ascii(6)? == VORBIS_SIGNATURE;
			metadata.set_tag_format(TagFormat::Vorbis);
			valid
		},
		OPUS_LEAD_BYTE => {
			let valid = view.read_ascii(7)? == OPUS_SIGNATURE;
			metadata.set_tag_format(TagFormat::Opus);
			valid
		},
		_ => false,
	};

	if !valid {
		err!(MalformedCommentPacket);
	}

	read_all_comments(view, metadata)
}

fn read_all_comments<S>(view: &mut BlobView<S>, metadata: &mut Metadata) -> Result<()> {
	let vendor_length = view.read_u32::<LittleEndian>()?;
	// The encoder vendor string is of no use here
	view.skip(u64::from(vendor_length))?;

	let comment_count = view.read_u32::<LittleEndian>()?;

	// The record may arrive pre-filled (e.g. a title derived from the
	// filename). Fields read from the stream overwrite those, while
	// repeated stream fields append, so stream fields are tracked
	// separately.
	let mut seen_fields = HashSet::new();

	for _ in 0..comment_count {
		match read_comment(view) {
			Ok(CommentRead::Entry { key, value }) => {
				if seen_fields.contains(&key) {
					// A repeated field joins the values as text
					let joined = metadata
						.get(key)
						.map(|existing| FieldValue::Text(format!("{existing} / {value}")));

					if let Some(joined) = joined {
						metadata.insert(key, joined);
					}
				} else {
					metadata.insert(key, value);
					seen_fields.insert(key);
				}
			},
			Ok(CommentRead::Skipped) => {},
			Ok(CommentRead::Truncated) => {
				log::debug!("Comment block continues past the resident window, keeping partial metadata");
				break;
			},
			Err(err) => {
				log::warn!("Discarding malformed comment: {err}");
			},
		}
	}

	Ok(())
}

fn read_comment<S>(view: &mut BlobView<S>) -> Result<CommentRead> {
	// 4 bytes for the entry's length prefix
	if view.remaining() < 4 {
		// TODO: follow comment blocks that span multiple pages
		return Ok(CommentRead::Truncated);
	}

	let comment_length = view.read_u32::<LittleEndian>()? as usize;
	if comment_length > view.remaining() {
		return Ok(CommentRead::Truncated);
	}

	let comment = view.read_utf8(comment_length)?;

	let Some((name, value)) = comment.split_once('=') else {
		err!(MissingDelimiter);
	};

	let Some(key) = FieldKey::from_tag_name(name) else {
		// Also skips extension fields such as embedded picture blocks,
		// which are handled by a separate decoder
		return Ok(CommentRead::Skipped);
	};

	if key.is_numeric() {
		match parse_number_prefix(value) {
			Some(number) => Ok(CommentRead::Entry {
				key,
				value: FieldValue::Number(number),
			}),
			None => Ok(CommentRead::Skipped),
		}
	} else {
		Ok(CommentRead::Entry {
			key,
			value: FieldValue::Text(value.to_owned()),
		})
	}
}

// Base-10 coercion: leading whitespace is tolerated and digits are
// consumed up to the first non-digit, so values like "4/10" still yield 4.
fn parse_number_prefix(value: &str) -> Option<u32> {
	let trimmed = value.trim_start();
	let end = trimmed
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(trimmed.len());

	trimmed[..end].parse().ok()
}

#[cfg(test)]
mod tests {
	use crate::error::ErrorKind;
	use crate::metadata::{FieldKey, FieldValue};
	use crate::ogg::read::{CommentRead, parse_number_prefix, read_comment};

	use blobview::BlobView;

	fn entry_bytes(entries: &[&str]) -> Vec<u8> {
		let mut bytes = Vec::new();
		for entry in entries {
			bytes.extend_from_slice(&(entry.len() as u32).to_le_bytes());
			bytes.extend_from_slice(entry.as_bytes());
		}
		bytes
	}

	#[test_log::test]
	fn decodes_a_whitelisted_entry() {
		let mut view = BlobView::resident(entry_bytes(&["TITLE=Carolina IV"]));

		let CommentRead::Entry { key, value } = read_comment(&mut view).unwrap() else {
			panic!("expected an entry");
		};

		assert_eq!(key, FieldKey::Title);
		assert_eq!(value, FieldValue::Text(String::from("Carolina IV")));
	}

	#[test_log::test]
	fn coerces_numeric_fields() {
		let mut view = BlobView::resident(entry_bytes(&["TRACKNUMBER=04"]));

		let CommentRead::Entry { key, value } = read_comment(&mut view).unwrap() else {
			panic!("expected an entry");
		};

		assert_eq!(key, FieldKey::Track);
		assert_eq!(value, FieldValue::Number(4));
	}

	#[test_log::test]
	fn skips_unknown_fields() {
		let mut view = BlobView::resident(entry_bytes(&["COMMENT=encoded by nobody"]));

		assert!(matches!(
			read_comment(&mut view).unwrap(),
			CommentRead::Skipped
		));
		assert_eq!(view.remaining(), 0);
	}

	#[test_log::test]
	fn skips_numeric_fields_without_digits() {
		let mut view = BlobView::resident(entry_bytes(&["TRACKNUMBER=A1"]));

		assert!(matches!(
			read_comment(&mut view).unwrap(),
			CommentRead::Skipped
		));
	}

	#[test_log::test]
	fn missing_delimiter_is_an_entry_error() {
		let mut view = BlobView::resident(entry_bytes(&["NODELIMITER"]));
		let err = read_comment(&mut view).unwrap_err();

		assert!(matches!(err.kind(), ErrorKind::MissingDelimiter));
		// The entry was still consumed
		assert_eq!(view.remaining(), 0);
	}

	#[test_log::test]
	fn truncation_before_the_length_prefix() {
		let mut view = BlobView::resident(vec![1, 2]);

		assert!(matches!(
			read_comment(&mut view).unwrap(),
			CommentRead::Truncated
		));
	}

	#[test_log::test]
	fn truncation_within_the_payload() {
		let mut bytes = entry_bytes(&["TITLE=Carolina IV"]);
		bytes.truncate(bytes.len() - 5);
		let mut view = BlobView::resident(bytes);

		assert!(matches!(
			read_comment(&mut view).unwrap(),
			CommentRead::Truncated
		));
	}

	#[test_log::test]
	fn number_prefix_coercion() {
		assert_eq!(parse_number_prefix("04"), Some(4));
		assert_eq!(parse_number_prefix(" 7"), Some(7));
		assert_eq!(parse_number_prefix("4/10"), Some(4));
		assert_eq!(parse_number_prefix("A1"), None);
		assert_eq!(parse_number_prefix(""), None);
	}
}
