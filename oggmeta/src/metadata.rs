//! The metadata record enriched by the comment decoder

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// The tag block format found in the stream
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TagFormat {
	/// A Vorbis comment header (packet type 3, `vorbis`)
	Vorbis,
	/// An `OpusTags` comment header
	Opus,
}

/// A field the decoder is willing to store
///
/// Comment entries whose names map to no `FieldKey` are ignored, which
/// also covers extension fields such as embedded picture blocks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKey {
	/// Track title
	Title,
	/// Track artist
	Artist,
	/// Album name
	Album,
	/// Track number within the disc
	Track,
	/// Total number of tracks on the disc
	TrackTotal,
	/// Disc number within the release
	Disc,
	/// Total number of discs in the release
	DiscTotal,
}

// Maps normalized comment field names to the key they are stored under.
// Shared configuration surface with any other codec-specific decoder.
const FIELD_TABLE: [(&str, FieldKey); 7] = [
	("title", FieldKey::Title),
	("artist", FieldKey::Artist),
	("album", FieldKey::Album),
	("tracknumber", FieldKey::Track),
	("tracktotal", FieldKey::TrackTotal),
	("discnumber", FieldKey::Disc),
	("disctotal", FieldKey::DiscTotal),
];

impl FieldKey {
	/// Look up the key a comment field name is stored under
	///
	/// Names are matched case-insensitively with exactly the first space
	/// removed, so `TRACK NUMBER` matches `tracknumber` while a name with
	/// two spaces does not.
	///
	/// ```rust
	/// use oggmeta::metadata::FieldKey;
	///
	/// assert_eq!(FieldKey::from_tag_name("TITLE"), Some(FieldKey::Title));
	/// assert_eq!(FieldKey::from_tag_name("TRACK NUMBER"), Some(FieldKey::Track));
	/// assert_eq!(FieldKey::from_tag_name("COMMENT"), None);
	/// ```
	pub fn from_tag_name(name: &str) -> Option<Self> {
		let name = name.to_lowercase().replacen(' ', "", 1);

		FIELD_TABLE
			.iter()
			.find(|(tag, _)| *tag == name)
			.map(|(_, key)| *key)
	}

	/// Whether values for this key are coerced to integers
	pub fn is_numeric(self) -> bool {
		matches!(
			self,
			FieldKey::Track | FieldKey::TrackTotal | FieldKey::Disc | FieldKey::DiscTotal
		)
	}
}

/// A value stored in the metadata record
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
	/// Free-form text
	Text(String),
	/// An integer-coerced value
	Number(u32),
}

impl FieldValue {
	/// Returns the text content, if this value is text
	pub fn text(&self) -> Option<&str> {
		match self {
			FieldValue::Text(text) => Some(text),
			FieldValue::Number(_) => None,
		}
	}

	/// Returns the numeric content, if this value is a number
	pub fn number(&self) -> Option<u32> {
		match self {
			FieldValue::Text(_) => None,
			FieldValue::Number(number) => Some(*number),
		}
	}
}

impl Display for FieldValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			FieldValue::Text(text) => f.write_str(text),
			FieldValue::Number(number) => write!(f, "{number}"),
		}
	}
}

macro_rules! impl_accessor {
	($($name:ident => $key:ident;)+) => {
		paste::paste! {
			$(
				#[doc = "Returns the " $name ", if it is stored as text"]
				pub fn $name(&self) -> Option<&str> {
					self.get(FieldKey::$key).and_then(FieldValue::text)
				}

				#[doc = "Sets the " $name]
				pub fn [<set_ $name>](&mut self, value: String) {
					self.insert(FieldKey::$key, FieldValue::Text(value));
				}
			)+
		}
	}
}

macro_rules! impl_numeric_accessor {
	($($name:ident => $key:ident;)+) => {
		paste::paste! {
			$(
				#[doc = "Returns the " $name ", if it is stored as a number"]
				pub fn $name(&self) -> Option<u32> {
					self.get(FieldKey::$key).and_then(FieldValue::number)
				}

				#[doc = "Sets the " $name]
				pub fn [<set_ $name>](&mut self, value: u32) {
					self.insert(FieldKey::$key, FieldValue::Number(value));
				}
			)+
		}
	}
}

/// A metadata record for one audio file
///
/// The record may be pre-populated before parsing (an indexer typically
/// seeds the title from the filename); the decoder enriches it in place,
/// overwriting individual keys rather than replacing the record. One
/// record must not be shared across concurrent parses.
///
/// ```rust
/// use oggmeta::metadata::Metadata;
///
/// let mut metadata = Metadata::new();
/// metadata.set_title(String::from("Carolina IV"));
///
/// assert_eq!(metadata.title(), Some("Carolina IV"));
/// assert_eq!(metadata.artist(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
	tag_format: Option<TagFormat>,
	items: HashMap<FieldKey, FieldValue>,
}

impl Metadata {
	/// Create a new empty `Metadata`
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the tag block format, if one was identified
	pub fn tag_format(&self) -> Option<TagFormat> {
		self.tag_format
	}

	/// Records the tag block format
	pub fn set_tag_format(&mut self, format: TagFormat) {
		self.tag_format = Some(format);
	}

	/// Returns the stored value for `key`
	pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
		self.items.get(&key)
	}

	/// Stores `value` under `key`, replacing any existing value
	pub fn insert(&mut self, key: FieldKey, value: FieldValue) {
		self.items.insert(key, value);
	}

	/// Returns the number of stored fields
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the record holds no fields
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	impl_accessor! {
		title  => Title;
		artist => Artist;
		album  => Album;
	}

	impl_numeric_accessor! {
		track       => Track;
		track_total => TrackTotal;
		disc        => Disc;
		disc_total  => DiscTotal;
	}
}

#[cfg(test)]
mod tests {
	use crate::metadata::{FieldKey, FieldValue, Metadata};

	#[test_log::test]
	fn field_table_matching() {
		assert_eq!(FieldKey::from_tag_name("TITLE"), Some(FieldKey::Title));
		assert_eq!(FieldKey::from_tag_name("tracknumber"), Some(FieldKey::Track));
		assert_eq!(
			FieldKey::from_tag_name("DiscTotal"),
			Some(FieldKey::DiscTotal)
		);
		assert_eq!(FieldKey::from_tag_name("COMMENT"), None);
		assert_eq!(FieldKey::from_tag_name("METADATA_BLOCK_PICTURE"), None);
	}

	#[test_log::test]
	fn only_the_first_space_is_removed() {
		assert_eq!(FieldKey::from_tag_name("TRACK NUMBER"), Some(FieldKey::Track));
		assert_eq!(FieldKey::from_tag_name("DISC  TOTAL"), None);
	}

	#[test_log::test]
	fn numeric_keys() {
		assert!(FieldKey::Track.is_numeric());
		assert!(FieldKey::DiscTotal.is_numeric());
		assert!(!FieldKey::Title.is_numeric());
	}

	#[test_log::test]
	fn accessors_respect_value_types() {
		let mut metadata = Metadata::new();
		metadata.insert(FieldKey::Track, FieldValue::Number(4));
		metadata.insert(FieldKey::Title, FieldValue::Text(String::from("Nothing to Say")));

		assert_eq!(metadata.track(), Some(4));
		assert_eq!(metadata.title(), Some("Nothing to Say"));

		// A joined duplicate turns numeric fields into text
		metadata.insert(FieldKey::Track, FieldValue::Text(String::from("4 / 10")));
		assert_eq!(metadata.track(), None);
		assert_eq!(
			metadata.get(FieldKey::Track),
			Some(&FieldValue::Text(String::from("4 / 10")))
		);
	}

	#[test_log::test]
	fn values_render_for_joining() {
		assert_eq!(FieldValue::Text(String::from("Angra")).to_string(), "Angra");
		assert_eq!(FieldValue::Number(4).to_string(), "4");
	}
}
