//! Extract Vorbis comments from OGG Vorbis and OGG Opus streams.
//!
//! Built for media-library indexers that scan many files without loading
//! them fully into memory: parsing works over the lazily loaded byte
//! window of [`blobview`] and touches only the two header pages, with a
//! single extension request for the comment packet.
//!
//! # Examples
//!
//! ```rust,no_run
//! use blobview::{BlobView, MemoryBlob};
//! use oggmeta::metadata::Metadata;
//!
//! # async fn example() -> oggmeta::error::Result<()> {
//! let source = MemoryBlob::new(std::fs::read("holy_land_04.ogg")?);
//! let mut view = BlobView::open(source, 8 * 1024).await?;
//!
//! // An indexer usually seeds the record from the filename first
//! let mut metadata = Metadata::new();
//! metadata.set_title(String::from("holy_land_04"));
//!
//! oggmeta::ogg::read_from(&mut view, &mut metadata).await?;
//!
//! assert_eq!(metadata.title(), Some("Carolina IV"));
//! # Ok(()) }
//! ```

pub mod error;
pub(crate) mod macros;
pub mod metadata;
pub mod ogg;
