//! A lazily loaded byte window over blob-like storage

mod error;

use std::future::Future;

use byteorder::ByteOrder;

pub use error::{Result, ViewError};

/// A source of blob data that can be read in ranges
///
/// A source is anything the bytes of a file can be pulled out of on
/// demand: device storage, a local file, an already buffered `Vec<u8>`.
/// The single operation is asynchronous so that a [`BlobView`] can suspend
/// while more of the blob is materialized.
pub trait BlobSource {
	/// Read up to `length` bytes starting at `offset`
	///
	/// A source that runs out of blob returns the bytes that remain, which
	/// may be none. Short reads are how a view learns that the blob ended;
	/// they are not errors.
	fn read_range(
		&mut self,
		offset: u64,
		length: usize,
	) -> impl Future<Output = std::io::Result<Vec<u8>>>;
}

/// A [`BlobSource`] over bytes already held in memory
pub struct MemoryBlob {
	data: Vec<u8>,
}

impl MemoryBlob {
	/// Create a `MemoryBlob` over `data`
	pub fn new(data: Vec<u8>) -> Self {
		Self { data }
	}
}

impl BlobSource for MemoryBlob {
	fn read_range(
		&mut self,
		offset: u64,
		length: usize,
	) -> impl Future<Output = std::io::Result<Vec<u8>>> {
		let len = self.data.len() as u64;
		let start = offset.min(len) as usize;
		let end = offset.saturating_add(length as u64).min(len) as usize;

		std::future::ready(Ok(self.data[start..end].to_vec()))
	}
}

/// A cursor over the resident prefix of a lazily loaded blob
///
/// The view holds whatever part of the blob has been fetched so far and a
/// read position within it. All reads are synchronous over the resident
/// bytes and fail with [`ViewError::NotEnoughData`] past the resident end;
/// [`BlobView::ensure_resident`] is the one asynchronous operation, pulling
/// more of the blob in from the source.
///
/// A view must not be shared between concurrent parses; each parse owns
/// its own cursor.
pub struct BlobView<S> {
	source: S,
	buffer: Vec<u8>,
	index: u64,
}

impl<S> BlobView<S> {
	/// Returns the absolute read position
	pub fn position(&self) -> u64 {
		self.index
	}

	/// Returns the count of resident bytes left after the cursor
	pub fn remaining(&self) -> usize {
		self.buffer.len() - self.index as usize
	}

	// Bounds-check `count` bytes and advance past them. The cursor is left
	// untouched when the check fails.
	fn take(&mut self, count: usize) -> Result<&[u8]> {
		if self.remaining() < count {
			return Err(ViewError::NotEnoughData);
		}

		let start = self.index as usize;
		self.index += count as u64;
		Ok(&self.buffer[start..start + count])
	}

	/// Read a single byte
	///
	/// # Errors
	///
	/// [`ViewError::NotEnoughData`] if the cursor is at the resident end
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.take(1)?[0])
	}

	/// Read 4 bytes, decoded per the requested endianness
	///
	/// # Errors
	///
	/// [`ViewError::NotEnoughData`] if fewer than 4 bytes are resident
	pub fn read_u32<B: ByteOrder>(&mut self) -> Result<u32> {
		Ok(B::read_u32(self.take(4)?))
	}

	/// Read `count` bytes as an ordered sequence
	///
	/// # Errors
	///
	/// [`ViewError::NotEnoughData`] if fewer than `count` bytes are resident
	pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
		Ok(self.take(count)?.to_vec())
	}

	/// Read `count` bytes, widening each into a character
	///
	/// Every byte value maps to the character of the same code point, so
	/// binary signatures compare cleanly against string literals.
	///
	/// # Errors
	///
	/// [`ViewError::NotEnoughData`] if fewer than `count` bytes are resident
	pub fn read_ascii(&mut self, count: usize) -> Result<String> {
		Ok(self.take(count)?.iter().map(|&b| char::from(b)).collect())
	}

	/// Read `count` bytes, decoded as UTF-8 text
	///
	/// # Errors
	///
	/// [`ViewError::NotEnoughData`] if fewer than `count` bytes are
	/// resident, [`ViewError::Utf8`] if they do not form valid UTF-8
	pub fn read_utf8(&mut self, count: usize) -> Result<String> {
		Ok(String::from_utf8(self.take(count)?.to_vec())?)
	}

	/// Advance the cursor by `count` bytes without materializing them
	///
	/// # Errors
	///
	/// [`ViewError::NotEnoughData`] if the skip would pass the resident end
	pub fn skip(&mut self, count: u64) -> Result<()> {
		if (self.remaining() as u64) < count {
			return Err(ViewError::NotEnoughData);
		}

		self.index += count;
		Ok(())
	}
}

impl<S> BlobView<S>
where
	S: BlobSource,
{
	/// Open a view over `source`, fetching the first `prefetch` bytes
	///
	/// The prefetch must cover everything a caller intends to read before
	/// its first [`BlobView::ensure_resident`] request.
	///
	/// # Errors
	///
	/// Any I/O error from the source
	pub async fn open(mut source: S, prefetch: usize) -> Result<Self> {
		let buffer = source.read_range(0, prefetch).await?;

		Ok(Self {
			source,
			buffer,
			index: 0,
		})
	}

	/// Ensure `length` bytes starting at `offset` are resident
	///
	/// The missing suffix, if any, is fetched from the source. A source
	/// that runs out of blob leaves the view shorter than requested;
	/// subsequent reads observe the reduced [`BlobView::remaining`] count.
	///
	/// # Errors
	///
	/// Any I/O error from the source
	pub async fn ensure_resident(&mut self, offset: u64, length: usize) -> Result<()> {
		let end = offset.saturating_add(length as u64);
		let resident = self.buffer.len() as u64;

		if end <= resident {
			return Ok(());
		}

		let more = self
			.source
			.read_range(resident, (end - resident) as usize)
			.await?;
		self.buffer.extend_from_slice(&more);

		Ok(())
	}
}

impl BlobView<MemoryBlob> {
	/// A view whose blob is entirely resident from the start
	///
	/// Extension requests succeed without growing the view; the blob has
	/// nothing further to offer.
	pub fn resident(data: Vec<u8>) -> Self {
		Self {
			source: MemoryBlob::new(Vec::new()),
			buffer: data,
			index: 0,
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::{BlobView, MemoryBlob, ViewError};

	use byteorder::{BigEndian, LittleEndian};

	#[test]
	fn typed_reads_advance_in_order() {
		let mut view = BlobView::resident(vec![7, 1, 0, 0, 0, b'O', b'g', b'g', b'S']);

		assert_eq!(view.read_u8().unwrap(), 7);
		assert_eq!(view.read_u32::<LittleEndian>().unwrap(), 1);
		assert_eq!(view.read_ascii(4).unwrap(), "OggS");
		assert_eq!(view.position(), 9);
		assert_eq!(view.remaining(), 0);
	}

	#[test]
	fn endianness_is_caller_chosen() {
		let mut view = BlobView::resident(vec![0, 0, 0, 1]);
		assert_eq!(view.read_u32::<BigEndian>().unwrap(), 1);
	}

	#[test]
	fn ascii_read_widens_bytes() {
		let mut view = BlobView::resident(vec![0x4F, 0x67, 0x67, 0x53, 0xE9]);

		assert_eq!(view.read_ascii(4).unwrap(), "OggS");
		assert_eq!(view.read_ascii(1).unwrap(), "\u{e9}");
	}

	#[test]
	fn utf8_read_rejects_invalid_sequences() {
		let mut view = BlobView::resident(vec![0xFF, 0xFE]);

		assert!(matches!(view.read_utf8(2), Err(ViewError::Utf8(_))));
	}

	#[test]
	fn failed_reads_leave_the_cursor_in_place() {
		let mut view = BlobView::resident(vec![1, 2]);

		assert!(matches!(view.read_bytes(3), Err(ViewError::NotEnoughData)));
		assert!(matches!(view.skip(3), Err(ViewError::NotEnoughData)));
		assert_eq!(view.position(), 0);
		assert_eq!(view.read_bytes(2).unwrap(), vec![1, 2]);
	}

	#[tokio::test]
	async fn extension_grows_residency() {
		let data = (0u8..100).collect::<Vec<_>>();
		let mut view = BlobView::open(MemoryBlob::new(data), 10).await.unwrap();

		assert_eq!(view.remaining(), 10);
		view.skip(10).unwrap();

		view.ensure_resident(view.position(), 20).await.unwrap();
		assert_eq!(view.remaining(), 20);
		assert_eq!(view.read_u8().unwrap(), 10);
	}

	#[tokio::test]
	async fn extension_is_capped_at_the_blob_end() {
		let mut view = BlobView::open(MemoryBlob::new(vec![0; 16]), 8).await.unwrap();

		view.ensure_resident(0, 1024).await.unwrap();
		assert_eq!(view.remaining(), 16);
	}

	#[tokio::test]
	async fn extension_within_residency_is_a_no_op() {
		let mut view = BlobView::open(MemoryBlob::new(vec![0; 16]), 16).await.unwrap();

		view.ensure_resident(4, 8).await.unwrap();
		assert_eq!(view.remaining(), 16);
	}
}
