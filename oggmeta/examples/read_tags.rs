#![allow(missing_docs)]

use blobview::{BlobView, MemoryBlob};
use oggmeta::metadata::Metadata;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let path = std::env::args().nth(1).expect("usage: read_tags <file.ogg>");

	let source = MemoryBlob::new(std::fs::read(&path)?);
	let mut view = BlobView::open(source, 8 * 1024).await?;

	let mut metadata = Metadata::new();
	oggmeta::ogg::read_from(&mut view, &mut metadata).await?;

	println!("Tag format: {:?}", metadata.tag_format());
	println!("Title:      {:?}", metadata.title());
	println!("Artist:     {:?}", metadata.artist());
	println!("Album:      {:?}", metadata.album());
	println!(
		"Track:      {:?} of {:?}",
		metadata.track(),
		metadata.track_total()
	);
	println!(
		"Disc:       {:?} of {:?}",
		metadata.disc(),
		metadata.disc_total()
	);

	Ok(())
}
