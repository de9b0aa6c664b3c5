//! Comment reading for OGG container formats
//!
//! Only the identification and comment header pages are touched; audio
//! payload pages are never read.

pub(crate) mod constants;
mod page;
mod read;

pub use read::read_from;
