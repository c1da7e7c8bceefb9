//! Bitmap tag document building and legacy source image extraction.
//!
//! A bitmap tag holds an ordered list of bitmap entries, an ordered list of
//! named sequences grouping consecutive entries, and one shared pixel-data
//! blob all entries index into. This crate provides:
//!
//! - [`BitmapTagDocument`] - The in-memory document and its
//!   [`append_image`](BitmapTagDocument::append_image) builder operation
//! - [`extract_source_image`] - Recovery of the zlib-compressed source image
//!   embedded in tags built by the original tool chains (two dialects)
//!
//! Serializing a finished document back to a tag file belongs to the tag
//! system that owns the file format, not to this crate.

mod builder;
mod document;
mod error;
mod source;

pub use builder::{AppendOutcome, AppendWarning};
pub use document::{
    BitmapEntry, BitmapTagDocument, ContainerFormat, ContainerKind, SequenceEntry, MAX_BITMAPS,
    MAX_SEQUENCES, MAX_SEQUENCE_NAME_LEN,
};
pub use error::{Error, Result};
pub use source::{extract_source_image, SourceImage};
