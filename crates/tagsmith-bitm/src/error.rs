//! Error types for bitmap tag handling.

use thiserror::Error;

/// Errors that can occur when building bitmap tags or extracting from them.
#[derive(Debug, Error)]
pub enum Error {
    /// Bitmap entry list is full.
    #[error("cannot add more bitmaps (max of 2048 per tag)")]
    TooManyBitmaps,

    /// Neither known tag dialect's markers matched.
    #[error("file does not appear to be a bitmap tag")]
    UnrecognizedTag,

    /// A fixed-offset field lies past the end of the buffer.
    #[error("tag data truncated: needed {needed} bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    /// The dialect-B body size field is unusable.
    #[error("bitmap body size field is invalid: {0}")]
    InvalidBodySize(i32),

    /// The tag carries no compressed source image span.
    #[error("no source image to extract")]
    NoSourceImage,

    /// The source image span decodes to zero uncompressed bytes.
    #[error("source image data is blank")]
    BlankSourceImage,

    /// zlib decompression failed.
    #[error("could not decompress source image: {0}")]
    Decompression(String),
}

/// Result type for bitmap tag operations.
pub type Result<T> = std::result::Result<T, Error>;
