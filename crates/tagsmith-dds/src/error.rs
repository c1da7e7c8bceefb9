//! Error types for DDS parsing.

use thiserror::Error;

/// Errors that can occur when parsing DDS files.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] tagsmith_common::Error),

    /// Invalid DDS magic.
    #[error("invalid DDS magic: expected 'DDS ', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// The header does not declare a pixel-format structure.
    #[error("DDS image is malformed and does not contain a pixelformat structure")]
    MissingPixelFormat,

    /// Cubemap capability set without all six face flags.
    #[error("DDS image is malformed and does not contain all six necessary cubemap faces")]
    IncompleteCubemap,

    /// Pixel format matched none of the known layouts.
    #[error("unknown dds image format")]
    UnknownFormat,

    /// Not enough pixel bytes for even the full-size image.
    #[error("size of the pixel data is too small to read even the fullsize image from")]
    PixelDataTooSmall,
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
