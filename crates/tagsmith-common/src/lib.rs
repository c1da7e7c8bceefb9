//! Common utilities for tagsmith.
//!
//! This crate provides the foundational types used across all tagsmith crates:
//!
//! - [`BinaryReader`] - Zero-copy binary reading from byte slices
//! - [`ImageDescriptor`] - The canonical description of one parsed image,
//!   shared between the DDS parser and the bitmap-tag builder

mod error;
mod image;
mod reader;

pub use error::{Error, Result};
pub use image::{ImageDescriptor, PixelFormat, TextureKind};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
