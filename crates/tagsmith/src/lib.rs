//! Tagsmith - bitmap tag compilation for Halo modding.
//!
//! This crate provides a unified interface to the tagsmith library
//! ecosystem for turning DDS images into bitmap tag documents and for
//! recovering source images from already-built tags.
//!
//! # Crates
//!
//! - [`tagsmith_common`] - Common utilities (binary reading, shared image types)
//! - [`tagsmith_dds`] - DDS container parsing
//! - [`tagsmith_bitm`] - Bitmap tag document building and source extraction
//!
//! # Example
//!
//! ```no_run
//! use tagsmith::prelude::*;
//!
//! let data = std::fs::read("grass.dds")?;
//! let parsed = parse_dds(&data)?;
//!
//! let mut document = BitmapTagDocument::new();
//! document.append_image(&parsed.descriptor, parsed.pixels, "grass")?;
//! println!("{} entries, {} pixel bytes", document.entries.len(), document.pixel_data.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use tagsmith_bitm as bitm;
pub use tagsmith_common as common;
pub use tagsmith_dds as dds;

pub mod batch;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tagsmith_bitm::{
        extract_source_image, BitmapTagDocument, ContainerFormat, ContainerKind, SourceImage,
    };
    pub use tagsmith_common::{BinaryReader, ImageDescriptor, PixelFormat, TextureKind};
    pub use tagsmith_dds::{parse_dds, DdsWarning, ParsedDds};

    pub use crate::batch::{
        compile_dds_batch, sequence_name_for_path, BatchInput, BatchReport, CompileMode,
        CompiledTag,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
