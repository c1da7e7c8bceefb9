//! Shared image descriptor types.
//!
//! These types travel between the DDS parser (which produces them) and the
//! bitmap-tag builder (which consumes them), so they live here rather than
//! in either of those crates.

use std::fmt;

/// How a bitmap's image slots are organized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    /// A flat 2D texture.
    Texture2d,
    /// A volume texture with depth slices.
    Texture3d,
    /// Six square faces stored mip-major.
    Cubemap,
}

impl fmt::Display for TextureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextureKind::Texture2d => "texture_2d",
            TextureKind::Texture3d => "texture_3d",
            TextureKind::Cubemap => "cubemap",
        })
    }
}

/// Pixel storage formats understood by the bitmap tag system.
///
/// `Ay8` and `P8Bump` are never produced by the DDS parser but exist in
/// built tags, so the container-format mapping has to know about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Dxt1,
    Dxt3,
    Dxt5,
    A8r8g8b8,
    X8r8g8b8,
    R5g6b5,
    A1r5g5b5,
    A4r4g4b4,
    A8,
    Y8,
    Ay8,
    A8y8,
    P8Bump,
}

impl PixelFormat {
    /// Whether this format stores block-compressed pixel data.
    pub fn is_compressed(self) -> bool {
        matches!(self, PixelFormat::Dxt1 | PixelFormat::Dxt3 | PixelFormat::Dxt5)
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PixelFormat::Dxt1 => "dxt1",
            PixelFormat::Dxt3 => "dxt3",
            PixelFormat::Dxt5 => "dxt5",
            PixelFormat::A8r8g8b8 => "a8r8g8b8",
            PixelFormat::X8r8g8b8 => "x8r8g8b8",
            PixelFormat::R5g6b5 => "r5g6b5",
            PixelFormat::A1r5g5b5 => "a1r5g5b5",
            PixelFormat::A4r4g4b4 => "a4r4g4b4",
            PixelFormat::A8 => "a8",
            PixelFormat::Y8 => "y8",
            PixelFormat::Ay8 => "ay8",
            PixelFormat::A8y8 => "a8y8",
            PixelFormat::P8Bump => "p8_bump",
        })
    }
}

/// Canonical description of one image held in (or headed for) a bitmap tag.
///
/// `mip_count` is the number of mip levels *beyond* the base image.
#[derive(Debug, Clone, Copy)]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub kind: TextureKind,
    pub format: PixelFormat,
    pub mip_count: u32,
}
