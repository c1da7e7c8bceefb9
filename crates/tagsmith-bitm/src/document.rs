//! The in-memory bitmap tag document.

use std::fmt;

use tagsmith_common::{PixelFormat, TextureKind};

/// Most bitmap entries a single tag may hold.
pub const MAX_BITMAPS: usize = 2048;
/// Most sequences a single tag may hold.
pub const MAX_SEQUENCES: usize = 256;
/// Longest sequence name, in bytes.
pub const MAX_SEQUENCE_NAME_LEN: usize = 31;

/// Container-level texture organization, set from the first appended entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerKind {
    #[default]
    Textures2d,
    Textures3d,
    Cubemaps,
}

impl From<TextureKind> for ContainerKind {
    fn from(kind: TextureKind) -> Self {
        match kind {
            TextureKind::Texture2d => ContainerKind::Textures2d,
            TextureKind::Texture3d => ContainerKind::Textures3d,
            TextureKind::Cubemap => ContainerKind::Cubemaps,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContainerKind::Textures2d => "textures_2d",
            ContainerKind::Textures3d => "textures_3d",
            ContainerKind::Cubemaps => "cubemaps",
        })
    }
}

/// Container-level format family, set from the first appended entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerFormat {
    #[default]
    ColorKeyTransparency,
    ExplicitAlpha,
    InterpolatedAlpha,
    Color16Bit,
    Color32Bit,
    Monochrome,
}

impl ContainerFormat {
    /// The format family a per-entry pixel format belongs to.
    pub fn from_pixel_format(format: PixelFormat) -> Self {
        match format {
            PixelFormat::Dxt1 => ContainerFormat::ColorKeyTransparency,
            PixelFormat::Dxt3 => ContainerFormat::ExplicitAlpha,
            PixelFormat::Dxt5 => ContainerFormat::InterpolatedAlpha,
            PixelFormat::R5g6b5 | PixelFormat::A1r5g5b5 | PixelFormat::A4r4g4b4 => {
                ContainerFormat::Color16Bit
            }
            PixelFormat::X8r8g8b8 | PixelFormat::A8r8g8b8 | PixelFormat::P8Bump => {
                ContainerFormat::Color32Bit
            }
            PixelFormat::A8 | PixelFormat::Y8 | PixelFormat::Ay8 | PixelFormat::A8y8 => {
                ContainerFormat::Monochrome
            }
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContainerFormat::ColorKeyTransparency => "color_key_transparency",
            ContainerFormat::ExplicitAlpha => "explicit_alpha",
            ContainerFormat::InterpolatedAlpha => "interpolated_alpha",
            ContainerFormat::Color16Bit => "color_16bit",
            ContainerFormat::Color32Bit => "color_32bit",
            ContainerFormat::Monochrome => "monochrome",
        })
    }
}

/// One bitmap entry in the tag's entry list.
///
/// `pixels_offset` indexes into the document's shared pixel blob. Entries are
/// not mutated after creation except for the registration point, which the
/// legacy extraction path fills in on the entry it just appended.
#[derive(Debug, Clone)]
pub struct BitmapEntry {
    /// Entry class marker, always `b"bitm"`.
    pub bitm_id: [u8; 4],
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub kind: TextureKind,
    pub format: PixelFormat,
    /// Mip levels beyond the base image.
    pub mip_count: u32,
    /// Byte offset of this entry's pixels in the shared blob.
    pub pixels_offset: u32,
    pub compressed: bool,
    /// Always true; dimensions are never actually re-checked.
    pub power_of_two: bool,
    pub registration_point_x: u32,
    pub registration_point_y: u32,
}

/// A named run of consecutive bitmap entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceEntry {
    pub name: String,
    pub first_bitmap_index: u32,
    pub bitmap_count: u32,
}

/// An in-memory bitmap tag being assembled.
///
/// The container-level kind and format are inferred from the first appended
/// entry and then locked; `container_locked` records that explicitly instead
/// of re-deriving it from the entry count.
#[derive(Debug, Clone, Default)]
pub struct BitmapTagDocument {
    pub entries: Vec<BitmapEntry>,
    pub sequences: Vec<SequenceEntry>,
    /// Shared pixel blob all entries index into.
    pub pixel_data: Vec<u8>,
    pub kind: ContainerKind,
    pub format: ContainerFormat,
    pub container_locked: bool,
}

impl BitmapTagDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_format_families() {
        assert_eq!(
            ContainerFormat::from_pixel_format(PixelFormat::Dxt1),
            ContainerFormat::ColorKeyTransparency
        );
        assert_eq!(
            ContainerFormat::from_pixel_format(PixelFormat::A4r4g4b4),
            ContainerFormat::Color16Bit
        );
        assert_eq!(
            ContainerFormat::from_pixel_format(PixelFormat::P8Bump),
            ContainerFormat::Color32Bit
        );
        assert_eq!(
            ContainerFormat::from_pixel_format(PixelFormat::Ay8),
            ContainerFormat::Monochrome
        );
    }

    #[test]
    fn test_container_display_names() {
        assert_eq!(ContainerKind::Cubemaps.to_string(), "cubemaps");
        assert_eq!(
            ContainerFormat::InterpolatedAlpha.to_string(),
            "interpolated_alpha"
        );
    }
}
