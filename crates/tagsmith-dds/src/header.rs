//! DDS header structures.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// DDS file header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels, counting the base image.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// Header flag: the pixel-format structure contains valid data.
    pub const FLAG_PIXELFORMAT: u32 = 0x1000;

    /// caps2 flag: the file holds a cubemap.
    pub const CAPS2_CUBEMAP: u32 = 0x200;
    /// caps2 flag: +X cubemap face present.
    pub const CAPS2_CUBEMAP_POS_X: u32 = 0x400;
    /// caps2 flag: -X cubemap face present.
    pub const CAPS2_CUBEMAP_NEG_X: u32 = 0x800;
    /// caps2 flag: +Y cubemap face present.
    pub const CAPS2_CUBEMAP_POS_Y: u32 = 0x1000;
    /// caps2 flag: -Y cubemap face present.
    pub const CAPS2_CUBEMAP_NEG_Y: u32 = 0x2000;
    /// caps2 flag: +Z cubemap face present.
    pub const CAPS2_CUBEMAP_POS_Z: u32 = 0x4000;
    /// caps2 flag: -Z cubemap face present.
    pub const CAPS2_CUBEMAP_NEG_Z: u32 = 0x8000;
    /// caps2 mask covering all six cubemap faces.
    pub const CAPS2_CUBEMAP_ALL_FACES: u32 = Self::CAPS2_CUBEMAP_POS_X
        | Self::CAPS2_CUBEMAP_NEG_X
        | Self::CAPS2_CUBEMAP_POS_Y
        | Self::CAPS2_CUBEMAP_NEG_Y
        | Self::CAPS2_CUBEMAP_POS_Z
        | Self::CAPS2_CUBEMAP_NEG_Z;
    /// caps2 flag: the file holds a volume texture.
    pub const CAPS2_VOLUME: u32 = 0x200000;
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Flag: the image carries an alpha channel (a_bit_mask is valid).
    pub const FLAG_ALPHA_PIXELS: u32 = 0x1;
    /// Flag: alpha-only image (older files).
    pub const FLAG_ALPHA_ONLY: u32 = 0x2;
    /// Flag: four_cc contains valid data.
    pub const FLAG_FOURCC: u32 = 0x4;
    /// Flag: uncompressed RGB data, bit count and channel masks are valid.
    pub const FLAG_RGB: u32 = 0x40;
    /// Flag: single-channel luminance data (older files).
    pub const FLAG_LUMINANCE: u32 = 0x20000;
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// No compression code.
    pub const NONE: Self = Self([0; 4]);
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT2 compression (premultiplied DXT3).
    pub const DXT2: Self = Self(*b"DXT2");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT4 compression (premultiplied DXT5).
    pub const DXT4: Self = Self(*b"DXT4");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
}
