//! DDS container parsing.

use std::fmt;

use tagsmith_common::{BinaryReader, ImageDescriptor, PixelFormat, TextureKind};

use crate::header::{DdsHeader, DdsPixelFormat, FourCC};
use crate::{Error, Result, DDS_MAGIC};

/// A DDS file parsed into the bitmap tag system's terms.
#[derive(Debug, Clone)]
pub struct ParsedDds {
    /// Dimensions, kind, format and validated mip count.
    pub descriptor: ImageDescriptor,
    /// Full pixel payload, reordered mip-major for cubemaps.
    pub pixels: Vec<u8>,
    /// Non-fatal findings the caller should surface.
    pub warnings: Vec<DdsWarning>,
}

/// Non-fatal findings produced while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdsWarning {
    /// The header declared more mip levels than the pixel data can hold.
    MipCountReduced { requested: u32, actual: u32 },
}

impl fmt::Display for DdsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DdsWarning::MipCountReduced { requested, actual } => write!(
                f,
                "mipmap count is too high for the stored pixel data, reduced from {} to {}",
                requested, actual
            ),
        }
    }
}

/// Parse a DDS file into a descriptor and its pixel payload.
///
/// Cubemap payloads are reordered from the DDS face-major layout into the
/// mip-major layout bitmap tags expect. The declared mip count is validated
/// against the bytes actually present and reduced (with a warning) when the
/// payload runs short.
pub fn parse_dds(data: &[u8]) -> Result<ParsedDds> {
    if data.len() < 4 {
        return Err(Error::Common(tagsmith_common::Error::UnexpectedEof {
            needed: 4,
            available: data.len(),
        }));
    }

    let magic: [u8; 4] = data[..4].try_into().unwrap();
    if &magic != DDS_MAGIC {
        return Err(Error::InvalidMagic(magic));
    }

    let mut reader = BinaryReader::new(&data[4..]);
    let header: DdsHeader = reader.read_struct()?;
    let pixel_data = reader.remaining_bytes();

    let flags = header.flags;
    let caps2 = header.caps2;

    if flags & DdsHeader::FLAG_PIXELFORMAT == 0 {
        return Err(Error::MissingPixelFormat);
    }

    let cubemap = caps2 & DdsHeader::CAPS2_CUBEMAP != 0;
    if cubemap && caps2 & DdsHeader::CAPS2_CUBEMAP_ALL_FACES != DdsHeader::CAPS2_CUBEMAP_ALL_FACES {
        return Err(Error::IncompleteCubemap);
    }
    let volume = caps2 & DdsHeader::CAPS2_VOLUME != 0;

    let width = header.width;
    let height = header.height;
    let depth = if volume { header.depth } else { 1 };
    let mipmap_count = header.mipmap_count;
    let requested_mips = mipmap_count.saturating_sub(1);

    let (format, bpp) = classify(header.pixel_format)?;

    // Block-compressed formats cannot shrink below one 4x4 block.
    let (min_w, min_h) = if format.is_compressed() { (4, 4) } else { (1, 1) };

    // Pixel counts of the mip chain starting at the full-size image; levels
    // are dropped from the tail until what remains fits the payload. No real
    // file declares anywhere near 255 levels, so a garbage header count
    // cannot balloon the list.
    let face_count: u64 = if cubemap { 6 } else { 1 };
    let chain_len = requested_mips.min(255);
    let mut pixel_counts: Vec<u64> = Vec::with_capacity(chain_len as usize);
    {
        let (mut w, mut h, mut d) = (width, height, depth);
        for _ in 0..chain_len {
            let count = u64::from(w)
                .saturating_mul(u64::from(h))
                .saturating_mul(u64::from(d));
            pixel_counts.push(count);
            (w, h, d) = next_mip_dims(w, h, d, min_w, min_h);
        }
    }

    let available = pixel_data.len() as u64;
    loop {
        let total = pixel_counts
            .iter()
            .fold(0u64, |acc, &c| acc.saturating_add(c))
            .saturating_mul(u64::from(bpp))
            .saturating_mul(face_count)
            / 8;
        if total <= available {
            break;
        }
        pixel_counts.pop();
        if pixel_counts.is_empty() {
            return Err(Error::PixelDataTooSmall);
        }
    }

    let mut warnings = Vec::new();
    let mip_count = pixel_counts.len() as u32;
    if mip_count != requested_mips {
        warnings.push(DdsWarning::MipCountReduced {
            requested: requested_mips,
            actual: mip_count,
        });
    }

    let (kind, pixels) = if volume {
        (TextureKind::Texture3d, pixel_data.to_vec())
    } else if cubemap {
        (
            TextureKind::Cubemap,
            reorder_cubemap(pixel_data, (width, height, depth), mip_count, bpp, (min_w, min_h)),
        )
    } else {
        (TextureKind::Texture2d, pixel_data.to_vec())
    };

    Ok(ParsedDds {
        descriptor: ImageDescriptor {
            width,
            height,
            depth,
            kind,
            format,
            mip_count,
        },
        pixels,
        warnings,
    })
}

/// Classify the pixel format and decide the bits-per-pixel the size math
/// will use.
///
/// The 8 bpp default intentionally also applies to `a8y8`; tags built by the
/// reference tooling size that format the same way.
fn classify(pf: DdsPixelFormat) -> Result<(PixelFormat, u32)> {
    let flags = pf.flags;
    let four_cc = pf.four_cc;

    match four_cc {
        FourCC::DXT1 => return Ok((PixelFormat::Dxt1, 4)),
        FourCC::DXT2 | FourCC::DXT3 => return Ok((PixelFormat::Dxt3, 8)),
        FourCC::DXT4 | FourCC::DXT5 => return Ok((PixelFormat::Dxt5, 8)),
        _ => {}
    }

    if flags & DdsPixelFormat::FLAG_RGB != 0 {
        let bit_count = pf.rgb_bit_count;
        if flags & DdsPixelFormat::FLAG_ALPHA_PIXELS != 0 && bit_count == 32 {
            return Ok((PixelFormat::A8r8g8b8, 32));
        }
        if bit_count == 32 {
            return Ok((PixelFormat::X8r8g8b8, 32));
        }
        if bit_count == 15 || bit_count == 16 {
            // Shift each channel mask down until its low bit is set so
            // differently-positioned channels compare equal.
            let mut masks = [
                normalize_mask(pf.a_bit_mask),
                normalize_mask(pf.r_bit_mask),
                normalize_mask(pf.g_bit_mask),
                normalize_mask(pf.b_bit_mask),
            ];
            masks.sort_unstable();
            let mut set: Vec<u32> = masks.to_vec();
            set.dedup();

            let format = match set.as_slice() {
                [0, 31, 63] => PixelFormat::R5g6b5,
                [1, 31] => PixelFormat::A1r5g5b5,
                [15] => PixelFormat::A4r4g4b4,
                _ => return Err(Error::UnknownFormat),
            };
            return Ok((format, 16));
        }
        return Err(Error::UnknownFormat);
    }

    if flags & DdsPixelFormat::FLAG_ALPHA_ONLY != 0 {
        return Ok((PixelFormat::A8, 8));
    }

    if flags & DdsPixelFormat::FLAG_LUMINANCE != 0 {
        if flags & DdsPixelFormat::FLAG_ALPHA_PIXELS != 0 {
            return Ok((PixelFormat::A8y8, 8));
        }
        return Ok((PixelFormat::Y8, 8));
    }

    Err(Error::UnknownFormat)
}

fn normalize_mask(mut mask: u32) -> u32 {
    while mask != 0 && mask & 1 == 0 {
        mask >>= 1;
    }
    mask
}

fn next_mip_dims(w: u32, h: u32, d: u32, min_w: u32, min_h: u32) -> (u32, u32, u32) {
    ((w / 2).max(min_w), (h / 2).max(min_h), (d / 2).max(1))
}

/// Rearrange a cubemap payload from face-major to mip-major order.
///
/// DDS stores every mip level of face 0, then every mip level of face 1,
/// and so on. Bitmap tags store all six faces of the base image, then all
/// six faces of mip 1: slot index = mip * 6 + face. Slice sizes follow each
/// level's own halved dimensions; slices clamp at the end of the payload the
/// same way the size reconciliation does.
fn reorder_cubemap(
    pixel_data: &[u8],
    dims: (u32, u32, u32),
    mip_count: u32,
    bpp: u32,
    mins: (u32, u32),
) -> Vec<u8> {
    let (min_w, min_h) = mins;
    let image_count = mip_count as usize + 1;
    let mut slots: Vec<&[u8]> = vec![&[]; image_count * 6];
    let mut pos = 0usize;

    for face in 0..6 {
        let (mut w, mut h, mut d) = dims;
        for mip in 0..image_count {
            let image_size = (bpp as usize)
                .saturating_mul(w as usize)
                .saturating_mul(h as usize)
                .saturating_mul(d as usize)
                / 8;
            let start = pos.min(pixel_data.len());
            let end = pos.saturating_add(image_size).min(pixel_data.len());
            slots[mip * 6 + face] = &pixel_data[start..end];

            (w, h, d) = next_mip_dims(w, h, d, min_w, min_h);
            pos = pos.saturating_add(image_size);
        }
    }

    slots.concat()
}
