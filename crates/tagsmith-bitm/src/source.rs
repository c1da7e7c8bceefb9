//! Extraction of the embedded source image from built bitmap tags.
//!
//! Tags built by the original tool chains keep a zlib-compressed copy of the
//! uncompressed source image behind the processed pixel data. Two dialects
//! exist, told apart by the tag-class and engine markers at fixed offsets;
//! they differ in field offsets and in numeric byte order.

use std::io::Read;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use flate2::read::ZlibDecoder;

use tagsmith_common::{ImageDescriptor, PixelFormat, TextureKind};

use crate::{Error, Result};

/// Offset of the 4-byte tag-class marker.
const TAG_CLASS_OFFSET: usize = 36;
/// Offset of the 4-byte engine marker.
const ENGINE_OFFSET: usize = 60;

/// A source image recovered from a built tag.
///
/// The format is always `a8r8g8b8`; the registration point defaults to the
/// image center and is recorded on the entry the caller re-wraps this into.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub descriptor: ImageDescriptor,
    pub pixels: Vec<u8>,
    pub registration_point: (u32, u32),
}

/// Extract the embedded source image from a raw tag file buffer.
pub fn extract_source_image(data: &[u8]) -> Result<SourceImage> {
    let tag_class = slice_at(data, TAG_CLASS_OFFSET, 4)?;
    let engine = slice_at(data, ENGINE_OFFSET, 4)?;

    if tag_class == b"bitm" && engine == b"blam" {
        // Halo 1: big-endian, fields at fixed offsets past the 64-byte header.
        extract_at::<BigEndian>(data, 64 + 24, 64 + 28, 64 + 108)
    } else if tag_class == b"mtib" && engine == b"!MLB" {
        // Halo 2: little-endian; the compressed span starts after the bitmap
        // body, whose size sits just before it.
        let body_size = LittleEndian::read_i32(slice_at(data, 76, 4)?);
        if body_size < 0 {
            return Err(Error::InvalidBodySize(body_size));
        }
        extract_at::<LittleEndian>(data, 64 + 16 + 24, 64 + 16 + 28, 80 + body_size as usize)
    } else {
        Err(Error::UnrecognizedTag)
    }
}

fn extract_at<E: ByteOrder>(
    data: &[u8],
    dims_offset: usize,
    size_offset: usize,
    data_offset: usize,
) -> Result<SourceImage> {
    let dims = slice_at(data, dims_offset, 4)?;
    let width = u32::from(E::read_u16(&dims[0..2]));
    let height = u32::from(E::read_u16(&dims[2..4]));
    let compressed_size = E::read_i32(slice_at(data, size_offset, 4)?);

    // The span clamps at the end of the buffer; a zero, negative, or fully
    // out-of-range size leaves it empty.
    let start = data_offset.min(data.len());
    let end = data_offset
        .saturating_add(compressed_size.max(0) as usize)
        .min(data.len());
    let compressed = &data[start..end.max(start)];

    if compressed.is_empty() {
        return Err(Error::NoSourceImage);
    }
    if compressed.len() < 4 {
        return Err(Error::Truncated {
            offset: data_offset,
            needed: 4,
        });
    }

    let uncompressed_size = E::read_u32(&compressed[..4]);
    if uncompressed_size == 0 {
        return Err(Error::BlankSourceImage);
    }

    let mut pixels = Vec::with_capacity(uncompressed_size as usize);
    ZlibDecoder::new(&compressed[4..])
        .read_to_end(&mut pixels)
        .map_err(|e| Error::Decompression(e.to_string()))?;

    Ok(SourceImage {
        descriptor: ImageDescriptor {
            width,
            height,
            depth: 1,
            kind: TextureKind::Texture2d,
            format: PixelFormat::A8r8g8b8,
            mip_count: 0,
        },
        pixels,
        registration_point: (width / 2, height / 2),
    })
}

fn slice_at(data: &[u8], offset: usize, needed: usize) -> Result<&[u8]> {
    offset
        .checked_add(needed)
        .and_then(|end| data.get(offset..end))
        .ok_or(Error::Truncated { offset, needed })
}
