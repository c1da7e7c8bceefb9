//! Appending parsed images to a bitmap tag document.

use std::fmt;

use tagsmith_common::ImageDescriptor;

use crate::document::{
    BitmapEntry, BitmapTagDocument, ContainerFormat, SequenceEntry, MAX_BITMAPS, MAX_SEQUENCES,
    MAX_SEQUENCE_NAME_LEN,
};
use crate::{Error, Result};

/// Non-fatal findings produced while appending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendWarning {
    /// The sequence list is full; the image was added without a new sequence.
    SequenceLimitReached,
}

impl fmt::Display for AppendWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppendWarning::SequenceLimitReached => {
                write!(f, "cannot add more sequences (max of 256 per tag)")
            }
        }
    }
}

/// What an append produced.
#[derive(Debug)]
pub struct AppendOutcome {
    /// Index of the entry that was just added.
    pub entry_index: usize,
    pub warnings: Vec<AppendWarning>,
}

impl BitmapTagDocument {
    /// Append one parsed image to the document.
    ///
    /// A new sequence opens whenever `sequence_name` differs from the most
    /// recently opened sequence's name (truncated to 31 bytes); appending the
    /// same name twice in a row extends the current sequence instead. On the
    /// first append the container-level kind and format are inferred from
    /// the descriptor and locked.
    ///
    /// There is no rollback: if this returns an error the document may have
    /// been partially mutated, and the caller should discard the item it was
    /// processing. Callers that need atomicity must snapshot the document
    /// around the call.
    pub fn append_image(
        &mut self,
        descriptor: &ImageDescriptor,
        pixels: Vec<u8>,
        sequence_name: &str,
    ) -> Result<AppendOutcome> {
        if self.entries.len() >= MAX_BITMAPS {
            return Err(Error::TooManyBitmaps);
        }

        let name = truncate_sequence_name(sequence_name);
        let mut warnings = Vec::new();

        let opens_new = self.sequences.last().map_or(true, |s| s.name != name);
        if opens_new {
            if self.sequences.len() >= MAX_SEQUENCES {
                warnings.push(AppendWarning::SequenceLimitReached);
            } else {
                self.sequences.push(SequenceEntry {
                    name: name.clone(),
                    first_bitmap_index: self.entries.len() as u32,
                    bitmap_count: 0,
                });
            }
        }

        let entry_index = self.entries.len();
        let pixels_offset = self.pixel_data.len() as u32;
        self.entries.push(BitmapEntry {
            bitm_id: *b"bitm",
            width: descriptor.width,
            height: descriptor.height,
            depth: descriptor.depth,
            kind: descriptor.kind,
            format: descriptor.format,
            mip_count: descriptor.mip_count,
            pixels_offset,
            compressed: descriptor.format.is_compressed(),
            // Never re-derived from the actual dimensions.
            power_of_two: true,
            registration_point_x: 0,
            registration_point_y: 0,
        });

        // The count only grows when the image landed in a matching sequence;
        // with the sequence list full and a differing name it stays orphaned.
        if let Some(last) = self.sequences.last_mut() {
            if last.name == name {
                last.bitmap_count += 1;
            }
        }

        if !self.container_locked {
            self.kind = descriptor.kind.into();
            self.format = ContainerFormat::from_pixel_format(descriptor.format);
            self.container_locked = true;
        }

        self.pixel_data.extend_from_slice(&pixels);

        Ok(AppendOutcome {
            entry_index,
            warnings,
        })
    }
}

fn truncate_sequence_name(name: &str) -> String {
    if name.len() <= MAX_SEQUENCE_NAME_LEN {
        return name.to_string();
    }
    let mut end = MAX_SEQUENCE_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_string()
}

#[cfg(test)]
mod tests {
    use tagsmith_common::{ImageDescriptor, PixelFormat, TextureKind};

    use super::*;
    use crate::document::ContainerKind;

    fn descriptor(format: PixelFormat, kind: TextureKind) -> ImageDescriptor {
        ImageDescriptor {
            width: 8,
            height: 8,
            depth: 1,
            kind,
            format,
            mip_count: 0,
        }
    }

    #[test]
    fn test_first_append_locks_container() {
        let mut doc = BitmapTagDocument::new();
        let desc = descriptor(PixelFormat::Dxt5, TextureKind::Cubemap);
        doc.append_image(&desc, vec![0u8; 16], "sky").unwrap();

        assert!(doc.container_locked);
        assert_eq!(doc.kind, ContainerKind::Cubemaps);
        assert_eq!(doc.format, ContainerFormat::InterpolatedAlpha);

        // A later entry with a different format does not re-infer.
        let desc2 = descriptor(PixelFormat::A8, TextureKind::Texture2d);
        doc.append_image(&desc2, vec![0u8; 16], "sky").unwrap();
        assert_eq!(doc.kind, ContainerKind::Cubemaps);
        assert_eq!(doc.format, ContainerFormat::InterpolatedAlpha);
    }

    #[test]
    fn test_pixel_offsets_accumulate() {
        let mut doc = BitmapTagDocument::new();
        let desc = descriptor(PixelFormat::A8r8g8b8, TextureKind::Texture2d);

        let first = doc.append_image(&desc, vec![1u8; 16], "a").unwrap();
        let second = doc.append_image(&desc, vec![2u8; 8], "a").unwrap();

        assert_eq!(doc.entries[first.entry_index].pixels_offset, 0);
        assert_eq!(doc.entries[second.entry_index].pixels_offset, 16);
        assert_eq!(doc.pixel_data.len(), 24);
        assert!(doc.entries[first.entry_index].power_of_two);
        assert!(!doc.entries[first.entry_index].compressed);
    }

    #[test]
    fn test_sequence_grouping_reopens_repeated_names() {
        let mut doc = BitmapTagDocument::new();
        let desc = descriptor(PixelFormat::Dxt1, TextureKind::Texture2d);

        for name in ["alpha", "alpha", "beta", "alpha"] {
            doc.append_image(&desc, Vec::new(), name).unwrap();
        }

        // Re-encountering "alpha" after "beta" opens a fresh sequence.
        assert_eq!(
            doc.sequences,
            vec![
                SequenceEntry {
                    name: "alpha".into(),
                    first_bitmap_index: 0,
                    bitmap_count: 2
                },
                SequenceEntry {
                    name: "beta".into(),
                    first_bitmap_index: 2,
                    bitmap_count: 1
                },
                SequenceEntry {
                    name: "alpha".into(),
                    first_bitmap_index: 3,
                    bitmap_count: 1
                },
            ]
        );
    }

    #[test]
    fn test_bitmap_capacity_is_fatal() {
        let mut doc = BitmapTagDocument::new();
        let desc = descriptor(PixelFormat::Y8, TextureKind::Texture2d);

        for _ in 0..MAX_BITMAPS {
            doc.append_image(&desc, Vec::new(), "fill").unwrap();
        }
        assert_eq!(doc.entries.len(), MAX_BITMAPS);

        let err = doc.append_image(&desc, Vec::new(), "fill").unwrap_err();
        assert!(matches!(err, Error::TooManyBitmaps));
        assert_eq!(doc.entries.len(), MAX_BITMAPS);
    }

    #[test]
    fn test_sequence_capacity_degrades_to_warning() {
        let mut doc = BitmapTagDocument::new();
        let desc = descriptor(PixelFormat::Y8, TextureKind::Texture2d);

        for i in 0..MAX_SEQUENCES {
            doc.append_image(&desc, Vec::new(), &format!("seq{i}")).unwrap();
        }
        assert_eq!(doc.sequences.len(), MAX_SEQUENCES);

        let outcome = doc.append_image(&desc, Vec::new(), "one_more").unwrap();
        assert_eq!(outcome.warnings, vec![AppendWarning::SequenceLimitReached]);
        // The image itself still lands, orphaned from any sequence.
        assert_eq!(doc.entries.len(), MAX_SEQUENCES + 1);
        assert_eq!(doc.sequences.len(), MAX_SEQUENCES);
        assert_eq!(doc.sequences.last().unwrap().bitmap_count, 1);
    }

    #[test]
    fn test_sequence_name_truncated_to_31_bytes() {
        let mut doc = BitmapTagDocument::new();
        let desc = descriptor(PixelFormat::Y8, TextureKind::Texture2d);

        let long = "abcdefghijklmnopqrstuvwxyz0123456789";
        doc.append_image(&desc, Vec::new(), long).unwrap();
        assert_eq!(doc.sequences[0].name, &long[..31]);
    }
}
