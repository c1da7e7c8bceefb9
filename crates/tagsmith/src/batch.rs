//! Batch compilation of DDS inputs into bitmap tag documents.
//!
//! The batch layer owns no format knowledge: it sequences the DDS parser and
//! the tag builder over a list of already-loaded inputs and collects per-file
//! failures and warnings instead of aborting. File I/O stays with the caller.

use std::path::{Path, PathBuf};

use tagsmith_bitm::BitmapTagDocument;
use tagsmith_dds::parse_dds;

/// How a batch maps inputs to output tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileMode {
    /// One tag per input file.
    Separate,
    /// Every input appended into a single combined tag.
    Merged,
}

/// One input file, already read into memory.
#[derive(Debug)]
pub struct BatchInput {
    pub path: PathBuf,
    pub data: Vec<u8>,
}

/// A finished document, named after the input it came from and ready for the
/// external tag system to save.
#[derive(Debug)]
pub struct CompiledTag {
    pub name: String,
    pub document: BitmapTagDocument,
}

/// Everything a batch produced, including what went wrong.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub tags: Vec<CompiledTag>,
    /// Inputs that were skipped, with the reason.
    pub failures: Vec<(PathBuf, String)>,
    /// Non-fatal findings for inputs that still compiled.
    pub warnings: Vec<(PathBuf, String)>,
}

/// Compile a list of DDS inputs into bitmap tag documents.
///
/// Inputs are processed in sorted path order. A failing input is recorded
/// and skipped; it never aborts the rest of the batch.
pub fn compile_dds_batch(mut inputs: Vec<BatchInput>, mode: CompileMode) -> BatchReport {
    inputs.sort_by(|a, b| a.path.cmp(&b.path));

    let mut report = BatchReport::default();

    match mode {
        CompileMode::Separate => {
            for input in &inputs {
                let mut document = BitmapTagDocument::new();
                match append_input(&mut document, input, &mut report.warnings) {
                    Ok(()) => report.tags.push(CompiledTag {
                        name: tag_name(&input.path),
                        document,
                    }),
                    Err(message) => report.failures.push((input.path.clone(), message)),
                }
            }
        }
        CompileMode::Merged => {
            let mut document = BitmapTagDocument::new();
            let mut name = None;
            for input in &inputs {
                match append_input(&mut document, input, &mut report.warnings) {
                    Ok(()) => {
                        name.get_or_insert_with(|| tag_name(&input.path));
                    }
                    Err(message) => report.failures.push((input.path.clone(), message)),
                }
            }
            if let Some(name) = name {
                report.tags.push(CompiledTag { name, document });
            }
        }
    }

    report
}

fn append_input(
    document: &mut BitmapTagDocument,
    input: &BatchInput,
    warnings: &mut Vec<(PathBuf, String)>,
) -> Result<(), String> {
    let parsed = parse_dds(&input.data).map_err(|e| e.to_string())?;
    for warning in &parsed.warnings {
        warnings.push((input.path.clone(), warning.to_string()));
    }

    let sequence_name = sequence_name_for_path(&input.path);
    let outcome = document
        .append_image(&parsed.descriptor, parsed.pixels, &sequence_name)
        .map_err(|e| e.to_string())?;
    for warning in &outcome.warnings {
        warnings.push((input.path.clone(), warning.to_string()));
    }

    Ok(())
}

/// Derive the sequence-name hint for an input file: the file stem,
/// lowercased, with anything after a literal `#` stripped.
pub fn sequence_name_for_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    match stem.split_once('#') {
        Some((base, _)) => base.to_string(),
        None => stem,
    }
}

fn tag_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string()
}

#[cfg(test)]
mod tests {
    use tagsmith_common::IntoBytes;
    use tagsmith_dds::{DdsHeader, DdsPixelFormat, FourCC, DDS_MAGIC};

    use super::*;

    fn small_dds() -> Vec<u8> {
        let header = DdsHeader {
            size: DdsHeader::SIZE,
            flags: DdsHeader::FLAG_PIXELFORMAT,
            height: 4,
            width: 4,
            pitch_or_linear_size: 0,
            depth: 1,
            mipmap_count: 1,
            reserved1: [0; 11],
            pixel_format: DdsPixelFormat {
                size: 32,
                flags: DdsPixelFormat::FLAG_RGB | DdsPixelFormat::FLAG_ALPHA_PIXELS,
                four_cc: FourCC::NONE,
                rgb_bit_count: 32,
                r_bit_mask: 0x00FF_0000,
                g_bit_mask: 0x0000_FF00,
                b_bit_mask: 0x0000_00FF,
                a_bit_mask: 0xFF00_0000,
            },
            caps: 0,
            caps2: 0,
            caps3: 0,
            caps4: 0,
            reserved2: 0,
        };

        let mut data = DDS_MAGIC.to_vec();
        data.extend_from_slice(header.as_bytes());
        data.extend_from_slice(&[0u8; 4 * 4 * 4]);
        data
    }

    fn input(path: &str) -> BatchInput {
        BatchInput {
            path: PathBuf::from(path),
            data: small_dds(),
        }
    }

    #[test]
    fn test_sequence_name_for_path() {
        assert_eq!(sequence_name_for_path(Path::new("Ice_Caps#3.dds")), "ice_caps");
        assert_eq!(sequence_name_for_path(Path::new("dir/Rocket.dds")), "rocket");
        assert_eq!(sequence_name_for_path(Path::new("plain")), "plain");
    }

    #[test]
    fn test_separate_mode_builds_one_tag_per_input() {
        let report = compile_dds_batch(
            vec![input("b.dds"), input("a.dds")],
            CompileMode::Separate,
        );

        assert_eq!(report.tags.len(), 2);
        // Sorted by path before processing.
        assert_eq!(report.tags[0].name, "a.dds");
        assert_eq!(report.tags[1].name, "b.dds");
        assert!(report.failures.is_empty());
        for tag in &report.tags {
            assert_eq!(tag.document.entries.len(), 1);
        }
    }

    #[test]
    fn test_merged_mode_builds_single_tag() {
        let report = compile_dds_batch(
            vec![input("a.dds"), input("b.dds"), input("c.dds")],
            CompileMode::Merged,
        );

        assert_eq!(report.tags.len(), 1);
        assert_eq!(report.tags[0].name, "a.dds");
        assert_eq!(report.tags[0].document.entries.len(), 3);
        assert_eq!(report.tags[0].document.sequences.len(), 3);
    }

    #[test]
    fn test_failures_do_not_abort_the_batch() {
        let bad = BatchInput {
            path: PathBuf::from("bad.dds"),
            data: b"not a dds file".to_vec(),
        };
        let report = compile_dds_batch(vec![bad, input("ok.dds")], CompileMode::Separate);

        assert_eq!(report.tags.len(), 1);
        assert_eq!(report.tags[0].name, "ok.dds");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, PathBuf::from("bad.dds"));
    }

    #[test]
    fn test_merged_mode_with_all_failures_yields_no_tag() {
        let bad = BatchInput {
            path: PathBuf::from("bad.dds"),
            data: Vec::new(),
        };
        let report = compile_dds_batch(vec![bad], CompileMode::Merged);

        assert!(report.tags.is_empty());
        assert_eq!(report.failures.len(), 1);
    }
}
