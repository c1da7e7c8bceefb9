//! Tagsmith CLI - compile bitmap tags from DDS images.
//!
//! This is the main entry point for the tagsmith command-line application.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use tagsmith::prelude::*;

/// Tagsmith - bitmap tag compilation tool
#[derive(Parser)]
#[command(name = "tagsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile DDS images into bitmap tags
    Compile {
        /// DDS files to compile
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Combine every input into a single tag instead of one tag each
        #[arg(short, long)]
        merged: bool,
    },

    /// Extract the embedded source image from built bitmap tags
    ExtractSource {
        /// Bitmap tag files, or directories to search for them
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile { inputs, merged } => {
            cmd_compile(&inputs, merged)?;
        }
        Commands::ExtractSource { inputs } => {
            cmd_extract_source(&inputs)?;
        }
    }

    Ok(())
}

fn cmd_compile(paths: &[PathBuf], merged: bool) -> Result<()> {
    let mut inputs = Vec::new();
    for path in paths {
        let is_dds = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("dds"));
        if !is_dds {
            eprintln!("    skipping non-dds input: {}", path.display());
            continue;
        }

        match fs::read(path) {
            Ok(data) => inputs.push(BatchInput {
                path: path.clone(),
                data,
            }),
            Err(e) => eprintln!("    could not read {}: {}", path.display(), e),
        }
    }

    if inputs.is_empty() {
        bail!("no dds inputs to compile");
    }

    let mode = if merged {
        CompileMode::Merged
    } else {
        CompileMode::Separate
    };

    println!("Compiling {} dds file(s)...", inputs.len());
    let report = compile_dds_batch(inputs, mode);

    for (path, message) in &report.failures {
        eprintln!("    {}: {}", path.display(), message);
    }
    for (path, message) in &report.warnings {
        eprintln!("    {}: {}", path.display(), message);
    }

    for tag in &report.tags {
        print_tag_summary(tag);
    }

    println!(
        "Compiled {} tag(s), {} input(s) failed",
        report.tags.len(),
        report.failures.len()
    );

    Ok(())
}

fn cmd_extract_source(inputs: &[PathBuf]) -> Result<()> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
                let is_tag = entry.file_type().is_file()
                    && entry
                        .path()
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("bitmap"));
                if is_tag {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(input.clone());
        }
    }
    files.sort();

    if files.is_empty() {
        bail!("no bitmap tags to extract from");
    }

    println!("Extracting source images from {} tag(s)...", files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let mut extracted = 0;
    let mut errors = 0;

    for path in &files {
        match extract_one(path) {
            Ok(document) => {
                let entry = &document.entries[0];
                pb.println(format!(
                    "    {}: {}x{} {}",
                    path.display(),
                    entry.width,
                    entry.height,
                    entry.format
                ));
                extracted += 1;
            }
            Err(e) => {
                eprintln!("    {}: {}", path.display(), e);
                errors += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!("Extracted {} source image(s) ({} errors)", extracted, errors);

    Ok(())
}

/// Re-wrap one tag's embedded source image as a fresh single-entry document.
fn extract_one(path: &Path) -> Result<BitmapTagDocument> {
    let data = fs::read(path).context("failed to read tag file")?;
    let source = extract_source_image(&data)?;

    let mut document = BitmapTagDocument::new();
    let outcome = document.append_image(
        &source.descriptor,
        source.pixels,
        &sequence_name_for_path(path),
    )?;

    let entry = &mut document.entries[outcome.entry_index];
    entry.registration_point_x = source.registration_point.0;
    entry.registration_point_y = source.registration_point.1;

    Ok(document)
}

fn print_tag_summary(tag: &CompiledTag) {
    let doc = &tag.document;
    println!(
        "  {}: {} bitmap(s), {} sequence(s), {} pixel bytes [{} / {}]",
        tag.name,
        doc.entries.len(),
        doc.sequences.len(),
        doc.pixel_data.len(),
        doc.kind,
        doc.format
    );
    for seq in &doc.sequences {
        println!(
            "      sequence '{}': bitmaps {}..{}",
            seq.name,
            seq.first_bitmap_index,
            seq.first_bitmap_index + seq.bitmap_count
        );
    }
}
