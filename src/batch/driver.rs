//! Batch driver: setup, scan, sign every candidate, then offer to replace the originals.

use super::replace::{confirm_replace, replace_originals};
use super::scan::find_candidate_images;
use super::setup::setup_directories;
use crate::config::RunConfig;
use crate::error::{Result, SignError};
use crate::render::compositor::add_signature_to_image;
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Tally of one batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Candidates found in the input folder
    pub found: usize,
    /// Signed successfully
    pub processed: usize,
    /// Failed to sign
    pub errors: usize,
    /// Originals overwritten after confirmation
    pub replaced: usize,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No candidate images in the input folder
    NoImages,
    /// Signature file does not exist; nothing was processed
    MissingSignature,
    /// Every candidate went through the compositor
    Completed(RunSummary),
}

/// Run the whole pipeline
///
/// `answers` and `prompt` carry the final yes/no question, so the caller
/// decides where the interactive step reads from and writes to.
pub fn run<R: BufRead, W: Write>(config: &RunConfig, answers: R, prompt: W) -> Result<RunOutcome> {
    setup_directories(config)?;

    let image_files = find_candidate_images(&config.input_dir)?;
    println!("🔍 Found {} images to process", image_files.len());

    if image_files.is_empty() {
        println!("❌ No images found to process!");
        return Ok(RunOutcome::NoImages);
    }

    if !config.signature_path.exists() {
        println!(
            "❌ Signature file not found: {}",
            config.signature_path.display()
        );
        return Ok(RunOutcome::MissingSignature);
    }

    let mut summary = RunSummary {
        found: image_files.len(),
        ..Default::default()
    };

    for image_path in &image_files {
        let Some(name) = image_path.file_name() else {
            continue;
        };
        let output_path = config.output_dir.join(name);
        let name = name.to_string_lossy();
        println!("🖌️  Processing: {}", name);

        match add_signature_to_image(image_path, &config.signature_path, &output_path) {
            Ok(()) => {
                println!("✓ Processed: {}", name);
                summary.processed += 1;
            }
            Err(e) => {
                warn!("Failed to sign {}: {}", image_path.display(), e);
                println!("✗ Error: {}", name);
                summary.errors += 1;
            }
        }
    }

    println!("\n✅ Processing complete!");
    println!("Successfully processed: {} files", summary.processed);
    if summary.errors > 0 {
        println!("Errors: {}", summary.errors);
    }
    println!(
        "\n📁 Signed images saved to: {}",
        config.output_dir.display()
    );
    info!(
        found = summary.found,
        processed = summary.processed,
        errors = summary.errors,
        "Batch finished"
    );

    let confirmed =
        confirm_replace(answers, prompt).map_err(|e| SignError::io("<stdin>", e))?;
    if confirmed {
        println!("🔁 Replacing original files...");
        let replaced = replace_originals(&config.output_dir, &config.input_dir)?;
        summary.replaced = replaced.len();

        println!("✅ Done! {} files replaced.", summary.replaced);
        if let Some(backup_dir) = &config.backup_dir {
            println!("💾 Backups are in: {}", backup_dir.display());
        }
    }

    Ok(RunOutcome::Completed(summary))
}
