//! Output folder creation and the one-time backup of the input folder.

use super::copy::copy_with_metadata;
use crate::config::RunConfig;
use crate::error::{Result, SignError};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Create the output folder and, when enabled, back up the input folder
///
/// The backup is taken only once: if the backup folder already exists it is
/// left untouched (no merge, no versioning).
pub fn setup_directories(config: &RunConfig) -> Result<()> {
    fs::create_dir_all(&config.output_dir).map_err(|e| SignError::io(&config.output_dir, e))?;

    let Some(backup_dir) = &config.backup_dir else {
        debug!("Backup disabled");
        return Ok(());
    };

    if backup_dir.exists() {
        debug!("Backup already present at {}, skipping", backup_dir.display());
        return Ok(());
    }

    println!("💾 Creating backup...");
    let copied = copy_tree(&config.input_dir, backup_dir)?;
    info!(files = copied, "Backup written to {}", backup_dir.display());
    println!("💾 Backup created: {}", backup_dir.display());

    Ok(())
}

/// Recursively copy `src` into a new folder `dst`
///
/// File modification times are carried over. Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            SignError::io(path, e.into())
        })?;

        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| SignError::io(&target, e))?;
        } else {
            copy_with_metadata(entry.path(), &target)
                .map_err(|e| SignError::io(entry.path(), e))?;
            copied += 1;
        }
    }

    Ok(copied)
}
