//! Candidate image discovery.

use crate::error::{Result, SignError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions picked up by the scan (exact match, these four spellings only)
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "JPG", "JPEG"];

/// Service images (avatars, brush textures, QR codes, contacts, social icons)
/// that must never be signed; matched case-insensitively against the file stem
pub const EXCLUDED_NAME_PARTS: [&str; 5] = ["avatar", "brush", "qr", "tel", "social"];

/// Whether `path` names a painting that should receive a signature
pub fn is_candidate(path: &Path) -> bool {
    let has_image_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext));

    has_image_extension && !is_excluded(path)
}

/// Whether the file stem contains one of the excluded name parts
pub fn is_excluded(path: &Path) -> bool {
    let stem = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_lowercase();

    EXCLUDED_NAME_PARTS.iter().any(|part| stem.contains(part))
}

/// List the candidate images directly inside `dir` (no recursion), sorted by name
///
/// A missing folder yields an empty list.
pub fn find_candidate_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            SignError::io(path, e.into())
        })?;
        let path = entry.path();

        // Only process files (not directories)
        if !path.is_file() {
            continue;
        }

        if is_candidate(path) {
            images.push(path.to_path_buf());
        }
    }

    Ok(images)
}
