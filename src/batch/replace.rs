//! Optional copy-back of signed images over the originals.

use super::copy::copy_with_metadata;
use crate::error::{Result, SignError};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Question shown after processing
pub const REPLACE_PROMPT: &str = "Replace original files with signed versions? (y/N): ";

/// Ask the operator whether to overwrite the originals
///
/// Only a bare `y` or `Y` confirms; just the line terminator is stripped, so
/// padded answers, an empty line or end of input decline.
pub fn confirm_replace<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<bool> {
    write!(output, "\n{REPLACE_PROMPT}")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(answer
        .trim_end_matches(['\n', '\r'])
        .eq_ignore_ascii_case("y"))
}

/// Copy every signed `.jpg` from `signed_dir` over the same-named file in `original_dir`
///
/// Signed files without an original are skipped. Returns the paths that were
/// overwritten, in name order.
pub fn replace_originals(signed_dir: &Path, original_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(signed_dir).map_err(|e| SignError::io(signed_dir, e))?;

    let mut signed_files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| SignError::io(signed_dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "jpg") {
            signed_files.push(path);
        }
    }
    signed_files.sort();

    let mut replaced = Vec::new();
    for signed in signed_files {
        let Some(name) = signed.file_name() else {
            continue;
        };
        let original = original_dir.join(name);

        if !original.is_file() {
            debug!("No original for {}, skipping", signed.display());
            continue;
        }

        copy_with_metadata(&signed, &original).map_err(|e| SignError::io(&original, e))?;
        println!("🔁 Replaced: {}", name.to_string_lossy());
        replaced.push(original);
    }

    Ok(replaced)
}
