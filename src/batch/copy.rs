//! File copy that keeps permissions and modification time.

use std::fs::{self, File};
use std::io;
use std::path::Path;

/// Copy file contents and permissions, then carry over the modification time
pub fn copy_with_metadata(src: &Path, dst: &Path) -> io::Result<()> {
    fs::copy(src, dst)?;

    let modified = fs::metadata(src)?.modified()?;
    File::options().write(true).open(dst)?.set_modified(modified)
}
