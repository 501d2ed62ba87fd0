//! Error type shared by the rasterizer, the compositor and the batch driver.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while signing images
#[derive(Debug, Error)]
pub enum SignError {
    /// Filesystem failure, tagged with the path being touched
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Decode or encode failure inside the `image` crate
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The signature file is not a usable SVG document
    #[error("invalid SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),

    /// Requested raster size cannot be allocated (zero or too large)
    #[error("cannot allocate a {width}x{height} signature raster")]
    Pixmap { width: u32, height: u32 },

    /// Rendered pixmap could not be serialized to PNG
    #[error("failed to encode rendered signature: {0}")]
    Render(String),

    /// Built-in self test of the imaging stack failed
    #[error("imaging self-check failed: {0}")]
    Capability(String),
}

impl SignError {
    /// Wrap an `io::Error` with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SignError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SignError>;
