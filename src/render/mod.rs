//! Rendering module
//!
//! This module handles:
//! - Rasterizing the SVG signature at an exact pixel size
//! - Sizing and placing the signature on each painting
//! - Compositing and writing the signed JPEG

pub mod compositor;
pub mod signature;

use crate::error::{Result, SignError};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

/// Minimal SVG used to prove the vector renderer works
const SELF_CHECK_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="3" height="1"><rect width="3" height="1" fill="black"/></svg>"#;

/// Exercise the SVG renderer and the JPEG encoder once before touching any files
pub fn check_capabilities() -> Result<()> {
    signature::rasterize_svg_data(SELF_CHECK_SVG.as_bytes(), 3, 1)
        .map_err(|e| SignError::Capability(format!("SVG rendering unavailable: {e}")))?;

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, compositor::JPEG_QUALITY)
        .encode_image(&RgbImage::from_pixel(1, 1, Rgb([255, 255, 255])))
        .map_err(|e| SignError::Capability(format!("JPEG encoding unavailable: {e}")))?;

    Ok(())
}
