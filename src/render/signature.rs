//! Signature rasterizer
//!
//! Renders the vector signature at an exact pixel size. The drawing is
//! stretched to fill the target box, so a source whose aspect ratio differs
//! from the target is distorted rather than letterboxed.

use crate::error::{Result, SignError};
use image::{DynamicImage, ImageFormat};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read an SVG file and render it to `width` x `height` pixels
///
/// The result keeps its alpha channel, so transparent parts of the
/// signature stay transparent when composited.
pub fn rasterize_signature(svg_path: &Path, width: u32, height: u32) -> Result<DynamicImage> {
    let svg_data = fs::read(svg_path).map_err(|e| SignError::io(svg_path, e))?;
    rasterize_svg_data(&svg_data, width, height)
}

/// Render SVG source bytes to an RGBA image of the requested size
pub fn rasterize_svg_data(svg_data: &[u8], width: u32, height: u32) -> Result<DynamicImage> {
    let tree = Tree::from_data(svg_data, &Options::default())?;

    let mut pixmap = Pixmap::new(width, height).ok_or(SignError::Pixmap { width, height })?;

    let size = tree.size();
    let transform = Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    debug!(
        "Rendered {:.1}x{:.1} SVG into {}x{} raster",
        size.width(),
        size.height(),
        width,
        height
    );

    // tiny-skia keeps premultiplied pixels; a PNG round trip hands
    // `image` straight RGBA
    let png = pixmap
        .encode_png()
        .map_err(|e| SignError::Render(e.to_string()))?;

    Ok(image::load_from_memory_with_format(&png, ImageFormat::Png)?)
}
