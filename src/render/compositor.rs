//! Compositor
//!
//! Loads a painting, stamps the signature in the bottom-left corner and
//! writes the result as a high quality JPEG.

use super::signature::rasterize_signature;
use crate::error::{Result, SignError};
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, ImageReader, Pixel, RgbImage};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

/// JPEG quality of the signed output
pub const JPEG_QUALITY: u8 = 95;

/// Smallest signature width in pixels
const MIN_SIGNATURE_WIDTH: u32 = 100;
/// Signature width as a percentage of the image width
const SIGNATURE_WIDTH_PERCENT: u64 = 15;
/// Inset from the left and bottom edges, percent of width and height
const EDGE_INSET_PERCENT: u64 = 2;

/// Where and how big the signature is drawn on an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Left edge of the signature
    pub x: i64,
    /// Top edge of the signature (negative when the image is shorter than the inset signature)
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Compute signature size and position for a `width` x `height` image
///
/// The signature is 15% of the image width (never under 100px) with a fixed
/// 3:1 aspect ratio, anchored bottom-left with a 2% inset on each axis.
pub fn signature_placement(width: u32, height: u32) -> Placement {
    let sig_width = MIN_SIGNATURE_WIDTH.max(percent_of(width, SIGNATURE_WIDTH_PERCENT));
    let sig_height = sig_width / 3;

    let offset_x = percent_of(width, EDGE_INSET_PERCENT);
    let offset_y = percent_of(height, EDGE_INSET_PERCENT);

    Placement {
        x: i64::from(offset_x),
        y: i64::from(height) - i64::from(sig_height) - i64::from(offset_y),
        width: sig_width,
        height: sig_height,
    }
}

/// Floor of `percent`% of `value`, in exact integer arithmetic
fn percent_of(value: u32, percent: u64) -> u32 {
    (u64::from(value) * percent / 100) as u32
}

/// Draw `signature` onto `canvas` with its top-left corner at (`x`, `y`)
///
/// Signatures with an alpha channel are blended; opaque ones replace the
/// pixels underneath. Parts falling outside the canvas are clipped, and only
/// the pixels under the signature are touched.
pub fn composite_signature(canvas: &mut RgbImage, signature: &DynamicImage, x: i64, y: i64) {
    if !signature.color().has_alpha() {
        imageops::replace(canvas, &signature.to_rgb8(), x, y);
        return;
    }

    let (canvas_width, canvas_height) = canvas.dimensions();
    for (sx, sy, top) in signature.to_rgba8().enumerate_pixels() {
        let (Ok(cx), Ok(cy)) = (
            u32::try_from(x + i64::from(sx)),
            u32::try_from(y + i64::from(sy)),
        ) else {
            continue;
        };
        if cx >= canvas_width || cy >= canvas_height {
            continue;
        }

        let below = canvas.get_pixel_mut(cx, cy);
        let mut blended = below.to_rgba();
        blended.blend(top);
        *below = blended.to_rgb();
    }
}

/// Sign one image: load, stamp, save as JPEG to `output_path`
///
/// Any failure along the way (decode, SVG render, encode, write) is
/// returned so the caller can count it and move on to the next file.
pub fn add_signature_to_image(
    image_path: &Path,
    signature_path: &Path,
    output_path: &Path,
) -> Result<()> {
    // Sniff the format from the file contents; the extension may lie
    let img = ImageReader::open(image_path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| SignError::io(image_path, e))?
        .decode()?;
    if !matches!(img, DynamicImage::ImageRgb8(_)) {
        debug!("Converting {:?} from {:?} to RGB", image_path.file_name(), img.color());
    }
    let mut canvas = img.into_rgb8();
    let (width, height) = canvas.dimensions();

    let placement = signature_placement(width, height);
    debug!(
        "{}x{} image: signature {}x{} at ({}, {})",
        width, height, placement.width, placement.height, placement.x, placement.y
    );

    let signature = rasterize_signature(signature_path, placement.width, placement.height)?;
    composite_signature(&mut canvas, &signature, placement.x, placement.y);

    save_jpeg(&canvas, output_path)
}

/// Encode `canvas` as a quality-95 JPEG, replacing any existing file
///
/// A file left half-written by a failed encode or write is removed.
fn save_jpeg(canvas: &RgbImage, output_path: &Path) -> Result<()> {
    let file = File::create(output_path).map_err(|e| SignError::io(output_path, e))?;
    let mut writer = BufWriter::new(file);

    let encoded = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY).encode_image(canvas);
    let written = match encoded {
        Ok(()) => writer.flush().map_err(|e| SignError::io(output_path, e)),
        Err(e) => Err(e.into()),
    };

    if written.is_err() {
        drop(writer);
        match fs::remove_file(output_path) {
            Ok(()) => debug!("Removed partial output {}", output_path.display()),
            Err(e) => warn!("Could not remove partial output {}: {}", output_path.display(), e),
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::signature::tests::HALF_BAR_SVG;
    use image::{GenericImageView, ImageFormat, Rgb, Rgba, RgbaImage};
    use std::fs;

    #[test]
    fn test_placement_large_image() {
        let p = signature_placement(2000, 1500);
        assert_eq!(p.width, 300);
        assert_eq!(p.height, 100);
        assert_eq!(p.x, 40);
        assert_eq!(p.y, 1500 - 100 - 30);
    }

    #[test]
    fn test_placement_minimum_width() {
        // 15% of 400 is 60, below the 100px floor
        let p = signature_placement(400, 300);
        assert_eq!(p.width, 100);
        assert_eq!(p.height, 33);
        assert_eq!(p.x, 8);
        assert_eq!(p.y, 300 - 33 - 6);
    }

    #[test]
    fn test_placement_floors_fractions() {
        let p = signature_placement(1234, 777);
        assert_eq!(p.width, 185);
        assert_eq!(p.height, 61);
        assert_eq!(p.x, 24);
        assert_eq!(p.y, 777 - 61 - 15);
    }

    #[test]
    fn test_placement_tiny_image_goes_negative() {
        let p = signature_placement(50, 20);
        assert_eq!(p.y, 20 - 33);
    }

    #[test]
    fn test_composite_opaque_replaces() {
        let mut canvas = RgbImage::from_pixel(20, 20, Rgb([255, 255, 255]));
        let sig = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 2, Rgb([10, 20, 30])));

        composite_signature(&mut canvas, &sig, 3, 5);

        assert_eq!(canvas.get_pixel(3, 5), &Rgb([10, 20, 30]));
        assert_eq!(canvas.get_pixel(6, 6), &Rgb([10, 20, 30]));
        assert_eq!(canvas.get_pixel(7, 6), &Rgb([255, 255, 255]));
        assert_eq!(canvas.get_pixel(3, 7), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_composite_alpha_blends() {
        let mut canvas = RgbImage::from_pixel(10, 10, Rgb([200, 200, 200]));
        let mut sig = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        sig.put_pixel(0, 0, Rgba([0, 0, 0, 255]));

        composite_signature(&mut canvas, &DynamicImage::ImageRgba8(sig), 4, 4);

        assert_eq!(canvas.get_pixel(4, 4), &Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(5, 4), &Rgb([200, 200, 200]));
        assert_eq!(canvas.dimensions(), (10, 10));
    }

    #[test]
    fn test_composite_alpha_clips_and_keeps_rest() {
        let mut canvas = RgbImage::from_pixel(6, 6, Rgb([90, 90, 90]));
        let sig = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));

        // Hangs off the left and bottom edges
        composite_signature(&mut canvas, &DynamicImage::ImageRgba8(sig), -2, 4);

        assert_eq!(canvas.get_pixel(0, 4), &Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(1, 5), &Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(2, 4), &Rgb([90, 90, 90]));
        assert_eq!(canvas.get_pixel(0, 3), &Rgb([90, 90, 90]));
        assert_eq!(canvas.dimensions(), (6, 6));
    }

    #[test]
    fn test_composite_alpha_half_transparent() {
        let mut canvas = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        let sig = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 128]));

        composite_signature(&mut canvas, &DynamicImage::ImageRgba8(sig), 1, 1);

        let mixed = canvas.get_pixel(1, 1)[0];
        assert!((120..=136).contains(&mixed), "got {mixed}");
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_composite_clips_outside_canvas() {
        let mut canvas = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        let sig = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([0, 0, 0])));

        composite_signature(&mut canvas, &sig, 2, -1);

        assert_eq!(canvas.get_pixel(3, 0), &Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(2, 1), &Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(2, 2), &Rgb([255, 255, 255]));
        assert_eq!(canvas.get_pixel(1, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_add_signature_keeps_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("painting.jpg");
        let signature = dir.path().join("signature.svg");
        let output = dir.path().join("signed.jpg");

        RgbImage::from_pixel(800, 600, Rgb([255, 255, 255]))
            .save_with_format(&source, ImageFormat::Jpeg)
            .unwrap();
        fs::write(&signature, HALF_BAR_SVG).unwrap();

        add_signature_to_image(&source, &signature, &output).unwrap();

        let signed = image::open(&output).unwrap();
        assert_eq!(signed.dimensions(), (800, 600));
        let bytes = fs::read(&output).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);

        // Signature is 120x40 at (16, 548); its left half is black
        let p = placement_probe(&signed, 16 + 10, 548 + 20);
        assert!(p < 60, "expected dark signature pixel, got {p}");
        let p = placement_probe(&signed, 16 + 100, 548 + 20);
        assert!(p > 200, "expected untouched background, got {p}");
    }

    #[test]
    fn test_add_signature_converts_grayscale() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("gray.png");
        let signature = dir.path().join("signature.svg");
        let output = dir.path().join("gray_signed.jpg");

        image::GrayImage::from_pixel(300, 200, image::Luma([128]))
            .save(&source)
            .unwrap();
        fs::write(&signature, HALF_BAR_SVG).unwrap();

        add_signature_to_image(&source, &signature, &output).unwrap();

        let signed = image::open(&output).unwrap();
        assert_eq!(signed.dimensions(), (300, 200));
        assert_eq!(signed.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_add_signature_reads_png_named_jpg() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("painting.jpg");
        let signature = dir.path().join("signature.svg");
        let output = dir.path().join("painting_signed.jpg");

        RgbImage::from_pixel(500, 400, Rgb([20, 120, 60]))
            .save_with_format(&source, ImageFormat::Png)
            .unwrap();
        fs::write(&signature, HALF_BAR_SVG).unwrap();

        add_signature_to_image(&source, &signature, &output).unwrap();

        let bytes = fs::read(&output).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        assert_eq!(image::open(&output).unwrap().dimensions(), (500, 400));
    }

    #[test]
    fn test_failed_save_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("too_wide.jpg");

        // JPEG caps each dimension at 65535 pixels
        let canvas = RgbImage::new(70_000, 1);

        assert!(save_jpeg(&canvas, &output).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_add_signature_bad_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.jpg");
        let signature = dir.path().join("signature.svg");
        let output = dir.path().join("out.jpg");

        fs::write(&source, b"not a jpeg").unwrap();
        fs::write(&signature, HALF_BAR_SVG).unwrap();

        assert!(add_signature_to_image(&source, &signature, &output).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_add_signature_bad_svg_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("painting.jpg");
        let signature = dir.path().join("signature.svg");
        let output = dir.path().join("out.jpg");

        RgbImage::from_pixel(200, 200, Rgb([0, 0, 255]))
            .save_with_format(&source, ImageFormat::Jpeg)
            .unwrap();
        fs::write(&signature, "<svg").unwrap();

        assert!(add_signature_to_image(&source, &signature, &output).is_err());
        assert!(!output.exists());
    }

    /// Mean of the RGB channels at (x, y)
    fn placement_probe(img: &DynamicImage, x: u32, y: u32) -> u32 {
        let px = img.get_pixel(x, y);
        (u32::from(px[0]) + u32::from(px[1]) + u32::from(px[2])) / 3
    }
}
