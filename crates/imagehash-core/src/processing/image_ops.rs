//! Image-side collaborators of the hash builders: decoding, resizing and luma conversion.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage};
use std::path::Path;

use crate::error::{Error, Result};

/// Row-major grid of luma values, as produced by [`grayscale`].
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f64>,
}

impl Grid {
    /// Value at column `x`, row `y`
    #[cfg(test)]
    fn get(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    /// The rows of the grid, top to bottom
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.values.chunks_exact(self.width.max(1))
    }
}

/// Decode an image file, guessing the format from its contents and extension.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    log::trace!("decoding {}", path.display());
    Ok(image::open(path)?)
}

/// Whether `path` has the extension of an image format the decoder knows.
pub fn is_supported_image<P: AsRef<Path>>(path: P) -> bool {
    ImageFormat::from_path(path).is_ok()
}

/// Decode an in-memory encoded image.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Reject images the builders cannot work with.
///
/// An image with a zero width or height has no pixels to hash.
pub fn validate(img: &DynamicImage) -> Result<()> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        log::warn!("rejecting empty {}x{} image", width, height);
        return Err(Error::InvalidInput(format!(
            "image is empty ({}x{})",
            width, height
        )));
    }
    Ok(())
}

/// Bilinear resize to exactly `width × height` RGB pixels.
pub fn resize(img: &DynamicImage, width: u32, height: u32) -> RgbImage {
    img.resize_exact(width, height, FilterType::Triangle).to_rgb8()
}

/// Luma of every pixel, `0.299·R + 0.587·G + 0.114·B`.
pub fn grayscale(pixels: &RgbImage) -> Grid {
    let values = pixels
        .pixels()
        .map(|p| 0.299 * p[0] as f64 + 0.587 * p[1] as f64 + 0.114 * p[2] as f64)
        .collect();

    Grid {
        width: pixels.width() as usize,
        height: pixels.height() as usize,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Rgb};
    use std::io::Cursor;

    fn two_tone(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        }))
    }

    #[test]
    fn empty_image_is_invalid() {
        let img = DynamicImage::new_rgb8(0, 10);
        assert!(matches!(validate(&img), Err(Error::InvalidInput(_))));
        assert!(validate(&two_tone(4, 4)).is_ok());
    }

    #[test]
    fn resize_hits_exact_dimensions() {
        let resized = resize(&two_tone(37, 21), 9, 8);
        assert_eq!(resized.dimensions(), (9, 8));
    }

    #[test]
    fn grayscale_weights() {
        let pixels = RgbImage::from_vec(3, 1, vec![255, 0, 0, 0, 255, 0, 0, 0, 255]).unwrap();
        let grid = grayscale(&pixels);

        assert_eq!((grid.width, grid.height), (3, 1));
        assert!((grid.get(0, 0) - 76.245).abs() < 1e-9);
        assert!((grid.get(1, 0) - 149.685).abs() < 1e-9);
        assert!((grid.get(2, 0) - 29.07).abs() < 1e-9);
    }

    #[test]
    fn rows_walk_the_grid() {
        let grid = grayscale(&resize(&two_tone(8, 8), 4, 2));
        assert_eq!(grid.rows().count(), 2);
        assert!(grid.rows().all(|row| row.len() == 4));
    }

    #[test]
    fn decodes_encoded_bytes() {
        let mut bytes = Vec::new();
        two_tone(16, 16)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();

        let decoded = decode_image_bytes(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (16, 16));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(
            decode_image_bytes(b"definitely not an image"),
            Err(Error::Image(_))
        ));
    }

    #[test]
    fn recognizes_image_extensions() {
        assert!(is_supported_image("photos/cat.JPG"));
        assert!(is_supported_image("scan.png"));
        assert!(!is_supported_image("notes.txt"));
        assert!(!is_supported_image("no_extension"));
    }

    #[test]
    fn missing_file_fails_to_decode() {
        assert!(decode_image("/nonexistent/imagehash/input.png").is_err());
    }
}
