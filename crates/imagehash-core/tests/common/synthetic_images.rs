//! Images generated in code, so fixtures can be derived by hand.
#![allow(dead_code)]

use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// White left half, black right half
pub fn half_white_half_black(size: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(size, size, |x, _| {
        if x < size / 2 {
            WHITE
        } else {
            BLACK
        }
    }))
}

pub fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

/// Grey level rising from 0 at the left edge to 255 at the right edge
pub fn horizontal_gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / (width - 1).max(1)) as u8;
        Rgb([v, v, v])
    }))
}

/// `cells × cells` blocks of pseudo-random colour, deterministic in `seed`
pub fn blocks(size: u32, cells: u32, seed: u64) -> DynamicImage {
    let palette = block_palette(cells, seed);
    let cell = (size / cells).max(1);

    DynamicImage::ImageRgb8(RgbImage::from_fn(size, size, |x, y| {
        let cx = (x / cell).min(cells - 1);
        let cy = (y / cell).min(cells - 1);
        palette[(cy * cells + cx) as usize]
    }))
}

fn block_palette(cells: u32, seed: u64) -> Vec<Rgb<u8>> {
    let mut state = seed | 1;
    (0..cells * cells)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let [r, g, b, ..] = state.to_le_bytes();
            Rgb([r, g, b])
        })
        .collect()
}

/// Colour negative of `img`
pub fn inverted(img: &DynamicImage) -> DynamicImage {
    let mut copy = img.clone();
    copy.invert();
    copy
}

/// Same pixels with an opaque alpha channel
pub fn with_alpha(img: &DynamicImage) -> DynamicImage {
    let rgba: RgbaImage = img.to_rgba8();
    DynamicImage::ImageRgba8(rgba)
}

/// Encode as PNG and decode again
pub fn png_round_trip(img: &DynamicImage) -> DynamicImage {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .unwrap();
    image::load_from_memory(&bytes).unwrap()
}

/// Save `img` as `<dir>/<name>.png`
pub fn write_png(dir: &Path, name: &str, img: &DynamicImage) -> PathBuf {
    let path = dir.join(format!("{}.png", name));
    img.save(&path).unwrap();
    path
}
