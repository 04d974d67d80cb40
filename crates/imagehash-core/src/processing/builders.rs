//! # Hash Builders
//!
//! Turn a decoded image into a hash value. Every builder follows the same steps:
//!
//! 1. Reject empty images and hash sizes outside `1..=MAX_HASH_SIZE`
//! 2. Resize to the algorithm's working resolution and convert to luma
//! 3. Optionally transform the grid (DCT or Haar DWT)
//! 4. Threshold `s²` values and pack the decisions row-major, most significant bit first
//!
//! | Algorithm  | Working size          | Decision                          |
//! |------------|-----------------------|-----------------------------------|
//! | Average    | `s × s`               | pixel > mean                      |
//! | Difference | `(s + 1) × s`         | pixel < right neighbour           |
//! | Perceptual | `s² × s²`             | low-frequency DCT coeff. > median |
//! | Wavelet    | `N × N`, `N = 2^k ≥ s` | LL band coefficient > median      |
//!
//! The fixed builders use `s = 8` and return an [`ImageHash`]; the `_extend` variants
//! take any `s` and return an [`ExtImageHash`] of `ceil(s² / 64)` words. For `s = 8`
//! both produce the same text.

use image::{DynamicImage, GenericImageView};
use log::{debug, trace};
use std::path::Path;

use super::block::extract_low_frequency_block;
use super::image_ops::{decode_image, grayscale, resize, validate};
use super::stats::{mean, median};
use super::transforms::{
    dct_2d, dwt_2d, floor_power_of_two, idwt_2d, par_dct_2d, PARALLEL_DCT_THRESHOLD,
};
use crate::config::MAX_HASH_SIZE;
use crate::error::{Error, Result};
use crate::hash::{bits, ExtImageHash, ImageHash};
use crate::types::{HashAlgorithm, Kind};

/// Hash size of the 64-bit builders
pub const FIXED_HASH_SIZE: u32 = 8;

/// 64-bit average hash.
pub fn average_hash(img: &DynamicImage) -> Result<ImageHash> {
    into_fixed(average_words(img, FIXED_HASH_SIZE)?, Kind::AverageHash)
}

/// 64-bit difference hash.
pub fn difference_hash(img: &DynamicImage) -> Result<ImageHash> {
    into_fixed(difference_words(img, FIXED_HASH_SIZE)?, Kind::DifferenceHash)
}

/// 64-bit perceptual (DCT) hash.
pub fn perceptual_hash(img: &DynamicImage) -> Result<ImageHash> {
    into_fixed(
        perceptual_words(img, FIXED_HASH_SIZE, true)?,
        Kind::PerceptualHash,
    )
}

/// 64-bit wavelet (Haar) hash.
pub fn wavelet_hash(img: &DynamicImage) -> Result<ImageHash> {
    into_fixed(wavelet_words(img, FIXED_HASH_SIZE)?, Kind::WaveletHash)
}

/// Average hash of `hash_size²` bits.
pub fn average_hash_extend(img: &DynamicImage, hash_size: u32) -> Result<ExtImageHash> {
    ExtImageHash::new(average_words(img, hash_size)?, Kind::AverageHash)
}

/// Difference hash of `hash_size²` bits.
pub fn difference_hash_extend(img: &DynamicImage, hash_size: u32) -> Result<ExtImageHash> {
    ExtImageHash::new(difference_words(img, hash_size)?, Kind::DifferenceHash)
}

/// Perceptual hash of `hash_size²` bits.
pub fn perceptual_hash_extend(img: &DynamicImage, hash_size: u32) -> Result<ExtImageHash> {
    ExtImageHash::new(
        perceptual_words(img, hash_size, true)?,
        Kind::PerceptualHash,
    )
}

/// Wavelet hash of `hash_size²` bits. `hash_size` must be a power of two.
pub fn wavelet_hash_extend(img: &DynamicImage, hash_size: u32) -> Result<ExtImageHash> {
    ExtImageHash::new(wavelet_words(img, hash_size)?, Kind::WaveletHash)
}

/// Runs one configured algorithm at one hash size.
///
/// Usually built through [`HasherConfig::to_hasher`](crate::HasherConfig::to_hasher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hasher {
    algorithm: HashAlgorithm,
    hash_size: u32,
    parallel_dct: bool,
}

impl Hasher {
    pub fn new(algorithm: HashAlgorithm, hash_size: u32) -> Self {
        Self {
            algorithm,
            hash_size,
            parallel_dct: true,
        }
    }

    /// Allow the perceptual hash to run its DCT on the rayon pool for large grids
    pub fn with_parallel_dct(mut self, parallel_dct: bool) -> Self {
        self.parallel_dct = parallel_dct;
        self
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn hash_size(&self) -> u32 {
        self.hash_size
    }

    /// Hash a decoded image.
    pub fn hash_image(&self, img: &DynamicImage) -> Result<ExtImageHash> {
        let size = self.hash_size;
        let words = match self.algorithm {
            HashAlgorithm::Average => average_words(img, size)?,
            HashAlgorithm::Difference => difference_words(img, size)?,
            HashAlgorithm::Perceptual => perceptual_words(img, size, self.parallel_dct)?,
            HashAlgorithm::Wavelet => wavelet_words(img, size)?,
        };

        let hash = ExtImageHash::new(words, self.algorithm.kind())?;
        let (width, height) = img.dimensions();
        debug!(
            "{} of {}x{} image at size {}: {}",
            hash.kind(),
            width,
            height,
            size,
            hash
        );
        Ok(hash)
    }

    /// Decode the image at `path` and hash it.
    pub fn hash_path<P: AsRef<Path>>(&self, path: P) -> Result<ExtImageHash> {
        let path = path.as_ref();
        let img = decode_image(path)?;
        let hash = self.hash_image(&img)?;
        debug!("hashed {}", path.display());
        Ok(hash)
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new(HashAlgorithm::default(), FIXED_HASH_SIZE)
    }
}

fn into_fixed(words: Vec<u64>, kind: Kind) -> Result<ImageHash> {
    match words.as_slice() {
        [word] => Ok(ImageHash::new(*word, kind)),
        words => Err(Error::InvalidInput(format!(
            "64-bit hash built from {} words",
            words.len()
        ))),
    }
}

fn check_input(img: &DynamicImage, hash_size: u32) -> Result<()> {
    validate(img)?;
    if hash_size == 0 {
        log::warn!("rejecting zero hash size");
        return Err(Error::InvalidInput("hash size must be positive".to_string()));
    }
    // the perceptual grid is hash_size⁴ cells
    if hash_size > MAX_HASH_SIZE {
        log::warn!("rejecting hash size {}", hash_size);
        return Err(Error::InvalidInput(format!(
            "hash size must be at most {}, got {}",
            MAX_HASH_SIZE, hash_size
        )));
    }
    Ok(())
}

fn average_words(img: &DynamicImage, hash_size: u32) -> Result<Vec<u64>> {
    check_input(img, hash_size)?;

    let grid = grayscale(&resize(img, hash_size, hash_size));
    let avg = mean(&grid.values);
    trace!("average hash threshold {}", avg);

    Ok(bits::pack(grid.values.iter().map(|&p| p > avg)))
}

fn difference_words(img: &DynamicImage, hash_size: u32) -> Result<Vec<u64>> {
    check_input(img, hash_size)?;

    let grid = grayscale(&resize(img, hash_size + 1, hash_size));

    Ok(bits::pack(
        grid.rows()
            .flat_map(|row| row.windows(2).map(|pair| pair[0] < pair[1])),
    ))
}

fn perceptual_words(img: &DynamicImage, hash_size: u32, parallel: bool) -> Result<Vec<u64>> {
    check_input(img, hash_size)?;

    let side = hash_size * hash_size;
    let grid = grayscale(&resize(img, side, side));

    let coefficients = if parallel && grid.values.len() >= PARALLEL_DCT_THRESHOLD {
        par_dct_2d(&grid.values, grid.width, grid.height)
    } else {
        dct_2d(&grid.values, grid.width, grid.height)
    };

    let block = extract_low_frequency_block(
        &coefficients,
        grid.width,
        grid.height,
        hash_size as usize,
    )?;
    let threshold = median(&block);
    trace!("perceptual hash threshold {}", threshold);

    Ok(bits::pack(block.iter().map(|&c| c > threshold)))
}

fn wavelet_words(img: &DynamicImage, hash_size: u32) -> Result<Vec<u64>> {
    check_input(img, hash_size)?;
    if !hash_size.is_power_of_two() {
        return Err(Error::InvalidInput(format!(
            "wavelet hash size must be a power of two, got {}",
            hash_size
        )));
    }

    let (width, height) = img.dimensions();
    let side = (floor_power_of_two(width.min(height) as u64) as u32).max(hash_size);
    let n = side as usize;

    let mut values: Vec<f64> = grayscale(&resize(img, side, side))
        .values
        .into_iter()
        .map(|v| v / 255.0)
        .collect();

    // drop the overall brightness before measuring the low band
    let full_depth = side.trailing_zeros();
    dwt_2d(&mut values, n, n, full_depth);
    values[0] = 0.0;
    idwt_2d(&mut values, n, n, full_depth);

    let level = full_depth - hash_size.trailing_zeros();
    dwt_2d(&mut values, n, n, level);

    let block = extract_low_frequency_block(&values, n, n, hash_size as usize)?;
    let threshold = median(&block);
    trace!("wavelet hash threshold {} at level {}", threshold, level);

    Ok(bits::pack(block.iter().map(|&c| c > threshold)))
}
