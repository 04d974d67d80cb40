//! Perceptual image hashing.
//!
//! This library computes compact fingerprints of images such that visually similar
//! images produce hashes with a small Hamming distance:
//! - Average, difference, perceptual (DCT) and wavelet (Haar) hash builders
//! - 64-bit [`ImageHash`] values and arbitrary-width [`ExtImageHash`] values
//! - Hamming distance between hashes of the same kind
//! - A `<kind>:<hex>` text form and a compact binary form
//!
//! ```no_run
//! use imagehash_core::{decode_image, perceptual_hash};
//!
//! let left = perceptual_hash(&decode_image("left.jpg")?)?;
//! let right = perceptual_hash(&decode_image("right.jpg")?)?;
//! println!("{} {} distance {}", left, right, left.distance(&right)?);
//! # Ok::<(), imagehash_core::Error>(())
//! ```

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result};
pub use hash::{ExtImageHash, HashValue, ImageHash};
pub use processing::*;
pub use types::*;

// -- Public Modules --
pub mod config;
pub mod hash;
pub mod logging;
pub mod processing;
pub mod types;
