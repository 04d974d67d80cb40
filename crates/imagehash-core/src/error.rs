use thiserror::Error;

use crate::types::Kind;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the imagehash library
#[derive(Error, Debug)]
pub enum Error {
    /// Absent or empty image, zero hash size, or an impossible block/grid request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Distance requested between hashes built by different algorithms
    #[error("Image hashes' kind should be identical (left: {left}, right: {right})")]
    KindMismatch { left: Kind, right: Kind },

    /// Distance requested between extended hashes of different word lengths
    #[error("Extended image hashes' size should be identical (left: {left} words, right: {right} words)")]
    SizeMismatch { left: usize, right: usize },

    /// Malformed text or binary encoding
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding error
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Binary dump could not be written
    #[error("Encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}
