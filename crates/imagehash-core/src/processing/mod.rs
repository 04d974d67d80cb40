// Numeric building blocks
pub mod block;
pub mod stats;
pub mod transforms;

// Image collaborators and the algorithms on top of them
pub mod builders;
pub mod image_ops;

// Reexport core functionality
pub use builders::{
    average_hash, average_hash_extend, difference_hash, difference_hash_extend, perceptual_hash,
    perceptual_hash_extend, wavelet_hash, wavelet_hash_extend, Hasher, FIXED_HASH_SIZE,
};
pub use image_ops::{decode_image, decode_image_bytes, is_supported_image, Grid};
