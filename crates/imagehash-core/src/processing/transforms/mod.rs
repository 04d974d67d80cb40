//! Numeric transforms behind the perceptual and wavelet hashes.

pub mod dct;
pub mod dwt;
mod tables;

pub use dct::{
    dct_1d, dct_1d_in_place, dct_1d_reference, dct_2d, par_dct_2d, PARALLEL_DCT_THRESHOLD,
};
pub use dwt::{dwt_1d, dwt_2d, floor_power_of_two, idwt_1d, idwt_2d};
