pub mod synthetic_images;
pub use synthetic_images::*;
