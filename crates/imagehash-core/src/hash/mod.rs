//! Hash values, their distance and their text and binary encodings.

pub mod bits;
pub mod codec;
mod dump;
mod extended;
mod fixed;

pub use extended::ExtImageHash;
pub use fixed::ImageHash;

use crate::types::Kind;

/// Read access shared by the fixed and extended hash values.
pub trait HashValue {
    /// Algorithm the value was built with
    fn kind(&self) -> Kind;

    /// The packed decisions, most significant word first
    fn words(&self) -> &[u64];

    /// Number of bits the value carries, including zero padding in the last word
    fn bit_len(&self) -> usize {
        self.words().len() * 64
    }

    /// Decision `idx` in row-major order
    fn bit(&self, idx: usize) -> bool {
        bits::bit_at(self.words(), idx)
    }

    /// Canonical `<k>:<hex>` rendering
    fn to_text(&self) -> String {
        codec::encode_text(self.kind(), self.words())
    }
}
