use std::fmt;
use std::str::FromStr;

use super::{bits, codec, HashValue};
use crate::error::{Error, Result};
use crate::types::Kind;

/// A 64-bit hash: one decision per cell of an 8×8 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHash {
    hash: u64,
    kind: Kind,
}

impl ImageHash {
    pub fn new(hash: u64, kind: Kind) -> Self {
        Self { hash, kind }
    }

    /// The raw bits, first decision in the most significant position
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Number of differing bits between two hashes of the same kind.
    pub fn distance(&self, other: &ImageHash) -> Result<u32> {
        if self.kind != other.kind {
            return Err(Error::KindMismatch {
                left: self.kind,
                right: other.kind,
            });
        }
        Ok(bits::hamming(self.words(), other.words()))
    }

    /// [`distance`](Self::distance) as a fraction of the 64 bits.
    pub fn dist_ratio(&self, other: &ImageHash) -> Result<f64> {
        Ok(self.distance(other)? as f64 / self.bit_len() as f64)
    }

    pub fn to_text(&self) -> String {
        HashValue::to_text(self)
    }

    pub fn from_text(text: &str) -> Result<Self> {
        let (kind, hash) = codec::decode_fixed(text)?;
        Ok(Self::new(hash, kind))
    }
}

impl HashValue for ImageHash {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn words(&self) -> &[u64] {
        std::slice::from_ref(&self.hash)
    }
}

impl fmt::Display for ImageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for ImageHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_counts_bits() {
        let a = ImageHash::new(0b1010, Kind::AverageHash);
        let b = ImageHash::new(0b0110, Kind::AverageHash);
        assert_eq!(a.distance(&b).unwrap(), 2);
        assert_eq!(b.distance(&a).unwrap(), 2);
        assert_eq!(a.distance(&a).unwrap(), 0);
    }

    #[test]
    fn distance_needs_matching_kinds() {
        let a = ImageHash::new(1, Kind::AverageHash);
        let p = ImageHash::new(1, Kind::PerceptualHash);
        assert!(matches!(
            a.distance(&p),
            Err(Error::KindMismatch {
                left: Kind::AverageHash,
                right: Kind::PerceptualHash
            })
        ));
    }

    #[test]
    fn dist_ratio_is_fraction_of_bits() {
        let a = ImageHash::new(0, Kind::DifferenceHash);
        let b = ImageHash::new(0xffff_ffff, Kind::DifferenceHash);
        assert_eq!(a.dist_ratio(&b).unwrap(), 0.5);
    }

    #[test]
    fn text_round_trip() {
        let hash = ImageHash::new(0x00f0_0000_1234_abcd, Kind::PerceptualHash);
        let text = hash.to_string();
        assert_eq!(text, "p:00f000001234abcd");
        assert_eq!(text.len(), 18);
        assert_eq!(text.parse::<ImageHash>().unwrap(), hash);
    }

    #[test]
    fn bits_read_msb_first() {
        let hash = ImageHash::new(1 << 63 | 1, Kind::Unknown);
        assert!(hash.bit(0));
        assert!(!hash.bit(1));
        assert!(hash.bit(63));
        assert_eq!(hash.bit_len(), 64);
    }
}
