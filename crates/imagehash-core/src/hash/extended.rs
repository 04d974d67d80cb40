use std::fmt;
use std::str::FromStr;

use super::{bits, codec, HashValue, ImageHash};
use crate::error::{Error, Result};
use crate::types::Kind;

/// A hash of any width: `hash_size²` decisions packed into `ceil(hash_size² / 64)` words.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtImageHash {
    hash: Vec<u64>,
    kind: Kind,
}

impl ExtImageHash {
    /// Wrap packed words. An empty word vector is rejected.
    pub fn new(hash: Vec<u64>, kind: Kind) -> Result<Self> {
        if hash.is_empty() {
            return Err(Error::InvalidInput(
                "extended hash needs at least one word".to_string(),
            ));
        }
        Ok(Self { hash, kind })
    }

    pub fn hash(&self) -> &[u64] {
        &self.hash
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Number of differing bits. Both hashes must share kind and word count.
    pub fn distance(&self, other: &ExtImageHash) -> Result<u32> {
        if self.kind != other.kind {
            return Err(Error::KindMismatch {
                left: self.kind,
                right: other.kind,
            });
        }
        if self.hash.len() != other.hash.len() {
            return Err(Error::SizeMismatch {
                left: self.hash.len(),
                right: other.hash.len(),
            });
        }
        Ok(bits::hamming(&self.hash, &other.hash))
    }

    /// [`distance`](Self::distance) as a fraction of [`HashValue::bit_len`].
    ///
    /// The hash size is not stored, so the denominator counts the zero padding of the
    /// last word too. A `hash_size = 9` hash divides by 128, not by its 81 decisions;
    /// compare ratios only between hashes built at the same size.
    pub fn dist_ratio(&self, other: &ExtImageHash) -> Result<f64> {
        Ok(self.distance(other)? as f64 / self.bit_len() as f64)
    }

    pub fn to_text(&self) -> String {
        HashValue::to_text(self)
    }

    pub fn from_text(text: &str) -> Result<Self> {
        let (kind, hash) = codec::decode_extended(text)?;
        Self::new(hash, kind)
    }
}

impl HashValue for ExtImageHash {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn words(&self) -> &[u64] {
        &self.hash
    }
}

impl From<ImageHash> for ExtImageHash {
    fn from(hash: ImageHash) -> Self {
        Self {
            hash: vec![hash.hash()],
            kind: hash.kind(),
        }
    }
}

impl fmt::Display for ExtImageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for ExtImageHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}
