use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The algorithm a hash value was built with.
///
/// Purely descriptive: it is carried alongside the bits and never inferred from them.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode,
)]
pub enum Kind {
    #[default]
    Unknown,
    AverageHash,
    PerceptualHash,
    DifferenceHash,
    WaveletHash,
}

impl Kind {
    /// The one-character tag used by the text form (empty for `Unknown`)
    pub fn tag(self) -> &'static str {
        match self {
            Self::Unknown => "",
            Self::AverageHash => "a",
            Self::PerceptualHash => "p",
            Self::DifferenceHash => "d",
            Self::WaveletHash => "w",
        }
    }

    /// Map a text tag back to a kind; anything unrecognized is `Unknown`
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "a" => Self::AverageHash,
            "p" => Self::PerceptualHash,
            "d" => Self::DifferenceHash,
            "w" => Self::WaveletHash,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "Unknown",
            Self::AverageHash => "AverageHash",
            Self::PerceptualHash => "PerceptualHash",
            Self::DifferenceHash => "DifferenceHash",
            Self::WaveletHash => "WaveletHash",
        };
        f.write_str(name)
    }
}

/// Hash algorithms a [`Hasher`](crate::Hasher) can run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// Compare each pixel of an `s×s` thumbnail to the mean
    Average,
    /// Compare horizontally adjacent pixels of an `(s+1)×s` thumbnail
    Difference,
    /// Compare the low-frequency DCT coefficients to their median
    #[default]
    Perceptual,
    /// Compare the Haar LL band to its median
    Wavelet,
}

impl HashAlgorithm {
    /// The kind tag stamped on hashes produced by this algorithm
    pub fn kind(self) -> Kind {
        match self {
            Self::Average => Kind::AverageHash,
            Self::Difference => Kind::DifferenceHash,
            Self::Perceptual => Kind::PerceptualHash,
            Self::Wavelet => Kind::WaveletHash,
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a" | "average" | "ahash" => Ok(Self::Average),
            "d" | "difference" | "dhash" => Ok(Self::Difference),
            "p" | "perceptual" | "phash" => Ok(Self::Perceptual),
            "w" | "wavelet" | "whash" => Ok(Self::Wavelet),
            other => Err(Error::Configuration(format!(
                "Unknown hash algorithm: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for kind in [
            Kind::Unknown,
            Kind::AverageHash,
            Kind::PerceptualHash,
            Kind::DifferenceHash,
            Kind::WaveletHash,
        ] {
            assert_eq!(Kind::from_tag(kind.tag()), kind);
        }
    }

    #[test]
    fn unrecognized_tag_is_unknown() {
        assert_eq!(Kind::from_tag("x"), Kind::Unknown);
        assert_eq!(Kind::from_tag("A"), Kind::Unknown);
    }

    #[test]
    fn algorithm_names_parse() {
        assert_eq!("phash".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Perceptual);
        assert_eq!("D".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Difference);
        assert!("blockhash".parse::<HashAlgorithm>().is_err());
    }
}
