use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::processing::Hasher;
use crate::types::HashAlgorithm;

/// Largest hash size the builders accept
pub const MAX_HASH_SIZE: u32 = 64;

/// Configuration for a [`Hasher`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    /// Which hash to compute
    pub algorithm: HashAlgorithm,

    /// Side of the decision grid; the hash carries `hash_size²` bits
    pub hash_size: u32,

    /// Whether large DCTs may run on the rayon pool
    pub parallel_dct: bool,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Perceptual,
            hash_size: 8,
            parallel_dct: true,
        }
    }
}

impl HasherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn hash_size(mut self, hash_size: u32) -> Self {
        self.hash_size = hash_size;
        self
    }

    pub fn parallel_dct(mut self, parallel_dct: bool) -> Self {
        self.parallel_dct = parallel_dct;
        self
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: HasherConfig = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.hash_size == 0 {
            return Err(Error::Configuration(
                "Hash size must be positive".to_string(),
            ));
        }

        if self.hash_size > MAX_HASH_SIZE {
            return Err(Error::Configuration(format!(
                "Hash size must be at most {}, got {}",
                MAX_HASH_SIZE, self.hash_size
            )));
        }

        // The Haar pyramid halves the side at every level
        if self.algorithm == HashAlgorithm::Wavelet && !self.hash_size.is_power_of_two() {
            return Err(Error::Configuration(format!(
                "Wavelet hash size must be a power of two, got {}",
                self.hash_size
            )));
        }

        Ok(())
    }

    /// Validate and build the hasher this configuration describes
    pub fn to_hasher(&self) -> Result<Hasher> {
        self.validate()?;
        Ok(Hasher::new(self.algorithm, self.hash_size).with_parallel_dct(self.parallel_dct))
    }
}
