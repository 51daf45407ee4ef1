//! ALFA AEAD - Benchmark configuration
//!
//! Loaded from JSON; every field is optional and falls back to the default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::Algorithm;
use crate::error::{AeadError, AeadResult};

/// Largest accepted `block_size` (64 MiB)
pub const MAX_BLOCK_SIZE: usize = 64 * 1024 * 1024;

/// Largest accepted `aad_size` (1 MiB)
pub const MAX_AAD_SIZE: usize = 1024 * 1024;

/// Settings for [`crate::speed::run`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Algorithms to measure, in output order
    pub algorithms: Vec<Algorithm>,
    /// Plaintext bytes per seal call
    pub block_size: usize,
    /// Associated data bytes per seal call
    pub aad_size: usize,
    /// Minimum wall-clock time spent per algorithm
    pub duration_ms: u64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            algorithms: Algorithm::ALL.to_vec(),
            block_size: 4096,
            aad_size: 24,
            duration_ms: 500,
        }
    }
}

impl SpeedConfig {
    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> AeadResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        log::debug!("Loaded speed config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> AeadResult<()> {
        if self.algorithms.is_empty() {
            return Err(AeadError::Config("no algorithms selected".into()));
        }
        if self.block_size == 0 {
            return Err(AeadError::Config("block_size must be > 0".into()));
        }
        if self.block_size > MAX_BLOCK_SIZE {
            return Err(AeadError::Config(format!(
                "block_size {} exceeds {} bytes",
                self.block_size, MAX_BLOCK_SIZE
            )));
        }
        if self.aad_size > MAX_AAD_SIZE {
            return Err(AeadError::Config(format!(
                "aad_size {} exceeds {} bytes",
                self.aad_size, MAX_AAD_SIZE
            )));
        }
        if self.duration_ms == 0 {
            return Err(AeadError::Config("duration_ms must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SpeedConfig::default();
        assert_eq!(config.block_size, 4096);
        assert_eq!(config.aad_size, 24);
        assert_eq!(config.algorithms, Algorithm::ALL.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "algorithms": ["aes-256-gcm"], "duration_ms": 50 }}"#).unwrap();

        let config = SpeedConfig::load(file.path()).unwrap();
        assert_eq!(config.algorithms, vec![Algorithm::Aes256Gcm]);
        assert_eq!(config.duration_ms, 50);
        assert_eq!(config.block_size, 4096);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "block_size": 0 }}"#).unwrap();
        assert!(matches!(SpeedConfig::load(file.path()), Err(AeadError::Config(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "algorithms": ["rot13"] }}"#).unwrap();
        assert!(matches!(SpeedConfig::load(file.path()), Err(AeadError::Config(_))));
    }

    #[test]
    fn test_size_limits() {
        let huge = SpeedConfig {
            block_size: usize::MAX,
            ..SpeedConfig::default()
        };
        assert!(matches!(huge.validate(), Err(AeadError::Config(_))));

        let at_limit = SpeedConfig {
            block_size: MAX_BLOCK_SIZE,
            aad_size: MAX_AAD_SIZE,
            ..SpeedConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let big_aad = SpeedConfig {
            aad_size: MAX_AAD_SIZE + 1,
            ..SpeedConfig::default()
        };
        assert!(matches!(big_aad.validate(), Err(AeadError::Config(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "block_size": {} }}"#, u64::MAX).unwrap();
        assert!(SpeedConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = SpeedConfig::load(Path::new("/nonexistent/alfa_aead.json"));
        assert!(matches!(result, Err(AeadError::Io(_))));
    }
}
