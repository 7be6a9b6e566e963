//! Configuration options for loading and displaying a volume.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options controlling how a volume is prepared for ray marching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Whether to rescale samples to 8 bits right after loading.
    pub normalize_on_load: bool,

    /// Whether the model transform and AABB are shifted by the volume origin.
    pub shift_to_origin: bool,

    /// Seed for the ray jitter noise texture.
    pub noise_seed: u64,

    /// Initial threshold, as a percentage of the value range.
    pub initial_threshold_percent: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            normalize_on_load: true,
            shift_to_origin: false,
            noise_seed: 0x5eed,
            initial_threshold_percent: 50.0,
        }
    }
}

impl Options {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a JSON string. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Sets whether samples are normalized on load.
    pub fn with_normalize_on_load(mut self, normalize: bool) -> Self {
        self.normalize_on_load = normalize;
        self
    }

    /// Sets whether geometry is shifted by the volume origin.
    pub fn with_shift_to_origin(mut self, shift: bool) -> Self {
        self.shift_to_origin = shift;
        self
    }

    /// Sets the noise seed.
    pub fn with_noise_seed(mut self, seed: u64) -> Self {
        self.noise_seed = seed;
        self
    }

    /// Sets the initial threshold percentage.
    pub fn with_initial_threshold_percent(mut self, percent: f64) -> Self {
        self.initial_threshold_percent = percent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = Options::default();
        assert!(options.normalize_on_load);
        assert!(!options.shift_to_origin);
        assert_eq!(options.initial_threshold_percent, 50.0);
    }

    #[test]
    fn test_options_builder() {
        let options = Options::new()
            .with_shift_to_origin(true)
            .with_noise_seed(7);
        assert!(options.shift_to_origin);
        assert_eq!(options.noise_seed, 7);
    }

    #[test]
    fn test_options_partial_json() {
        let options = Options::from_json_str(r#"{ "shift_to_origin": true }"#).unwrap();
        assert!(options.shift_to_origin);
        assert!(options.normalize_on_load);
        assert_eq!(options.noise_seed, Options::default().noise_seed);
    }

    #[test]
    fn test_options_json_round_trip() {
        let options = Options::new().with_initial_threshold_percent(12.5);
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(Options::from_json_str(&json).unwrap(), options);
    }

    #[test]
    fn test_options_bad_json() {
        let err = Options::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, crate::VolcastError::JsonError(_)));
    }
}
