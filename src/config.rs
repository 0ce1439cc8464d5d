//! Configuration management for the feature pipeline
//!
//! This module provides runtime configuration loading from JSON files so that
//! analysis sizes, augmentation parameters and dataset locations can be
//! adjusted without recompilation. Every file in a dataset must be analyzed
//! with the same `FeatureConfig` for the resulting matrix to be comparable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::audio::DEFAULT_SAMPLE_RATE;
use crate::augment::ShiftDirection;
use crate::error::FeatureError;

/// Default location of the config file for [`AppConfig::load`]
pub const DEFAULT_CONFIG_PATH: &str = "config/speech_emotion.json";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub augmentation: AugmentationConfig,
    #[serde(default)]
    pub dataset: DatasetSettings,
}

/// Spectral analysis parameters shared by all feature blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Rate every signal is resampled to on load (Hz)
    pub sample_rate: u32,
    /// FFT window size in samples
    pub n_fft: usize,
    /// Hop size between analysis frames
    pub hop_length: usize,
    /// Number of cepstral coefficients in the timbral block
    pub n_mfcc: usize,
    /// Number of pitch classes in the harmonic block
    pub n_chroma: usize,
    /// Number of mel bands in the spectral-energy block
    pub n_mels: usize,
    /// Dynamic range floor applied before the cepstral transform (dB)
    pub top_db: f32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            n_fft: 2048,
            hop_length: 512,
            n_mfcc: 40,
            n_chroma: 12,
            n_mels: 128,
            top_db: 80.0,
        }
    }
}

impl FeatureConfig {
    /// Check that the analysis sizes can produce non-empty filterbanks
    ///
    /// # Returns
    /// * `Err(FeatureError::InvalidConfig)` - First out-of-range field
    pub fn validate(&self) -> Result<(), FeatureError> {
        let invalid = |field: &str, reason: String| -> Result<(), FeatureError> {
            Err(FeatureError::InvalidConfig {
                field: field.to_string(),
                reason,
            })
        };

        if self.sample_rate == 0 {
            return invalid("sample_rate", "must be > 0".to_string());
        }
        if self.n_fft < 2 {
            return invalid("n_fft", format!("must be at least 2, got {}", self.n_fft));
        }
        if self.hop_length == 0 {
            return invalid("hop_length", "must be > 0".to_string());
        }
        if self.n_mels == 0 {
            return invalid("n_mels", "must be > 0".to_string());
        }
        if self.n_mfcc == 0 {
            return invalid("n_mfcc", "must be > 0".to_string());
        }
        if self.n_chroma == 0 {
            return invalid("n_chroma", "must be > 0".to_string());
        }
        if !(self.top_db.is_finite() && self.top_db > 0.0) {
            return invalid("top_db", format!("must be finite and > 0, got {}", self.top_db));
        }
        Ok(())
    }
}

/// Data augmentation parameters used by the dataset builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentationConfig {
    /// Scale applied to the standard normal noise
    pub noise_factor: f32,
    /// Maximum shift as a fraction of one second of audio
    pub shift_fraction: f32,
    pub shift_direction: ShiftDirection,
    /// Fixed seed for reproducible augmentation (entropy-seeded when absent)
    pub seed: Option<u64>,
}

impl Default for AugmentationConfig {
    fn default() -> Self {
        Self {
            noise_factor: 0.001,
            shift_fraction: 0.25,
            shift_direction: ShiftDirection::Right,
            seed: None,
        }
    }
}

/// Dataset locations and persistence switch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// Root directory holding the `Actor_*` subdirectories
    pub root_directory: PathBuf,
    /// Write `X.json`/`y.json` after a build
    pub persist: bool,
    /// Directory the persisted snapshot is written to
    pub output_directory: PathBuf,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            root_directory: PathBuf::from("audio_speech_actors_01-24"),
            persist: false,
            output_directory: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or the defaults if the file doesn't exist
    /// or its JSON is invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.features.sample_rate, 22_050);
        assert_eq!(config.features.n_mfcc, 40);
        assert_eq!(config.features.n_chroma, 12);
        assert_eq!(config.features.n_mels, 128);
        assert_eq!(config.augmentation.noise_factor, 0.001);
        assert_eq!(config.augmentation.shift_fraction, 0.25);
        assert_eq!(config.augmentation.shift_direction, ShiftDirection::Right);
        assert!(config.augmentation.seed.is_none());
        assert!(!config.dataset.persist);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = AppConfig::default();
        config.augmentation.seed = Some(7);
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.features, config.features);
        assert_eq!(parsed.augmentation, config.augmentation);
        assert_eq!(parsed.dataset, config.dataset);
    }

    #[test]
    fn test_partial_json_uses_section_defaults() {
        let json = r#"{ "augmentation": { "noise_factor": 0.01, "shift_fraction": 0.1, "shift_direction": "both" } }"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.augmentation.noise_factor, 0.01);
        assert_eq!(parsed.augmentation.shift_direction, ShiftDirection::Both);
        assert_eq!(parsed.features, FeatureConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_field_defaults() {
        let json = r#"{ "features": { "n_mfcc": 20 }, "dataset": { "persist": true } }"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.features.n_mfcc, 20);
        assert_eq!(parsed.features.n_fft, 2048);
        assert_eq!(parsed.features.sample_rate, 22_050);
        assert!(parsed.dataset.persist);
        assert_eq!(parsed.dataset.output_directory, PathBuf::from("."));
        assert_eq!(parsed.augmentation, AugmentationConfig::default());
    }

    #[test]
    fn test_partial_section_file_is_not_discarded() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("speech_emotion.json");
        fs::write(
            &path,
            r#"{ "features": { "n_mels": 64 }, "augmentation": { "seed": 11 } }"#,
        )
        .unwrap();

        let config = AppConfig::load_from_file(&path);
        assert_eq!(config.features.n_mels, 64);
        assert_eq!(config.augmentation.seed, Some(11));
        assert_eq!(config.augmentation.noise_factor, 0.001);
    }

    #[test]
    fn test_default_features_validate() {
        assert_eq!(FeatureConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_unusable_sizes() {
        let cases: [(&str, fn(&mut FeatureConfig)); 7] = [
            ("sample_rate", |c| c.sample_rate = 0),
            ("n_fft", |c| c.n_fft = 1),
            ("hop_length", |c| c.hop_length = 0),
            ("n_mels", |c| c.n_mels = 0),
            ("n_mfcc", |c| c.n_mfcc = 0),
            ("n_chroma", |c| c.n_chroma = 0),
            ("top_db", |c| c.top_db = f32::NAN),
        ];
        for (expected_field, mutate) in cases {
            let mut config = FeatureConfig::default();
            mutate(&mut config);
            match config.validate() {
                Err(FeatureError::InvalidConfig { field, .. }) => {
                    assert_eq!(field, expected_field)
                }
                other => panic!("Expected InvalidConfig for {}, got {:?}", expected_field, other),
            }
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from_file("does/not/exist.json");
        assert_eq!(config.features, FeatureConfig::default());
    }
}
