// Speech Emotion Core - feature extraction and dataset building
// Turns labeled speech recordings into fixed-length acoustic feature vectors

// Module declarations
pub mod analysis;
pub mod audio;
pub mod augment;
pub mod config;
pub mod dataset;
pub mod error;

// Re-exports for convenience
pub use analysis::{FeatureBlock, FeatureExtractor, FeatureSet, FeatureVector};
pub use audio::{load_signal, SampleSequence};
pub use augment::{Augmenter, ShiftDirection};
pub use config::{AppConfig, AugmentationConfig, DatasetSettings, FeatureConfig};
pub use dataset::{Dataset, DatasetBuilder, DatasetConfig, Emotion};
pub use error::{AudioError, DatasetError, ErrorCode, FeatureError};
