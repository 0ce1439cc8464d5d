// Analysis module - DSP feature extraction
//
// Converts sample sequences into the fixed-length feature vectors consumed
// by the dataset builder and, downstream, the emotion classifier.

pub mod features;

pub use features::{FeatureBlock, FeatureExtractor, FeatureSet, FeatureVector};
