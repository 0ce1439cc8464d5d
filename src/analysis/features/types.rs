// Types module - Data structures for feature selection and output
//
// This module defines the feature blocks a vector can be made of, the set
// of enabled blocks, and the resulting vector type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::FeatureConfig;

/// Fixed-length numeric summary of one audio clip
pub type FeatureVector = Vec<f32>;

/// One sub-block of a feature vector
///
/// Variants are declared in output order: a vector always lists its enabled
/// blocks as timbral, then harmonic, then spectral energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureBlock {
    /// Mean MFCCs (spectral envelope / timbre)
    Timbral,
    /// Mean chroma (energy per pitch class)
    Harmonic,
    /// Mean mel spectrogram (energy per mel band)
    SpectralEnergy,
}

impl FeatureBlock {
    /// All blocks in output order
    pub const ALL: [FeatureBlock; 3] = [
        FeatureBlock::Timbral,
        FeatureBlock::Harmonic,
        FeatureBlock::SpectralEnergy,
    ];

    /// Number of values this block contributes under `config`
    pub fn len(&self, config: &FeatureConfig) -> usize {
        match self {
            FeatureBlock::Timbral => config.n_mfcc.min(config.n_mels),
            FeatureBlock::Harmonic => config.n_chroma,
            FeatureBlock::SpectralEnergy => config.n_mels,
        }
    }
}

/// Set of enabled feature blocks
///
/// An empty set is a valid, checkable state: extracting with it yields an
/// empty vector, which downstream models expecting 180 values cannot use.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    blocks: BTreeSet<FeatureBlock>,
}

impl FeatureSet {
    /// All three blocks (the dataset configuration)
    pub fn all() -> Self {
        FeatureBlock::ALL.into_iter().collect()
    }

    /// No blocks enabled
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder-style insertion
    pub fn with(mut self, block: FeatureBlock) -> Self {
        self.blocks.insert(block);
        self
    }

    pub fn contains(&self, block: FeatureBlock) -> bool {
        self.blocks.contains(&block)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Enabled blocks in output order
    pub fn iter(&self) -> impl Iterator<Item = FeatureBlock> + '_ {
        self.blocks.iter().copied()
    }

    /// Length of the vector extracted with this set
    pub fn vector_len(&self, config: &FeatureConfig) -> usize {
        self.iter().map(|block| block.len(config)).sum()
    }
}

impl FromIterator<FeatureBlock> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = FeatureBlock>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}
