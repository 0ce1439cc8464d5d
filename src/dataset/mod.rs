//! Labeled feature dataset and the pipeline that builds it.
//!
//! A [`Dataset`] pairs an N x F feature matrix with N emotion labels. The
//! [`DatasetBuilder`] fills one from a directory of recordings, three rows
//! per file (original, noise-augmented, shift-augmented); [`persist`]
//! snapshots it to disk and [`split`] prepares it for a classifier.

pub mod builder;
pub mod emotion;
pub mod persist;
pub mod split;

pub use builder::{extract_single, DatasetBuilder, DatasetConfig};
pub use emotion::{emotion_from_path, Emotion};
pub use persist::{FEATURES_FILE, LABELS_FILE};
pub use split::{train_test_split, LabelEncoder, DEFAULT_SPLIT_SEED, DEFAULT_TEST_FRACTION};

use ndarray::{Array2, Axis};
use std::collections::BTreeMap;

use crate::error::DatasetError;

/// Feature matrix with one emotion label per row
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f32>,
    labels: Vec<Emotion>,
}

impl Dataset {
    /// Pair a feature matrix with its labels
    ///
    /// # Returns
    /// * `Err(DatasetError::ShapeMismatch)` - Row count differs from label count
    pub fn new(features: Array2<f32>, labels: Vec<Emotion>) -> Result<Self, DatasetError> {
        if features.nrows() != labels.len() {
            return Err(DatasetError::ShapeMismatch {
                rows: features.nrows(),
                labels: labels.len(),
            });
        }
        Ok(Self { features, labels })
    }

    /// Assemble a dataset from equally sized rows
    ///
    /// # Arguments
    /// * `rows` - Feature vectors, all of length `width`
    /// * `labels` - One label per row
    /// * `width` - Columns in the resulting matrix (used when `rows` is empty)
    pub fn from_rows(
        rows: Vec<Vec<f32>>,
        labels: Vec<Emotion>,
        width: usize,
    ) -> Result<Self, DatasetError> {
        let n_rows = rows.len();
        let n_labels = labels.len();
        let flat: Vec<f32> = rows.into_iter().flatten().collect();
        let features = Array2::from_shape_vec((n_rows, width), flat).map_err(|_| {
            DatasetError::ShapeMismatch {
                rows: n_rows,
                labels: n_labels,
            }
        })?;
        Self::new(features, labels)
    }

    pub fn features(&self) -> &Array2<f32> {
        &self.features
    }

    pub fn labels(&self) -> &[Emotion] {
        &self.labels
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Rows per emotion
    pub fn label_counts(&self) -> BTreeMap<Emotion, usize> {
        let mut counts = BTreeMap::new();
        for label in &self.labels {
            *counts.entry(*label).or_insert(0) += 1;
        }
        counts
    }

    /// Copy the given rows, in the given order, into a new dataset
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: self.features.select(Axis(0), indices),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}
