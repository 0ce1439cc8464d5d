// Training preparation - label encoding and train/test split
//
// The classifier consumes integer class ids; classes are numbered in
// alphabetical order of their label names so the mapping only depends on
// which emotions occur, not on row order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{Dataset, Emotion};
use crate::error::DatasetError;

/// Default fraction of rows held out for testing
pub const DEFAULT_TEST_FRACTION: f64 = 0.25;

/// Default shuffle seed for [`train_test_split`]
pub const DEFAULT_SPLIT_SEED: u64 = 9;

/// Maps emotions to contiguous class ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<Emotion>,
}

impl LabelEncoder {
    /// Learn the class set from `labels`
    pub fn fit(labels: &[Emotion]) -> Self {
        let mut classes: Vec<Emotion> = labels.to_vec();
        classes.sort_by_key(|e| e.name());
        classes.dedup();
        Self { classes }
    }

    /// Classes in id order
    pub fn classes(&self) -> &[Emotion] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Encode labels as class ids
    ///
    /// # Returns
    /// * `Err(DatasetError::UnknownLabel)` - A label was not seen by `fit`
    pub fn transform(&self, labels: &[Emotion]) -> Result<Vec<usize>, DatasetError> {
        labels
            .iter()
            .map(|label| {
                self.classes
                    .iter()
                    .position(|c| c == label)
                    .ok_or_else(|| DatasetError::UnknownLabel {
                        label: label.name().to_string(),
                    })
            })
            .collect()
    }

    /// Decode class ids back to labels
    pub fn inverse_transform(&self, ids: &[usize]) -> Result<Vec<Emotion>, DatasetError> {
        ids.iter()
            .map(|&id| {
                self.classes
                    .get(id)
                    .copied()
                    .ok_or_else(|| DatasetError::UnknownLabel {
                        label: id.to_string(),
                    })
            })
            .collect()
    }

    /// `(label name, class id)` pairs in id order
    pub fn mapping(&self) -> Vec<(&'static str, usize)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(id, class)| (class.name(), id))
            .collect()
    }
}

/// Shuffle rows with a seeded generator and split off a test partition
///
/// # Arguments
/// * `dataset` - Rows to split
/// * `test_fraction` - Share of rows in the test partition, in (0, 1)
/// * `seed` - Shuffle seed; equal seeds give equal partitions
///
/// # Returns
/// `(train, test)` where the test partition has `ceil(N * test_fraction)` rows
pub fn train_test_split(
    dataset: &Dataset,
    test_fraction: f64,
    seed: u64,
) -> Result<(Dataset, Dataset), DatasetError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(DatasetError::InvalidSplit {
            reason: format!("test fraction {} is outside (0, 1)", test_fraction),
        });
    }

    let n = dataset.len();
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(DatasetError::InvalidSplit {
            reason: format!(
                "{} rows with test fraction {} leaves an empty partition",
                n, test_fraction
            ),
        });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);
    Ok((dataset.select(train_idx), dataset.select(test_idx)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset_of(n: usize) -> Dataset {
        let rows = (0..n).map(|i| vec![i as f32, -(i as f32)]).collect();
        let labels = (0..n).map(|i| Emotion::ALL[i % 8]).collect();
        Dataset::from_rows(rows, labels, 2).unwrap()
    }

    #[test]
    fn test_encoder_orders_classes_by_name() {
        let encoder = LabelEncoder::fit(&[Emotion::Sad, Emotion::Angry, Emotion::Calm, Emotion::Sad]);
        assert_eq!(
            encoder.mapping(),
            vec![("angry", 0), ("calm", 1), ("sad", 2)]
        );
        assert_eq!(
            encoder.transform(&[Emotion::Sad, Emotion::Angry]).unwrap(),
            vec![2, 0]
        );
        assert_eq!(
            encoder.inverse_transform(&[1, 2]).unwrap(),
            vec![Emotion::Calm, Emotion::Sad]
        );
    }

    #[test]
    fn test_encoder_rejects_unseen_label() {
        let encoder = LabelEncoder::fit(&[Emotion::Happy]);
        assert_eq!(
            encoder.transform(&[Emotion::Disgust]).unwrap_err(),
            DatasetError::UnknownLabel {
                label: "disgust".to_string()
            }
        );
        assert!(encoder.inverse_transform(&[1]).is_err());
    }

    #[test]
    fn test_split_sizes() {
        let dataset = dataset_of(10);
        let (train, test) = train_test_split(&dataset, DEFAULT_TEST_FRACTION, DEFAULT_SPLIT_SEED).unwrap();
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 7);
        assert_eq!(train.n_features(), 2);
    }

    #[test]
    fn test_split_is_a_partition() {
        let dataset = dataset_of(24);
        let (train, test) = train_test_split(&dataset, 0.25, 3).unwrap();

        let mut seen: Vec<usize> = train
            .features()
            .column(0)
            .iter()
            .chain(test.features().column(0).iter())
            .map(|&v| v as usize)
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..24).collect::<Vec<_>>());

        // Rows keep their labels through the shuffle
        for (row, label) in test.features().rows().into_iter().zip(test.labels()) {
            assert_eq!(Emotion::ALL[row[0] as usize % 8], *label);
        }
    }

    #[test]
    fn test_split_is_seeded() {
        let dataset = dataset_of(30);
        let a = train_test_split(&dataset, 0.25, 9).unwrap();
        let b = train_test_split(&dataset, 0.25, 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_rejects_bad_fraction() {
        let dataset = dataset_of(10);
        for fraction in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                train_test_split(&dataset, fraction, 9),
                Err(DatasetError::InvalidSplit { .. })
            ));
        }
    }

    #[test]
    fn test_split_rejects_single_row() {
        let dataset = dataset_of(1);
        assert!(matches!(
            train_test_split(&dataset, 0.25, 9),
            Err(DatasetError::InvalidSplit { .. })
        ));
    }
}
