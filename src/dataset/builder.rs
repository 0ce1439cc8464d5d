// DatasetBuilder - walks a recording tree and fills the feature matrix
//
// Pipeline per file:
// 1. Load and resample to the feature sample rate
// 2. Extract all blocks from the original signal
// 3. Extract from a noise-augmented copy
// 4. Extract from a time-shifted copy
// Every row of a file carries that file's emotion label. Any error aborts
// the whole build.

use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};

use super::emotion::emotion_from_path;
use super::{Dataset, Emotion};
use crate::analysis::{FeatureExtractor, FeatureSet};
use crate::audio::load_signal;
use crate::augment::Augmenter;
use crate::config::{AppConfig, AugmentationConfig, FeatureConfig};
use crate::error::{log_dataset_error, DatasetError};

/// Prefix shared by the per-actor subdirectories
const ACTOR_DIR_PREFIX: &str = "Actor_";

/// Extension of recordings picked up by discovery
const RECORDING_EXTENSION: &str = "wav";

/// Rows appended per recording (original, noise, shift)
pub const ROWS_PER_FILE: usize = 3;

/// Inputs of a dataset build
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetConfig {
    /// Directory holding the `Actor_*` subdirectories
    pub root_directory: PathBuf,
    /// Write the snapshot after a successful build
    pub persist: bool,
    /// Where the snapshot goes
    pub output_directory: PathBuf,
    pub augmentation: AugmentationConfig,
}

impl DatasetConfig {
    /// Assemble the build inputs from the `dataset` and `augmentation` sections
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            root_directory: config.dataset.root_directory.clone(),
            persist: config.dataset.persist,
            output_directory: config.dataset.output_directory.clone(),
            augmentation: config.augmentation.clone(),
        }
    }
}

/// Builds a labeled [`Dataset`] from a directory of recordings
pub struct DatasetBuilder {
    config: DatasetConfig,
    extractor: FeatureExtractor,
    blocks: FeatureSet,
    augmenter: Augmenter,
}

impl DatasetBuilder {
    /// Create a builder
    ///
    /// # Arguments
    /// * `config` - Dataset locations and augmentation parameters
    /// * `features` - Analysis parameters; recordings are resampled to its rate
    ///
    /// # Returns
    /// * `Err(DatasetError::Feature)` - Analysis parameters are out of range
    pub fn new(config: DatasetConfig, features: FeatureConfig) -> Result<Self, DatasetError> {
        let extractor = FeatureExtractor::new(features)?;
        let augmenter = Augmenter::new(config.augmentation.seed);
        Ok(Self {
            config,
            extractor,
            blocks: FeatureSet::all(),
            augmenter,
        })
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// List every `<root>/Actor_*/*.wav` file in sorted order
    ///
    /// # Returns
    /// * `Err(DatasetError::Io)` - Root or an actor directory cannot be read
    pub fn discover(&self) -> Result<Vec<PathBuf>, DatasetError> {
        let root = &self.config.root_directory;
        let mut files = Vec::new();

        for actor_dir in read_dir_sorted(root)? {
            let is_actor = actor_dir.is_dir()
                && actor_dir
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(ACTOR_DIR_PREFIX));
            if !is_actor {
                continue;
            }

            for path in read_dir_sorted(&actor_dir)? {
                let is_recording = path.is_file()
                    && path.extension().and_then(|ext| ext.to_str()) == Some(RECORDING_EXTENSION)
                    && !path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with('.'));
                if is_recording {
                    files.push(path);
                }
            }
        }

        Ok(files)
    }

    /// Build the dataset: three labeled rows per discovered recording
    ///
    /// Writes the snapshot to the output directory when `persist` is set.
    pub fn build(&mut self) -> Result<Dataset, DatasetError> {
        let files = self.discover()?;
        tracing::info!(
            "[DatasetBuilder] Found {} recordings under {}",
            files.len(),
            self.config.root_directory.display()
        );

        let width = self.blocks.vector_len(self.extractor.config());
        let mut rows: Vec<Vec<f32>> = Vec::with_capacity(files.len() * ROWS_PER_FILE);
        let mut labels: Vec<Emotion> = Vec::with_capacity(files.len() * ROWS_PER_FILE);

        for (index, path) in files.iter().enumerate() {
            tracing::debug!(
                "[DatasetBuilder] {}/{}: {}",
                index + 1,
                files.len(),
                path.display()
            );
            let labeled = emotion_from_path(path)
                .and_then(|label| self.file_rows(path).map(|file_rows| (label, file_rows)));
            let (label, file_rows) = match labeled {
                Ok(labeled) => labeled,
                Err(err) => {
                    log_dataset_error(&err, &path.display().to_string());
                    return Err(err);
                }
            };
            for row in file_rows {
                rows.push(row);
                labels.push(label);
            }
        }

        let dataset = Dataset::from_rows(rows, labels, width)?;
        tracing::info!(
            "[DatasetBuilder] Built {} rows x {} features",
            dataset.len(),
            dataset.n_features()
        );

        if self.config.persist {
            dataset.save(&self.config.output_directory)?;
        }
        Ok(dataset)
    }

    /// Feature vector of one recording as a 1 x F matrix
    pub fn extract_single<P: AsRef<Path>>(&self, path: P) -> Result<Array2<f32>, DatasetError> {
        extract_with(&self.extractor, &self.blocks, path.as_ref())
    }

    /// Original, noise-augmented and shift-augmented rows of one file
    fn file_rows(&mut self, path: &Path) -> Result<[Vec<f32>; ROWS_PER_FILE], DatasetError> {
        let rate = self.extractor.config().sample_rate;
        let signal = load_signal(path, rate)?;
        let augmentation = &self.config.augmentation;

        let original = self.extractor.extract(&signal, &self.blocks)?;

        let noisy = self.augmenter.add_noise(&signal, augmentation.noise_factor);
        let noisy = self.extractor.extract(&noisy, &self.blocks)?;

        let shifted = self.augmenter.shift(
            &signal,
            augmentation.shift_fraction,
            augmentation.shift_direction,
        );
        let shifted = self.extractor.extract(&shifted, &self.blocks)?;

        Ok([original, noisy, shifted])
    }
}

/// Feature vector of one recording as a 1 x F matrix, without a builder
///
/// The recording's label is not needed and its file name is not inspected.
pub fn extract_single<P: AsRef<Path>>(
    path: P,
    features: &FeatureConfig,
) -> Result<Array2<f32>, DatasetError> {
    let extractor = FeatureExtractor::new(features.clone())?;
    extract_with(&extractor, &FeatureSet::all(), path.as_ref())
}

fn extract_with(
    extractor: &FeatureExtractor,
    blocks: &FeatureSet,
    path: &Path,
) -> Result<Array2<f32>, DatasetError> {
    let signal = load_signal(path, extractor.config().sample_rate)?;
    let vector = extractor.extract(&signal, blocks)?;
    let width = vector.len();
    Array2::from_shape_vec((1, width), vector).map_err(|_| DatasetError::ShapeMismatch {
        rows: 1,
        labels: width,
    })
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    let io_err = |e: std::io::Error| DatasetError::Io {
        path: dir.display().to_string(),
        reason: e.to_string(),
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        paths.push(entry.map_err(io_err)?.path());
    }
    paths.sort();
    Ok(paths)
}
