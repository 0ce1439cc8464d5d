// Dataset snapshot on disk
//
// A dataset is written as two JSON files in one directory: the feature
// matrix (`X.json`, ndarray's serde layout) and the label list (`y.json`,
// emotion names). Loading reverses the pair exactly.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use ndarray::Array2;

use super::{Dataset, Emotion};
use crate::error::DatasetError;

/// File name of the persisted feature matrix
pub const FEATURES_FILE: &str = "X.json";

/// File name of the persisted label list
pub const LABELS_FILE: &str = "y.json";

impl Dataset {
    /// Write the dataset to `dir`, creating the directory if needed
    ///
    /// # Returns
    /// Paths of the feature and label files, in that order
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<(PathBuf, PathBuf), DatasetError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| DatasetError::Persist {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let features_path = dir.join(FEATURES_FILE);
        let labels_path = dir.join(LABELS_FILE);
        write_json(&features_path, &self.features)?;
        write_json(&labels_path, &self.labels)?;

        log::info!(
            "[Dataset] Saved {} rows x {} features to {}",
            self.len(),
            self.n_features(),
            dir.display()
        );
        Ok((features_path, labels_path))
    }

    /// Read a dataset previously written by [`Dataset::save`]
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, DatasetError> {
        let dir = dir.as_ref();
        let features: Array2<f32> = read_json(&dir.join(FEATURES_FILE))?;
        let labels: Vec<Emotion> = read_json(&dir.join(LABELS_FILE))?;

        let dataset = Dataset::new(features, labels)?;
        log::info!(
            "[Dataset] Loaded {} rows x {} features from {}",
            dataset.len(),
            dataset.n_features(),
            dir.display()
        );
        Ok(dataset)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DatasetError> {
    let persist_err = |reason: String| DatasetError::Persist {
        path: path.display().to_string(),
        reason,
    };

    let file = File::create(path).map_err(|e| persist_err(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value).map_err(|e| persist_err(e.to_string()))?;
    writer.flush().map_err(|e| persist_err(e.to_string()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let persist_err = |reason: String| DatasetError::Persist {
        path: path.display().to_string(),
        reason,
    };

    let file = File::open(path).map_err(|e| persist_err(e.to_string()))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| persist_err(e.to_string()))
}
