// Emotion labels and file name decoding
//
// Recordings follow the `<modality>-<vocal channel>-<emotion>-...` naming
// scheme; the third hyphen-delimited field is a two-digit emotion code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::DatasetError;

/// Emotion category of a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Neutral,
    Calm,
    Happy,
    Sad,
    Angry,
    Fearful,
    Disgust,
    Surprised,
}

impl Emotion {
    /// All emotions in code order (01..08)
    pub const ALL: [Emotion; 8] = [
        Emotion::Neutral,
        Emotion::Calm,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Fearful,
        Emotion::Disgust,
        Emotion::Surprised,
    ];

    /// Look up an emotion by its two-digit code
    ///
    /// # Returns
    /// * `Ok(Emotion)` - Code is one of "01".."08"
    /// * `Err(DatasetError::UnknownEmotionCode)` - Any other string
    pub fn from_code(code: &str) -> Result<Self, DatasetError> {
        match code {
            "01" => Ok(Emotion::Neutral),
            "02" => Ok(Emotion::Calm),
            "03" => Ok(Emotion::Happy),
            "04" => Ok(Emotion::Sad),
            "05" => Ok(Emotion::Angry),
            "06" => Ok(Emotion::Fearful),
            "07" => Ok(Emotion::Disgust),
            "08" => Ok(Emotion::Surprised),
            other => Err(DatasetError::UnknownEmotionCode {
                code: other.to_string(),
            }),
        }
    }

    /// Two-digit code used in file names
    pub fn code(&self) -> &'static str {
        match self {
            Emotion::Neutral => "01",
            Emotion::Calm => "02",
            Emotion::Happy => "03",
            Emotion::Sad => "04",
            Emotion::Angry => "05",
            Emotion::Fearful => "06",
            Emotion::Disgust => "07",
            Emotion::Surprised => "08",
        }
    }

    /// Label name, as stored in the persisted label list
    pub fn name(&self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Calm => "calm",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Fearful => "fearful",
            Emotion::Disgust => "disgust",
            Emotion::Surprised => "surprised",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derive the emotion label of a recording from its file name
///
/// The file stem is split on `-` and field index 2 is looked up.
///
/// # Returns
/// * `Err(DatasetError::MalformedFileName)` - Fewer than three fields
/// * `Err(DatasetError::UnknownEmotionCode)` - Field is not in the code table
pub fn emotion_from_path(path: &Path) -> Result<Emotion, DatasetError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let code = stem
        .split('-')
        .nth(2)
        .ok_or_else(|| DatasetError::MalformedFileName {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        })?;

    Emotion::from_code(code)
}
