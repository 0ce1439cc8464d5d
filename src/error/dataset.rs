// Dataset error types and constants

use crate::error::{AudioError, ErrorCode, FeatureError};
use log::error;
use std::fmt;

/// Dataset error code constants
///
/// Error code range: 2001-2009
pub struct DatasetErrorCodes {}

impl DatasetErrorCodes {
    /// Filesystem traversal or file access failed
    pub const IO: i32 = 2001;

    /// File name has fewer than three hyphen-delimited fields
    pub const MALFORMED_FILE_NAME: i32 = 2002;

    /// Emotion code is not part of the fixed code table
    pub const UNKNOWN_EMOTION_CODE: i32 = 2003;

    /// Loading an audio file failed
    pub const AUDIO: i32 = 2004;

    /// Feature extraction failed
    pub const FEATURE: i32 = 2005;

    /// Reading or writing the persisted dataset failed
    pub const PERSIST: i32 = 2006;

    /// Feature matrix rows and label count disagree
    pub const SHAPE_MISMATCH: i32 = 2007;

    /// Label was not seen when the encoder was fitted
    pub const UNKNOWN_LABEL: i32 = 2008;

    /// Train/test split parameters are out of range
    pub const INVALID_SPLIT: i32 = 2009;
}

/// Log a dataset error with structured context
pub fn log_dataset_error(err: &DatasetError, context: &str) {
    error!(
        "Dataset error in {}: code={}, component=DatasetBuilder, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Dataset-related errors
///
/// Every variant aborts a dataset build; the builder never skips a file.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// Directory traversal or file access failed
    Io { path: String, reason: String },

    /// File name does not carry an emotion field at index 2
    MalformedFileName { file_name: String },

    /// Emotion code missing from the code table
    UnknownEmotionCode { code: String },

    /// Signal loader failure
    Audio(AudioError),

    /// Feature extractor failure
    Feature(FeatureError),

    /// Serialization of the `X`/`y` snapshot failed
    Persist { path: String, reason: String },

    /// Feature matrix row count differs from the label count
    ShapeMismatch { rows: usize, labels: usize },

    /// Label not known to the fitted encoder
    UnknownLabel { label: String },

    /// Split fraction outside (0, 1) or too few rows to split
    InvalidSplit { reason: String },
}

impl ErrorCode for DatasetError {
    fn code(&self) -> i32 {
        match self {
            DatasetError::Io { .. } => DatasetErrorCodes::IO,
            DatasetError::MalformedFileName { .. } => DatasetErrorCodes::MALFORMED_FILE_NAME,
            DatasetError::UnknownEmotionCode { .. } => DatasetErrorCodes::UNKNOWN_EMOTION_CODE,
            DatasetError::Audio(_) => DatasetErrorCodes::AUDIO,
            DatasetError::Feature(_) => DatasetErrorCodes::FEATURE,
            DatasetError::Persist { .. } => DatasetErrorCodes::PERSIST,
            DatasetError::ShapeMismatch { .. } => DatasetErrorCodes::SHAPE_MISMATCH,
            DatasetError::UnknownLabel { .. } => DatasetErrorCodes::UNKNOWN_LABEL,
            DatasetError::InvalidSplit { .. } => DatasetErrorCodes::INVALID_SPLIT,
        }
    }

    fn message(&self) -> String {
        match self {
            DatasetError::Io { path, reason } => format!("I/O error at {}: {}", path, reason),
            DatasetError::MalformedFileName { file_name } => format!(
                "File name {} has no emotion field (expected <modality>-<channel>-<emotion>-...)",
                file_name
            ),
            DatasetError::UnknownEmotionCode { code } => {
                format!("Unknown emotion code: {}", code)
            }
            DatasetError::Audio(err) => err.to_string(),
            DatasetError::Feature(err) => err.to_string(),
            DatasetError::Persist { path, reason } => {
                format!("Failed to persist dataset at {}: {}", path, reason)
            }
            DatasetError::ShapeMismatch { rows, labels } => format!(
                "Feature matrix has {} rows but {} labels were given",
                rows, labels
            ),
            DatasetError::UnknownLabel { label } => {
                format!("Label {} was not seen when fitting the encoder", label)
            }
            DatasetError::InvalidSplit { reason } => format!("Invalid split: {}", reason),
        }
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DatasetError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Audio(err) => Some(err),
            DatasetError::Feature(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AudioError> for DatasetError {
    fn from(err: AudioError) -> Self {
        DatasetError::Audio(err)
    }
}

impl From<FeatureError> for DatasetError {
    fn from(err: FeatureError) -> Self {
        DatasetError::Feature(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_error_codes() {
        assert_eq!(
            DatasetError::UnknownEmotionCode {
                code: "09".to_string()
            }
            .code(),
            DatasetErrorCodes::UNKNOWN_EMOTION_CODE
        );
        assert_eq!(
            DatasetError::MalformedFileName {
                file_name: "03-01".to_string()
            }
            .code(),
            DatasetErrorCodes::MALFORMED_FILE_NAME
        );
        assert_eq!(
            DatasetError::ShapeMismatch { rows: 3, labels: 2 }.code(),
            DatasetErrorCodes::SHAPE_MISMATCH
        );
    }

    #[test]
    fn test_audio_error_conversion() {
        let audio_err = AudioError::InvalidSignal {
            reason: "empty".to_string(),
        };
        let err: DatasetError = audio_err.clone().into();
        assert_eq!(err.code(), DatasetErrorCodes::AUDIO);
        assert!(err.message().contains("Invalid signal: empty"));
        assert_eq!(err, DatasetError::Audio(audio_err));
    }

    #[test]
    fn test_dataset_error_display() {
        let err = DatasetError::UnknownEmotionCode {
            code: "09".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("code 2003"));
        assert!(display.contains("Unknown emotion code: 09"));
    }
}
