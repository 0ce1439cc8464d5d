// Feature extraction error types and constants

use crate::error::ErrorCode;
use std::fmt;

/// Feature extraction error code constants
///
/// Error code range: 3001-3002
pub struct FeatureErrorCodes {}

impl FeatureErrorCodes {
    /// Signal sample rate differs from the rate the filterbanks were built for
    pub const SAMPLE_RATE_MISMATCH: i32 = 3001;

    /// Analysis parameters cannot produce a filterbank
    pub const INVALID_CONFIG: i32 = 3002;
}

/// Feature extraction errors
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// Signal was sampled at a different rate than the extractor expects
    SampleRateMismatch { expected: u32, actual: u32 },

    /// Analysis parameter out of range
    InvalidConfig { field: String, reason: String },
}

impl ErrorCode for FeatureError {
    fn code(&self) -> i32 {
        match self {
            FeatureError::SampleRateMismatch { .. } => FeatureErrorCodes::SAMPLE_RATE_MISMATCH,
            FeatureError::InvalidConfig { .. } => FeatureErrorCodes::INVALID_CONFIG,
        }
    }

    fn message(&self) -> String {
        match self {
            FeatureError::SampleRateMismatch { expected, actual } => format!(
                "Sample rate mismatch: extractor expects {} Hz, signal is {} Hz",
                expected, actual
            ),
            FeatureError::InvalidConfig { field, reason } => {
                format!("Invalid feature config: {} {}", field, reason)
            }
        }
    }
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            FeatureError::SampleRateMismatch { .. } => "SampleRateMismatch",
            FeatureError::InvalidConfig { .. } => "InvalidConfig",
        };
        write!(
            f,
            "FeatureError::{} (code {}): {}",
            variant,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for FeatureError {}
