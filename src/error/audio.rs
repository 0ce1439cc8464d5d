// Audio error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Audio error code constants
///
/// Error code range: 1001-1003
pub struct AudioErrorCodes {}

impl AudioErrorCodes {
    /// Audio file is missing or could not be read
    pub const LOAD_FAILED: i32 = 1001;

    /// Container or sample encoding is not supported
    pub const UNSUPPORTED_FORMAT: i32 = 1002;

    /// Decoded signal violates the sample sequence invariants
    pub const INVALID_SIGNAL: i32 = 1003;
}

/// Log an audio error with structured context
///
/// Logs the numeric code, the component and the message so that the
/// failing file can be identified from the log alone.
pub fn log_audio_error(err: &AudioError, context: &str) {
    error!(
        "Audio error in {}: code={}, component=SignalLoader, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Audio-related errors
///
/// These errors cover reading audio files from disk and validating the
/// decoded sample sequence.
///
/// Error code ranges: 1001-1003
#[derive(Debug, Clone, PartialEq)]
pub enum AudioError {
    /// File is missing, unreadable or not a valid WAV container
    LoadFailed { path: String, reason: String },

    /// WAV encoding that the loader cannot convert to floating point
    UnsupportedFormat { path: String, details: String },

    /// Signal is empty, has a zero sample rate or contains non-finite samples
    InvalidSignal { reason: String },
}

impl ErrorCode for AudioError {
    fn code(&self) -> i32 {
        match self {
            AudioError::LoadFailed { .. } => AudioErrorCodes::LOAD_FAILED,
            AudioError::UnsupportedFormat { .. } => AudioErrorCodes::UNSUPPORTED_FORMAT,
            AudioError::InvalidSignal { .. } => AudioErrorCodes::INVALID_SIGNAL,
        }
    }

    fn message(&self) -> String {
        match self {
            AudioError::LoadFailed { path, reason } => {
                format!("Failed to load {}: {}", path, reason)
            }
            AudioError::UnsupportedFormat { path, details } => {
                format!("Unsupported audio format in {}: {}", path, details)
            }
            AudioError::InvalidSignal { reason } => format!("Invalid signal: {}", reason),
        }
    }
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AudioError::{} (code {}): {}",
            self.variant_name(),
            self.code(),
            self.message()
        )
    }
}

impl AudioError {
    fn variant_name(&self) -> &'static str {
        match self {
            AudioError::LoadFailed { .. } => "LoadFailed",
            AudioError::UnsupportedFormat { .. } => "UnsupportedFormat",
            AudioError::InvalidSignal { .. } => "InvalidSignal",
        }
    }
}

impl std::error::Error for AudioError {}
