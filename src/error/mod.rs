// Error types for the speech emotion feature pipeline
//
// This module defines custom error types for audio loading, feature extraction
// and dataset operations, providing structured error handling with numeric
// error codes so failures can be surfaced verbatim to the operator.

mod audio;
mod dataset;
mod features;

pub use audio::{log_audio_error, AudioError, AudioErrorCodes};
pub use dataset::{log_dataset_error, DatasetError, DatasetErrorCodes};
pub use features::{FeatureError, FeatureErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent reporting from the library
/// and the CLI.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
