// Audio module - sample sequences and the WAV signal loader

pub mod loader;
pub mod signal;

// Re-export commonly used types for convenience
pub use loader::{load_signal, DEFAULT_SAMPLE_RATE};
pub use signal::SampleSequence;
