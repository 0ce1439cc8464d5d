// SampleSequence - validated mono audio buffer
//
// A sample sequence pairs mono f32 amplitudes with the rate they were sampled
// at. Sequences are immutable once built: augmenters derive new sequences
// rather than editing one in place.

use crate::error::AudioError;

/// Mono floating-point signal with its sampling rate
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSequence {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleSequence {
    /// Create a sample sequence, enforcing its invariants
    ///
    /// # Arguments
    /// * `samples` - Mono amplitudes
    /// * `sample_rate` - Sampling rate in Hz
    ///
    /// # Returns
    /// * `Ok(SampleSequence)` - Non-empty sequence of finite samples
    /// * `Err(AudioError::InvalidSignal)` - Empty input, zero rate or a NaN/inf sample
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, AudioError> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSignal {
                reason: "sample rate must be > 0".to_string(),
            });
        }
        if samples.is_empty() {
            return Err(AudioError::InvalidSignal {
                reason: "signal contains no samples".to_string(),
            });
        }
        if let Some(idx) = samples.iter().position(|s| !s.is_finite()) {
            return Err(AudioError::InvalidSignal {
                reason: format!("non-finite sample at index {}", idx),
            });
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Derive a sequence at the same rate from already-validated samples.
    ///
    /// Used by augmenters, whose outputs keep the input length.
    pub(crate) fn derive(&self, samples: Vec<f32>) -> Self {
        debug_assert_eq!(samples.len(), self.samples.len());
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sequence() {
        let seq = SampleSequence::new(vec![0.0, 0.5, -0.5], 22_050).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.sample_rate(), 22_050);
        assert!(!seq.is_empty());
    }

    #[test]
    fn test_rejects_empty_signal() {
        let result = SampleSequence::new(Vec::new(), 22_050);
        assert!(matches!(result, Err(AudioError::InvalidSignal { .. })));
    }

    #[test]
    fn test_rejects_zero_rate() {
        let result = SampleSequence::new(vec![0.1], 0);
        assert!(matches!(result, Err(AudioError::InvalidSignal { .. })));
    }

    #[test]
    fn test_rejects_non_finite_samples() {
        let result = SampleSequence::new(vec![0.1, f32::NAN, 0.2], 22_050);
        match result {
            Err(AudioError::InvalidSignal { reason }) => assert!(reason.contains("index 1")),
            other => panic!("Expected InvalidSignal, got {:?}", other),
        }
    }

    #[test]
    fn test_duration() {
        let seq = SampleSequence::new(vec![0.0; 11_025], 22_050).unwrap();
        assert!((seq.duration_secs() - 0.5).abs() < 1e-6);
    }
}
