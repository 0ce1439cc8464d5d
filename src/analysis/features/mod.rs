// FeatureExtractor - fixed-length acoustic descriptors for emotion classification
//
// This module turns a waveform into one feature vector by averaging per-frame
// spectral analyses over time. Every block is computed from the raw waveform
// with its own spectrogram, using the same frame/hop sizing for every call so
// that vectors from different files are comparable.
//
// Module organization:
// - types: Feature selection (FeatureBlock, FeatureSet) and FeatureVector
// - fft: STFT computation with windowing and time pooling
// - mel: Mel filterbank, mel power spectrogram, dB conversion
// - mfcc: Cepstral coefficients from the log-mel spectrogram
// - chroma: Pitch-class profile from the STFT magnitude
// - mod.rs: Coordinator (FeatureExtractor)
//
// Blocks, in output order:
// 1. Timbral: mean MFCCs (40)
// 2. Harmonic: mean chroma (12)
// 3. Spectral energy: mean mel power spectrogram (128)

mod chroma;
mod fft;
mod mel;
mod mfcc;
mod types;

pub use chroma::{chroma_filterbank, ChromaExtractor};
pub use fft::{mean_over_frames, StftProcessor};
pub use mel::{hz_to_mel, mel_filterbank, mel_to_hz, power_to_db, MelSpectrogram};
pub use mfcc::MfccExtractor;
pub use types::{FeatureBlock, FeatureSet, FeatureVector};

use crate::audio::SampleSequence;
use crate::config::FeatureConfig;
use crate::error::FeatureError;

/// FeatureExtractor coordinates the per-block analyses
///
/// Filterbanks and FFT plans are built once for the configured sample rate
/// and reused for every signal.
pub struct FeatureExtractor {
    config: FeatureConfig,
    mfcc: MfccExtractor,
    chroma: ChromaExtractor,
    mel: MelSpectrogram,
}

impl FeatureExtractor {
    /// Create a new FeatureExtractor
    ///
    /// # Arguments
    /// * `config` - Sample rate and analysis sizes shared by all blocks
    ///
    /// # Returns
    /// * `Err(FeatureError::InvalidConfig)` - Sizes cannot produce a filterbank
    pub fn new(config: FeatureConfig) -> Result<Self, FeatureError> {
        config.validate()?;
        let sr = config.sample_rate;
        Ok(Self {
            mfcc: MfccExtractor::new(
                sr,
                config.n_fft,
                config.hop_length,
                config.n_mels,
                config.n_mfcc,
                config.top_db,
            ),
            chroma: ChromaExtractor::new(sr, config.n_fft, config.hop_length, config.n_chroma),
            mel: MelSpectrogram::new(sr, config.n_fft, config.hop_length, config.n_mels),
            config,
        })
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Extract the enabled feature blocks from a signal
    ///
    /// # Arguments
    /// * `signal` - Sample sequence at the configured sample rate
    /// * `blocks` - Blocks to compute; an empty set yields an empty vector
    ///
    /// # Returns
    /// * `Ok(FeatureVector)` - Enabled blocks concatenated in output order
    /// * `Err(FeatureError::SampleRateMismatch)` - Signal sampled at another rate
    pub fn extract(
        &self,
        signal: &SampleSequence,
        blocks: &FeatureSet,
    ) -> Result<FeatureVector, FeatureError> {
        if signal.sample_rate() != self.config.sample_rate {
            return Err(FeatureError::SampleRateMismatch {
                expected: self.config.sample_rate,
                actual: signal.sample_rate(),
            });
        }

        let samples = signal.samples();
        let mut vector = Vec::with_capacity(blocks.vector_len(&self.config));
        for block in blocks.iter() {
            let pooled = match block {
                FeatureBlock::Timbral => {
                    mean_over_frames(&self.mfcc.compute(samples), self.mfcc.n_mfcc())
                }
                FeatureBlock::Harmonic => {
                    mean_over_frames(&self.chroma.compute(samples), self.chroma.n_chroma())
                }
                FeatureBlock::SpectralEnergy => {
                    mean_over_frames(&self.mel.compute(samples), self.mel.n_mels())
                }
            };
            vector.extend(pooled);
        }

        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Generate pure sine wave for testing
    fn generate_sine_wave(sample_rate: u32, frequency: f32, duration_samples: usize) -> SampleSequence {
        let samples = (0..duration_samples)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                0.5 * (2.0 * std::f32::consts::PI * frequency * t).sin()
            })
            .collect();
        SampleSequence::new(samples, sample_rate).unwrap()
    }

    /// Generate white noise for testing
    fn generate_white_noise(sample_rate: u32, duration_samples: usize) -> SampleSequence {
        use rand::{rngs::StdRng, Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(5);
        let samples = (0..duration_samples)
            .map(|_| rng.gen_range(-0.5..0.5))
            .collect();
        SampleSequence::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_full_vector_length() {
        let extractor = FeatureExtractor::new(FeatureConfig::default()).unwrap();
        let signal = generate_sine_wave(22_050, 440.0, 11_025);
        let features = extractor.extract(&signal, &FeatureSet::all()).unwrap();

        assert_eq!(features.len(), 180);
        assert!(features.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_partial_vector_lengths() {
        let extractor = FeatureExtractor::new(FeatureConfig::default()).unwrap();
        let signal = generate_sine_wave(22_050, 440.0, 4096);

        let cases = [
            (FeatureSet::empty().with(FeatureBlock::Timbral), 40),
            (FeatureSet::empty().with(FeatureBlock::Harmonic), 12),
            (FeatureSet::empty().with(FeatureBlock::SpectralEnergy), 128),
            (
                FeatureSet::empty()
                    .with(FeatureBlock::Timbral)
                    .with(FeatureBlock::Harmonic),
                52,
            ),
        ];
        for (set, expected) in cases {
            let features = extractor.extract(&signal, &set).unwrap();
            assert_eq!(features.len(), expected, "set {:?}", set);
        }
    }

    #[test]
    fn test_empty_set_yields_empty_vector() {
        let extractor = FeatureExtractor::new(FeatureConfig::default()).unwrap();
        let signal = generate_sine_wave(22_050, 440.0, 4096);
        let features = extractor.extract(&signal, &FeatureSet::empty()).unwrap();
        assert!(features.is_empty());
    }

    #[test]
    fn test_blocks_are_concatenated_in_order() {
        let extractor = FeatureExtractor::new(FeatureConfig::default()).unwrap();
        let signal = generate_white_noise(22_050, 8192);

        let full = extractor.extract(&signal, &FeatureSet::all()).unwrap();
        let timbral = extractor
            .extract(&signal, &FeatureSet::empty().with(FeatureBlock::Timbral))
            .unwrap();
        let harmonic = extractor
            .extract(&signal, &FeatureSet::empty().with(FeatureBlock::Harmonic))
            .unwrap();
        let energy = extractor
            .extract(&signal, &FeatureSet::empty().with(FeatureBlock::SpectralEnergy))
            .unwrap();

        assert_eq!(&full[..40], timbral.as_slice());
        assert_eq!(&full[40..52], harmonic.as_slice());
        assert_eq!(&full[52..], energy.as_slice());
    }

    #[test]
    fn test_sample_rate_mismatch() {
        let extractor = FeatureExtractor::new(FeatureConfig::default()).unwrap();
        let signal = generate_sine_wave(16_000, 440.0, 4096);
        let result = extractor.extract(&signal, &FeatureSet::all());
        assert_eq!(
            result,
            Err(FeatureError::SampleRateMismatch {
                expected: 22_050,
                actual: 16_000
            })
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = FeatureConfig {
            n_fft: 1,
            ..FeatureConfig::default()
        };
        match FeatureExtractor::new(config) {
            Err(FeatureError::InvalidConfig { field, .. }) => assert_eq!(field, "n_fft"),
            Err(other) => panic!("Expected InvalidConfig, got {:?}", other),
            Ok(_) => panic!("Expected InvalidConfig, got an extractor"),
        }
    }

    #[test]
    fn test_louder_signal_has_more_mel_energy() {
        let extractor = FeatureExtractor::new(FeatureConfig::default()).unwrap();
        let energy = FeatureSet::empty().with(FeatureBlock::SpectralEnergy);

        let quiet = generate_sine_wave(22_050, 1000.0, 8192);
        let loud = SampleSequence::new(
            quiet.samples().iter().map(|s| s * 2.0).collect(),
            22_050,
        )
        .unwrap();

        let quiet_sum: f32 = extractor.extract(&quiet, &energy).unwrap().iter().sum();
        let loud_sum: f32 = extractor.extract(&loud, &energy).unwrap().iter().sum();
        println!("quiet={} loud={}", quiet_sum, loud_sum);
        // Power scales with the square of amplitude
        assert!((loud_sum / quiet_sum - 4.0).abs() < 1e-2);
    }
}
