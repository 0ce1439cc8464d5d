// MFCC module - mel-frequency cepstral coefficients
//
// Pipeline per frame: mel power spectrogram -> decibels (top_db clipped over
// the whole signal) -> orthonormal DCT-II -> first n_mfcc coefficients.

use std::f32::consts::PI;

use super::mel::{power_to_db, MelSpectrogram};

/// Orthonormal DCT-II basis, `n_out` rows of `n_in` weights
fn dct_basis(n_out: usize, n_in: usize) -> Vec<Vec<f32>> {
    let n = n_in as f32;
    (0..n_out)
        .map(|k| {
            let scale = if k == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };
            (0..n_in)
                .map(|i| scale * (PI * k as f32 * (2 * i + 1) as f32 / (2.0 * n)).cos())
                .collect()
        })
        .collect()
}

/// MFCC extractor with pre-computed mel filterbank and DCT basis
pub struct MfccExtractor {
    mel: MelSpectrogram,
    dct: Vec<Vec<f32>>,
    top_db: f32,
}

impl MfccExtractor {
    /// Create a new MFCC extractor
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `n_fft` / `hop_length` - STFT sizing
    /// * `n_mels` - Mel bands fed to the cepstral transform
    /// * `n_mfcc` - Coefficients kept per frame
    /// * `top_db` - Dynamic range kept by the dB conversion
    pub fn new(
        sample_rate: u32,
        n_fft: usize,
        hop_length: usize,
        n_mels: usize,
        n_mfcc: usize,
        top_db: f32,
    ) -> Self {
        Self {
            mel: MelSpectrogram::new(sample_rate, n_fft, hop_length, n_mels),
            dct: dct_basis(n_mfcc.min(n_mels), n_mels),
            top_db,
        }
    }

    pub fn n_mfcc(&self) -> usize {
        self.dct.len()
    }

    /// Compute MFCCs for every frame (frames x n_mfcc)
    pub fn compute(&self, signal: &[f32]) -> Vec<Vec<f32>> {
        let log_mel = power_to_db(&self.mel.compute(signal), self.top_db);
        log_mel
            .iter()
            .map(|frame| {
                self.dct
                    .iter()
                    .map(|basis| basis.iter().zip(frame).map(|(b, x)| b * x).sum())
                    .collect()
            })
            .collect()
    }
}
