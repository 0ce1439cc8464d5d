// FFT module - short-time Fourier transform
//
// Computes magnitude and power spectrograms over centered, Hann-windowed
// frames. The signal is zero-padded by n_fft/2 on both sides so that frame t
// is centered on sample t * hop_length, giving 1 + len / hop_length frames.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// STFT processor with a pre-planned FFT and pre-computed window
pub struct StftProcessor {
    fft: Arc<dyn Fft<f32>>,
    n_fft: usize,
    hop_length: usize,
    /// Periodic Hann window (pre-computed)
    window: Vec<f32>,
}

impl StftProcessor {
    /// Create a new STFT processor
    ///
    /// # Arguments
    /// * `n_fft` - FFT window size
    /// * `hop_length` - Samples between consecutive frame centers
    pub fn new(n_fft: usize, hop_length: usize) -> Self {
        // Periodic Hann window to reduce spectral leakage
        let window = (0..n_fft)
            .map(|i| 0.5 * (1.0 - ((2.0 * std::f32::consts::PI * i as f32) / n_fft as f32).cos()))
            .collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n_fft);

        Self {
            fft,
            n_fft,
            hop_length: hop_length.max(1),
            window,
        }
    }

    /// Number of frequency bins per frame (n_fft / 2 + 1)
    pub fn n_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Number of frames produced for a signal of `len` samples
    pub fn n_frames(&self, len: usize) -> usize {
        1 + len / self.hop_length
    }

    /// Compute the magnitude spectrogram
    ///
    /// # Returns
    /// One magnitude spectrum (length n_bins) per frame
    pub fn magnitude(&self, signal: &[f32]) -> Vec<Vec<f32>> {
        self.frames(signal, |c| c.norm())
    }

    /// Compute the power spectrogram (squared magnitude)
    pub fn power(&self, signal: &[f32]) -> Vec<Vec<f32>> {
        self.frames(signal, |c| c.norm_sqr())
    }

    fn frames<F>(&self, signal: &[f32], reduce: F) -> Vec<Vec<f32>>
    where
        F: Fn(&Complex<f32>) -> f32,
    {
        let pad = self.n_fft / 2;
        let n_frames = self.n_frames(signal.len());
        let mut buffer = vec![Complex::new(0.0f32, 0.0); self.n_fft];
        let mut scratch = vec![Complex::new(0.0f32, 0.0); self.fft.get_inplace_scratch_len()];
        let mut spectrogram = Vec::with_capacity(n_frames);

        for frame in 0..n_frames {
            // Frame start in padded coordinates is frame * hop; shift back by pad
            let start = (frame * self.hop_length) as isize - pad as isize;
            for (i, slot) in buffer.iter_mut().enumerate() {
                let idx = start + i as isize;
                let sample = if idx >= 0 && (idx as usize) < signal.len() {
                    signal[idx as usize]
                } else {
                    0.0
                };
                *slot = Complex::new(sample * self.window[i], 0.0);
            }

            self.fft.process_with_scratch(&mut buffer, &mut scratch);

            // Only positive frequencies (real-valued input is symmetric)
            spectrogram.push(buffer[..self.n_bins()].iter().map(&reduce).collect());
        }

        spectrogram
    }
}

/// Center frequency of every FFT bin in Hz
pub fn fft_frequencies(sample_rate: u32, n_fft: usize) -> Vec<f32> {
    let n_bins = n_fft / 2 + 1;
    (0..n_bins)
        .map(|i| i as f32 * sample_rate as f32 / n_fft as f32)
        .collect()
}

/// Average per-frame vectors over time
///
/// # Arguments
/// * `frames` - Time-major matrix (frames x coefficients)
/// * `width` - Number of coefficients per frame
pub fn mean_over_frames(frames: &[Vec<f32>], width: usize) -> Vec<f32> {
    let mut mean = vec![0.0f64; width];
    for frame in frames {
        for (acc, &value) in mean.iter_mut().zip(frame) {
            *acc += value as f64;
        }
    }

    let count = frames.len().max(1) as f64;
    mean.into_iter().map(|v| (v / count) as f32).collect()
}
