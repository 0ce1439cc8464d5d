// Mel module - mel filterbank and mel spectrogram
//
// Uses the Slaney mel scale (linear below 1 kHz, logarithmic above) and
// Slaney area normalization, so each triangular filter has unit area in Hz
// and band energies are comparable across bandwidths.
//
// References:
// - Slaney, M. (1998). Auditory Toolbox, Technical Report #1998-010

use super::fft::{fft_frequencies, StftProcessor};

const F_SP: f32 = 200.0 / 3.0;
const MIN_LOG_HZ: f32 = 1000.0;
const MIN_LOG_MEL: f32 = MIN_LOG_HZ / F_SP;

fn log_step() -> f32 {
    6.4f32.ln() / 27.0
}

/// Convert frequency in Hz to Slaney mels
pub fn hz_to_mel(hz: f32) -> f32 {
    if hz >= MIN_LOG_HZ {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / log_step()
    } else {
        hz / F_SP
    }
}

/// Convert Slaney mels to frequency in Hz
pub fn mel_to_hz(mel: f32) -> f32 {
    if mel >= MIN_LOG_MEL {
        MIN_LOG_HZ * (log_step() * (mel - MIN_LOG_MEL)).exp()
    } else {
        F_SP * mel
    }
}

/// Build a mel filterbank matrix
///
/// # Arguments
/// * `n_mels` - Number of mel bands
/// * `n_fft` - FFT size the filters are applied to
/// * `sample_rate` - Audio sample rate in Hz
/// * `fmin` - Lowest band edge in Hz
/// * `fmax` - Highest band edge in Hz
///
/// # Returns
/// `n_mels` filters, each with `n_fft / 2 + 1` weights
pub fn mel_filterbank(
    n_mels: usize,
    n_fft: usize,
    sample_rate: u32,
    fmin: f32,
    fmax: f32,
) -> Vec<Vec<f32>> {
    let fft_freqs = fft_frequencies(sample_rate, n_fft);

    // n_mels + 2 band edges equally spaced on the mel scale
    let mel_min = hz_to_mel(fmin);
    let mel_max = hz_to_mel(fmax);
    let mel_f: Vec<f32> = (0..n_mels + 2)
        .map(|i| mel_to_hz(mel_min + (mel_max - mel_min) * i as f32 / (n_mels + 1) as f32))
        .collect();

    (0..n_mels)
        .map(|i| {
            let (left, center, right) = (mel_f[i], mel_f[i + 1], mel_f[i + 2]);
            let enorm = 2.0 / (right - left);
            fft_freqs
                .iter()
                .map(|&f| {
                    let lower = (f - left) / (center - left);
                    let upper = (right - f) / (right - center);
                    lower.min(upper).max(0.0) * enorm
                })
                .collect()
        })
        .collect()
}

/// Apply a filterbank to every frame of a spectrogram
pub fn apply_filterbank(spectrogram: &[Vec<f32>], filterbank: &[Vec<f32>]) -> Vec<Vec<f32>> {
    spectrogram
        .iter()
        .map(|frame| {
            filterbank
                .iter()
                .map(|filter| filter.iter().zip(frame).map(|(w, p)| w * p).sum())
                .collect()
        })
        .collect()
}

/// Convert a power spectrogram to decibels
///
/// `10 * log10(max(amin, S))` relative to a reference of 1.0, then clipped
/// to at most `top_db` below the spectrogram's peak.
pub fn power_to_db(spectrogram: &[Vec<f32>], top_db: f32) -> Vec<Vec<f32>> {
    const AMIN: f32 = 1e-10;

    let db: Vec<Vec<f32>> = spectrogram
        .iter()
        .map(|frame| frame.iter().map(|&p| 10.0 * p.max(AMIN).log10()).collect())
        .collect();

    let peak = db
        .iter()
        .flatten()
        .copied()
        .fold(f32::NEG_INFINITY, f32::max);
    let floor = peak - top_db;

    db.into_iter()
        .map(|frame| frame.into_iter().map(|v| v.max(floor)).collect())
        .collect()
}

/// Mel power spectrogram generator with a pre-computed filterbank
pub struct MelSpectrogram {
    stft: StftProcessor,
    filterbank: Vec<Vec<f32>>,
}

impl MelSpectrogram {
    /// Create a generator covering 0 Hz to Nyquist
    pub fn new(sample_rate: u32, n_fft: usize, hop_length: usize, n_mels: usize) -> Self {
        Self {
            stft: StftProcessor::new(n_fft, hop_length),
            filterbank: mel_filterbank(n_mels, n_fft, sample_rate, 0.0, sample_rate as f32 / 2.0),
        }
    }

    pub fn n_mels(&self) -> usize {
        self.filterbank.len()
    }

    /// Compute the mel power spectrogram (frames x n_mels) from a waveform
    pub fn compute(&self, signal: &[f32]) -> Vec<Vec<f32>> {
        let power = self.stft.power(signal);
        apply_filterbank(&power, &self.filterbank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mel_scale_roundtrip() {
        for hz in [0.0, 200.0, 999.0, 1000.0, 4000.0, 11_025.0] {
            let back = mel_to_hz(hz_to_mel(hz));
            assert!((back - hz).abs() < 0.05, "{} -> {}", hz, back);
        }
        assert!((hz_to_mel(1000.0) - 15.0).abs() < 1e-5);
    }

    #[test]
    fn test_filterbank_shape_and_coverage() {
        let fb = mel_filterbank(128, 2048, 22_050, 0.0, 11_025.0);
        assert_eq!(fb.len(), 128);
        assert!(fb.iter().all(|f| f.len() == 1025));
        assert!(fb.iter().flatten().all(|&w| w >= 0.0));

        // Every band above the lowest few catches at least one FFT bin
        let empty = fb.iter().filter(|f| f.iter().all(|&w| w == 0.0)).count();
        assert!(empty < 10, "{} empty mel bands", empty);
    }

    #[test]
    fn test_mel_energy_peaks_near_tone() {
        let sample_rate = 22_050;
        let mel = MelSpectrogram::new(sample_rate, 2048, 512, 128);
        let signal: Vec<f32> = (0..sample_rate as usize)
            .map(|i| (2.0 * std::f32::consts::PI * 2000.0 * i as f32 / sample_rate as f32).sin())
            .collect();
        let spec = mel.compute(&signal);
        let frame = &spec[spec.len() / 2];

        let peak_band = frame
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        let fb = mel_filterbank(128, 2048, sample_rate, 0.0, 11_025.0);
        // The 2 kHz bin (index ~186) must carry weight in the peak band
        assert!(fb[peak_band][186] > 0.0, "peak band {}", peak_band);
    }

    #[test]
    fn test_power_to_db_clips_dynamic_range() {
        let spec = vec![vec![1.0, 1e-3, 0.0]];
        let db = power_to_db(&spec, 80.0);
        assert!((db[0][0] - 0.0).abs() < 1e-5);
        assert!((db[0][1] + 30.0).abs() < 1e-4);
        assert!((db[0][2] + 80.0).abs() < 1e-4);
    }
}
