// Chroma module - 12-bin pitch class profile from an STFT magnitude
//
// Each FFT bin is mapped onto a continuous pitch-class axis (A440 reference,
// no tuning offset) and spread over neighbouring pitch classes with a
// Gaussian whose width follows the bin spacing. Columns are L2-normalized,
// weighted toward a centre octave, and rolled so that index 0 is C.
// Frames are then normalized by their maximum so loudness drops out.
//
// References:
// - Ellis, D. (2007). Chroma feature analysis and synthesis

use super::fft::StftProcessor;

/// Octave the Gaussian octave weighting is centred on (C5 region)
const CENTER_OCTAVE: f32 = 5.0;

/// Standard deviation of the octave weighting, in octaves
const OCTAVE_WIDTH: f32 = 2.0;

/// Frames whose peak is below this are left unnormalized
const NORM_THRESHOLD: f32 = f32::MIN_POSITIVE;

/// Build a chroma filterbank
///
/// # Arguments
/// * `sample_rate` - Audio sample rate in Hz
/// * `n_fft` - FFT size
/// * `n_chroma` - Number of pitch classes (12 for semitones)
///
/// # Returns
/// `n_chroma` rows of `n_fft / 2 + 1` weights
pub fn chroma_filterbank(sample_rate: u32, n_fft: usize, n_chroma: usize) -> Vec<Vec<f32>> {
    let n_chroma_f = n_chroma as f32;
    let a440 = 440.0f32;

    // Pitch-class position of every FFT bin; bin 0 (DC) sits 1.5 octaves below bin 1
    let mut frq_bins: Vec<f32> = (1..n_fft)
        .map(|i| {
            let freq = i as f32 * sample_rate as f32 / n_fft as f32;
            n_chroma_f * (freq / (a440 / 16.0)).log2()
        })
        .collect();
    frq_bins.insert(0, frq_bins[0] - 1.5 * n_chroma_f);

    let mut bin_widths: Vec<f32> = frq_bins
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).max(1.0))
        .collect();
    bin_widths.push(1.0);

    let half = (n_chroma_f / 2.0).round();
    let mut weights = vec![vec![0.0f32; n_fft]; n_chroma];
    for (col, (&frq, &width)) in frq_bins.iter().zip(&bin_widths).enumerate() {
        for (chroma, row) in weights.iter_mut().enumerate() {
            // Signed distance to this pitch class, wrapped into [-half, half)
            let d = (frq - chroma as f32 + half + 10.0 * n_chroma_f).rem_euclid(n_chroma_f) - half;
            row[col] = (-0.5 * (2.0 * d / width).powi(2)).exp();
        }
    }

    for col in 0..n_fft {
        let norm = weights.iter().map(|row| row[col] * row[col]).sum::<f32>().sqrt();
        let octave_weight =
            (-0.5 * ((frq_bins[col] / n_chroma_f - CENTER_OCTAVE) / OCTAVE_WIDTH).powi(2)).exp();
        for row in weights.iter_mut() {
            if norm > 0.0 {
                row[col] /= norm;
            }
            row[col] *= octave_weight;
        }
    }

    // Rotate so that row 0 is C instead of A
    weights.rotate_left(3 * (n_chroma / 12));

    let n_bins = n_fft / 2 + 1;
    weights
        .into_iter()
        .map(|mut row| {
            row.truncate(n_bins);
            row
        })
        .collect()
}

/// Chromagram generator with a pre-computed filterbank
pub struct ChromaExtractor {
    stft: StftProcessor,
    filterbank: Vec<Vec<f32>>,
}

impl ChromaExtractor {
    pub fn new(sample_rate: u32, n_fft: usize, hop_length: usize, n_chroma: usize) -> Self {
        Self {
            stft: StftProcessor::new(n_fft, hop_length),
            filterbank: chroma_filterbank(sample_rate, n_fft, n_chroma),
        }
    }

    pub fn n_chroma(&self) -> usize {
        self.filterbank.len()
    }

    /// Compute the chromagram (frames x n_chroma) from a waveform
    ///
    /// The STFT magnitude is computed once here and projected onto the
    /// pitch-class filterbank.
    pub fn compute(&self, signal: &[f32]) -> Vec<Vec<f32>> {
        let magnitude = self.stft.magnitude(signal);
        magnitude
            .iter()
            .map(|frame| {
                let raw: Vec<f32> = self
                    .filterbank
                    .iter()
                    .map(|filter| filter.iter().zip(frame).map(|(w, m)| w * m).sum())
                    .collect();
                let peak = raw.iter().copied().fold(0.0f32, |acc, v| acc.max(v.abs()));
                if peak < NORM_THRESHOLD {
                    raw
                } else {
                    raw.into_iter().map(|v| v / peak).collect()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::fft::mean_over_frames;

    fn generate_sine_wave(sample_rate: u32, frequency: f32, duration_samples: usize) -> Vec<f32> {
        (0..duration_samples)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (2.0 * std::f32::consts::PI * frequency * t).sin()
            })
            .collect()
    }

    fn argmax(values: &[f32]) -> usize {
        values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap()
    }

    #[test]
    fn test_filterbank_shape() {
        let fb = chroma_filterbank(22_050, 2048, 12);
        assert_eq!(fb.len(), 12);
        assert!(fb.iter().all(|row| row.len() == 1025));
        assert!(fb.iter().flatten().all(|&w| w >= 0.0 && w.is_finite()));
    }

    #[test]
    fn test_a440_maps_to_pitch_class_a() {
        let sample_rate = 22_050;
        let chroma = ChromaExtractor::new(sample_rate, 2048, 512, 12);
        let signal = generate_sine_wave(sample_rate, 440.0, sample_rate as usize);

        let mean = mean_over_frames(&chroma.compute(&signal), 12);
        println!("A440 chroma: {:?}", mean);
        // C-based ordering: C C# D D# E F F# G G# A A# B
        assert_eq!(argmax(&mean), 9);
    }

    #[test]
    fn test_middle_c_maps_to_pitch_class_c() {
        let sample_rate = 22_050;
        let chroma = ChromaExtractor::new(sample_rate, 2048, 512, 12);
        let signal = generate_sine_wave(sample_rate, 523.25, sample_rate as usize);

        let mean = mean_over_frames(&chroma.compute(&signal), 12);
        assert_eq!(argmax(&mean), 0);
    }

    #[test]
    fn test_frames_are_max_normalized() {
        let sample_rate = 22_050;
        let chroma = ChromaExtractor::new(sample_rate, 2048, 512, 12);
        let signal = generate_sine_wave(sample_rate, 330.0, 8192);

        for frame in chroma.compute(&signal) {
            let peak = frame.iter().copied().fold(0.0f32, f32::max);
            assert!((peak - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_silence_stays_zero() {
        let chroma = ChromaExtractor::new(22_050, 2048, 512, 12);
        let frames = chroma.compute(&vec![0.0; 4096]);
        assert!(frames.iter().flatten().all(|&v| v == 0.0));
    }
}
