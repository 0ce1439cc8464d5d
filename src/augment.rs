// Augment module - synthetic training variants from one recording
//
// Two perturbations produce extra rows per recording without new audio:
// - Noise injection: additive standard-normal noise scaled by a noise factor
// - Time shift: rotate-and-mask by a random number of samples
//
// Both return a new SampleSequence with the input's length and rate. The
// random source is passed in explicitly, so a seeded StdRng reproduces the
// same variants bit for bit.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::audio::SampleSequence;

/// Direction content moves during a time shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDirection {
    /// Content moves toward later samples; the head is zero-filled
    Right,
    /// Content moves toward earlier samples; the tail is zero-filled
    Left,
    /// Right or Left, chosen at random on every call
    Both,
}

/// Draw one standard normal value (Box-Muller transform)
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    // gen::<f64>() is in [0, 1); flip to (0, 1] so ln() stays finite
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    ((-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()) as f32
}

/// Add scaled standard-normal noise to every sample
///
/// # Arguments
/// * `signal` - Input sequence
/// * `noise_factor` - Scale of the noise (0.0 returns an identical copy)
/// * `rng` - Random source
pub fn inject_noise<R: Rng + ?Sized>(
    signal: &SampleSequence,
    noise_factor: f32,
    rng: &mut R,
) -> SampleSequence {
    let samples = signal
        .samples()
        .iter()
        .map(|&sample| sample + noise_factor * standard_normal(rng))
        .collect();
    signal.derive(samples)
}

/// Rotate the signal by `shift` samples and zero the wrapped-around region
///
/// Unlike a circular rotate, no sample appears twice: the region vacated by
/// the move is zero-filled. `shift == 0` returns the input unchanged and a
/// shift of at least the signal length yields silence.
///
/// `direction` must be `Right` or `Left`; `Both` is resolved by
/// [`time_shift`] before calling this.
pub fn rotate_and_mask(samples: &[f32], shift: usize, direction: ShiftDirection) -> Vec<f32> {
    let len = samples.len();
    if shift == 0 {
        return samples.to_vec();
    }
    if shift >= len {
        return vec![0.0; len];
    }

    let mut out = vec![0.0; len];
    match direction {
        ShiftDirection::Right | ShiftDirection::Both => {
            out[shift..].copy_from_slice(&samples[..len - shift]);
        }
        ShiftDirection::Left => {
            out[..len - shift].copy_from_slice(&samples[shift..]);
        }
    }
    out
}

/// Shift the signal by a random amount in `[0, sample_rate * shift_fraction)`
///
/// # Arguments
/// * `signal` - Input sequence
/// * `shift_fraction` - Maximum shift as a fraction of one second
/// * `direction` - Shift direction (`Both` picks one at random)
/// * `rng` - Random source
pub fn time_shift<R: Rng + ?Sized>(
    signal: &SampleSequence,
    shift_fraction: f32,
    direction: ShiftDirection,
    rng: &mut R,
) -> SampleSequence {
    let max_shift = (signal.sample_rate() as f64 * shift_fraction.max(0.0) as f64) as usize;
    let shift = if max_shift == 0 {
        0
    } else {
        rng.gen_range(0..max_shift)
    };

    let direction = match direction {
        ShiftDirection::Both => {
            if rng.gen_bool(0.5) {
                ShiftDirection::Right
            } else {
                ShiftDirection::Left
            }
        }
        fixed => fixed,
    };

    signal.derive(rotate_and_mask(signal.samples(), shift, direction))
}

/// Stateful augmenter owning the random source used by the dataset builder
pub struct Augmenter {
    rng: StdRng,
}

impl Augmenter {
    /// Create an augmenter
    ///
    /// # Arguments
    /// * `seed` - Fixed seed for reproducible output, or `None` for an entropy seed
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn add_noise(&mut self, signal: &SampleSequence, noise_factor: f32) -> SampleSequence {
        inject_noise(signal, noise_factor, &mut self.rng)
    }

    pub fn shift(
        &mut self,
        signal: &SampleSequence,
        shift_fraction: f32,
        direction: ShiftDirection,
    ) -> SampleSequence {
        time_shift(signal, shift_fraction, direction, &mut self.rng)
    }
}
