// Signal loader - WAV decoding, downmix and resampling
//
// Reads a WAV file into a mono SampleSequence at the analysis sample rate.
// Integer PCM is scaled into [-1.0, 1.0), multi-channel audio is averaged
// into one channel, and the result is linearly interpolated to the target
// rate so that every file in a dataset is analyzed at the same rate.

use std::path::Path;

use crate::audio::signal::SampleSequence;
use crate::error::{log_audio_error, AudioError};

/// Default analysis sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: u32 = 22_050;

/// Load an audio file as a mono sample sequence at `target_rate`
///
/// # Arguments
/// * `path` - WAV file to read
/// * `target_rate` - Output sample rate in Hz
///
/// # Returns
/// * `Ok(SampleSequence)` - Mono signal resampled to `target_rate`
/// * `Err(AudioError)` - File missing/unreadable, unsupported encoding, or no samples
pub fn load_signal<P: AsRef<Path>>(path: P, target_rate: u32) -> Result<SampleSequence, AudioError> {
    let path = path.as_ref();
    if target_rate == 0 {
        return Err(AudioError::InvalidSignal {
            reason: "target sample rate must be > 0".to_string(),
        });
    }

    let (mono, source_rate) = read_wav(path).map_err(|err| {
        log_audio_error(&err, "load_signal");
        err
    })?;
    let samples = if source_rate == target_rate {
        mono
    } else {
        log::debug!(
            "[SignalLoader] Resampling {}: {} Hz -> {} Hz",
            path.display(),
            source_rate,
            target_rate
        );
        resample_linear(&mono, source_rate, target_rate)
    };

    SampleSequence::new(samples, target_rate).map_err(|err| match err {
        AudioError::InvalidSignal { reason } => AudioError::InvalidSignal {
            reason: format!("{}: {}", path.display(), reason),
        },
        other => other,
    })
}

/// Resample by linear interpolation between neighbouring input samples
///
/// Output length is `ceil(len * target / source)`.
pub fn resample_linear(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if samples.is_empty() || source_rate == target_rate {
        return samples.to_vec();
    }

    let ratio = source_rate as f64 / target_rate as f64;
    let out_len = (samples.len() as f64 * target_rate as f64 / source_rate as f64).ceil() as usize;
    let last = samples.len() - 1;

    (0..out_len)
        .map(|j| {
            let cursor = j as f64 * ratio;
            let idx = (cursor.floor() as usize).min(last);
            let next_idx = (idx + 1).min(last);
            let frac = (cursor - idx as f64) as f32;
            if next_idx == idx {
                samples[idx]
            } else {
                (1.0 - frac) * samples[idx] + frac * samples[next_idx]
            }
        })
        .collect()
}

fn read_wav(path: &Path) -> Result<(Vec<f32>, u32), AudioError> {
    let mut reader = hound::WavReader::open(path).map_err(|err| AudioError::LoadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(AudioError::UnsupportedFormat {
            path: path.display().to_string(),
            details: "zero channels".to_string(),
        });
    }

    let read_err = |err: hound::Error| AudioError::LoadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    };

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|sample| sample.map_err(read_err))
            .collect::<Result<Vec<f32>, _>>()?,
        hound::SampleFormat::Int => match spec.bits_per_sample {
            8 => reader
                .samples::<i8>()
                .map(|sample| sample.map(|v| v as f32 / 128.0).map_err(read_err))
                .collect::<Result<Vec<f32>, _>>()?,
            16 => reader
                .samples::<i16>()
                .map(|sample| sample.map(|v| v as f32 / 32_768.0).map_err(read_err))
                .collect::<Result<Vec<f32>, _>>()?,
            bits @ (24 | 32) => {
                let scale = (1u64 << (bits - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|sample| sample.map(|v| v as f32 / scale).map_err(read_err))
                    .collect::<Result<Vec<f32>, _>>()?
            }
            bits => {
                return Err(AudioError::UnsupportedFormat {
                    path: path.display().to_string(),
                    details: format!("unsupported bits_per_sample={}", bits),
                })
            }
        },
    };

    if spec.channels == 1 {
        return Ok((samples, spec.sample_rate));
    }

    let channels = spec.channels as usize;
    let mono = samples
        .chunks(channels)
        .map(|chunk| chunk.iter().copied().sum::<f32>() / channels as f32)
        .collect();

    Ok((mono, spec.sample_rate))
}
