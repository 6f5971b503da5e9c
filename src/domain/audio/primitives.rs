//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of August.
//! The August project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Audio Transform Primitives
//!
//! Pure buffer-in/buffer-out DSP routines on mono `f32` samples.
//!
//! Every function borrows its input and returns a new [`AuAudioBuffer`]; the
//! input is never modified. Any randomness (noise) comes from a seed sampled
//! by the calling operation, so equal inputs always give equal outputs.

use std::f64::consts::PI;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::AuAudioBuffer;
use crate::errors::{AuError, Result};

const STRETCH_FRAME: usize = 1024;
const STRETCH_HOP: usize = 256;

/// Comb delays of the room simulator, in milliseconds.
const ROOM_COMB_DELAYS_MS: [f64; 4] = [29.7, 37.1, 41.1, 43.7];
const ROOM_WET_MIX: f32 = 0.35;

/// Rolls the samples by `fraction` of the clip length, wrapping around.
/// Positive fractions move the audio later in time.
pub fn time_shift(buffer: &AuAudioBuffer, fraction: f64) -> Result<AuAudioBuffer> {
    let len = buffer.len();
    if len == 0 {
        return Ok(buffer.clone());
    }
    let shift = (fraction * len as f64).round() as i64;
    let shift = shift.rem_euclid(len as i64) as usize;
    let mut samples = buffer.samples().to_vec();
    samples.rotate_right(shift);
    Ok(buffer.with_samples(samples))
}

/// Changes the duration by `1 / rate` while keeping the pitch, using a
/// Hann-windowed overlap-add. Clips shorter than one frame are resampled.
pub fn time_stretch(buffer: &AuAudioBuffer, rate: f64) -> Result<AuAudioBuffer> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(AuError::audio_transform(
            "time_stretch",
            format!("stretch rate must be positive, got {}", rate),
        ));
    }
    let len = buffer.len();
    if len == 0 {
        return Ok(buffer.clone());
    }
    let out_len = ((len as f64) / rate).round().max(1.0) as usize;
    if len < STRETCH_FRAME {
        return Ok(buffer.with_samples(resample_linear(buffer.samples(), out_len)));
    }

    let window = hann_window(STRETCH_FRAME);
    let mut out = vec![0.0f32; out_len + STRETCH_FRAME];
    let mut weight = vec![0.0f32; out_len + STRETCH_FRAME];
    let input = buffer.samples();

    let mut synthesis = 0usize;
    while synthesis < out_len {
        let analysis = ((synthesis as f64) * rate).round() as usize;
        for (i, w) in window.iter().enumerate() {
            let sample = input.get(analysis + i).copied().unwrap_or(0.0);
            out[synthesis + i] += sample * w;
            weight[synthesis + i] += w;
        }
        synthesis += STRETCH_HOP;
    }

    out.truncate(out_len);
    for (sample, w) in out.iter_mut().zip(weight.iter()) {
        if *w > 1e-6 {
            *sample /= w;
        }
    }
    Ok(buffer.with_samples(out))
}

/// Shifts the pitch by `semitones` while keeping the clip length.
pub fn pitch_shift(buffer: &AuAudioBuffer, semitones: i32) -> Result<AuAudioBuffer> {
    if semitones == 0 || buffer.is_empty() {
        return Ok(buffer.clone());
    }
    let ratio = 2f64.powf(semitones as f64 / 12.0);
    let stretched = time_stretch(buffer, 1.0 / ratio)?;
    Ok(buffer.with_samples(resample_linear(stretched.samples(), buffer.len())))
}

pub fn gain(buffer: &AuAudioBuffer, factor: f64) -> Result<AuAudioBuffer> {
    let factor = factor as f32;
    Ok(buffer.with_samples(buffer.samples().iter().map(|s| s * factor).collect()))
}

pub fn invert_polarity(buffer: &AuAudioBuffer) -> Result<AuAudioBuffer> {
    Ok(buffer.with_samples(buffer.samples().iter().map(|s| -s).collect()))
}

/// Adds white Gaussian noise with standard deviation `amplitude`.
pub fn gaussian_noise(buffer: &AuAudioBuffer, amplitude: f64, seed: u64) -> Result<AuAudioBuffer> {
    if !amplitude.is_finite() || amplitude < 0.0 {
        return Err(AuError::audio_transform(
            "gaussian_noise",
            format!("noise amplitude must be non-negative, got {}", amplitude),
        ));
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    let samples = buffer
        .samples()
        .iter()
        .map(|s| {
            // Box-Muller
            let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
            let u2: f64 = rng.gen();
            let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
            s + (z * amplitude) as f32
        })
        .collect();
    Ok(buffer.with_samples(samples))
}

/// Silences a span of `fraction` of the clip. `start` in `[0, 1]` places the
/// span between the beginning and the latest position that still fits.
pub fn time_mask(buffer: &AuAudioBuffer, fraction: f64, start: f64) -> Result<AuAudioBuffer> {
    if !(0.0..=1.0).contains(&fraction) || !(0.0..=1.0).contains(&start) {
        return Err(AuError::audio_transform(
            "time_mask",
            format!("mask fraction {} and start {} must lie in [0, 1]", fraction, start),
        ));
    }
    let len = buffer.len();
    let mask_len = ((fraction * len as f64).round() as usize).min(len);
    let begin = (((len - mask_len) as f64) * start).floor() as usize;
    let mut samples = buffer.samples().to_vec();
    for sample in &mut samples[begin..begin + mask_len] {
        *sample = 0.0;
    }
    Ok(buffer.with_samples(samples))
}

/// One-pole low-pass filter. The cutoff is kept below the Nyquist frequency.
pub fn low_pass(buffer: &AuAudioBuffer, cutoff_hz: f64) -> Result<AuAudioBuffer> {
    let (dt, rc) = filter_constants("low_pass_filter", buffer, cutoff_hz)?;
    let alpha = (dt / (rc + dt)) as f32;
    let mut previous = 0.0f32;
    let samples = buffer
        .samples()
        .iter()
        .map(|x| {
            previous += alpha * (x - previous);
            previous
        })
        .collect();
    Ok(buffer.with_samples(samples))
}

/// One-pole high-pass filter. The cutoff is kept below the Nyquist frequency.
pub fn high_pass(buffer: &AuAudioBuffer, cutoff_hz: f64) -> Result<AuAudioBuffer> {
    let (dt, rc) = filter_constants("high_pass_filter", buffer, cutoff_hz)?;
    let alpha = (rc / (rc + dt)) as f32;
    let input = buffer.samples();
    let mut samples = Vec::with_capacity(input.len());
    let mut previous_in = 0.0f32;
    let mut previous_out = 0.0f32;
    for (i, x) in input.iter().enumerate() {
        let y = if i == 0 {
            *x
        } else {
            alpha * (previous_out + x - previous_in)
        };
        samples.push(y);
        previous_in = *x;
        previous_out = y;
    }
    Ok(buffer.with_samples(samples))
}

/// Small-room reverb made of parallel feedback comb filters.
pub fn room(buffer: &AuAudioBuffer, decay: f64) -> Result<AuAudioBuffer> {
    if !(0.0..1.0).contains(&decay) {
        return Err(AuError::audio_transform(
            "room",
            format!("room decay must lie in [0, 1), got {}", decay),
        ));
    }
    let input = buffer.samples();
    let len = input.len();
    let sample_rate = buffer.sample_rate() as f64;
    let decay = decay as f32;

    let mut wet = vec![0.0f32; len];
    for delay_ms in ROOM_COMB_DELAYS_MS {
        let delay = ((delay_ms / 1000.0) * sample_rate).round().max(1.0) as usize;
        let mut line = vec![0.0f32; len];
        for i in 0..len {
            let feedback = if i >= delay { line[i - delay] } else { 0.0 };
            line[i] = input[i] + decay * feedback;
            wet[i] += line[i];
        }
    }

    let combs = ROOM_COMB_DELAYS_MS.len() as f32;
    let samples = input
        .iter()
        .zip(wet.iter())
        .map(|(dry, wet)| (1.0 - ROOM_WET_MIX) * dry + ROOM_WET_MIX * wet / combs)
        .collect();
    Ok(buffer.with_samples(samples))
}

fn filter_constants(operation: &str, buffer: &AuAudioBuffer, cutoff_hz: f64) -> Result<(f64, f64)> {
    if buffer.sample_rate() == 0 {
        return Err(AuError::audio_transform(operation, "sample rate is zero"));
    }
    if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 {
        return Err(AuError::audio_transform(
            operation,
            format!("cutoff must be positive, got {}", cutoff_hz),
        ));
    }
    let sample_rate = buffer.sample_rate() as f64;
    let cutoff = cutoff_hz.min(sample_rate * 0.49);
    let dt = 1.0 / sample_rate;
    let rc = 1.0 / (2.0 * PI * cutoff);
    Ok((dt, rc))
}

fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| (0.5 - 0.5 * (2.0 * PI * i as f64 / size as f64).cos()) as f32)
        .collect()
}

fn resample_linear(samples: &[f32], target_len: usize) -> Vec<f32> {
    match samples.len() {
        0 => vec![0.0; target_len],
        1 => vec![samples[0]; target_len],
        len => {
            let scale = (len - 1) as f64 / (target_len.max(2) - 1) as f64;
            (0..target_len)
                .map(|i| {
                    let position = i as f64 * scale;
                    let index = (position.floor() as usize).min(len - 1);
                    let next = (index + 1).min(len - 1);
                    let frac = (position - index as f64) as f32;
                    samples[index] + (samples[next] - samples[index]) * frac
                })
                .collect()
        }
    }
}
