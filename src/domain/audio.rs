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

//! # Audio Domain Module
//!
//! Audio adapter: a mono sample buffer, its configuration, and the ten
//! audio augmentations.
//!
//! ## Registered Operations
//!
//! In declaration order: `time_shift`, `time_stretch`, `invert_polarity`,
//! `pitch_scale`, `random_gain`, `gaussian_noise`, `time_mask`,
//! `low_pass_filter`, `high_pass_filter`, `room`.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use august::{AuAudio, AuAudioConfig, AuExecutor};
//!
//! let config = Arc::new(AuAudioConfig::default());
//! let mut audio = AuAudio::load("speech.wav", config)?;
//! AuExecutor::seeded(7).augment(&mut audio)?;
//! audio.save("speech_aug.wav")?;
//! ```

use std::path::Path;
use std::sync::Arc;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::domain::AuMediaType;
use crate::errors::{AuError, Result};
use crate::operation::{AuAugmentable, AuInvocation, AuParamValue};
use crate::registry::{AuRegisteredOperation, AuRegistry, AuStaticRegistry};

pub mod config;
pub mod primitives;

pub use config::{AuAudioConfig, AuAudioConfigBuilder};

/// Mono audio samples in `[-1, 1]` with their sample rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuAudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AuAudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        AuAudioBuffer {
            samples,
            sample_rate,
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

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// New buffer at the same sample rate.
    pub(crate) fn with_samples(&self, samples: Vec<f32>) -> Self {
        AuAudioBuffer {
            samples,
            sample_rate: self.sample_rate,
        }
    }
}

/// Audio media object.
#[derive(Debug, Clone)]
pub struct AuAudio {
    buffer: AuAudioBuffer,
    config: Arc<AuAudioConfig>,
}

impl AuAudio {
    pub fn new(buffer: AuAudioBuffer, config: Arc<AuAudioConfig>) -> Self {
        AuAudio { buffer, config }
    }

    /// Decodes a WAV file. Integer samples are scaled to `[-1, 1]` and
    /// multichannel audio is averaged down to mono.
    pub fn load(path: impl AsRef<Path>, config: Arc<AuAudioConfig>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let reader = WavReader::open(path).map_err(|e| AuError::load(&display, e.to_string()))?;

        let spec = reader.spec();
        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| AuError::load(&display, e.to_string()))?,
            SampleFormat::Int => {
                let scale = (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<std::result::Result<Vec<f32>, _>>()
                    .map_err(|e| AuError::load(&display, e.to_string()))?
            }
        };

        let channels = spec.channels.max(1) as usize;
        let samples = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();

        log::debug!(
            "loaded {} ({} Hz, {} channel(s))",
            display,
            spec.sample_rate,
            spec.channels
        );
        Ok(AuAudio::new(
            AuAudioBuffer::new(samples, spec.sample_rate),
            config,
        ))
    }

    /// Writes the current buffer as a mono 32-bit float WAV file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let spec = WavSpec {
            channels: 1,
            sample_rate: self.buffer.sample_rate(),
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };

        let mut writer =
            WavWriter::create(path, spec).map_err(|e| AuError::save(&display, e.to_string()))?;
        for &sample in self.buffer.samples() {
            writer
                .write_sample(sample)
                .map_err(|e| AuError::save(&display, e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| AuError::save(&display, e.to_string()))
    }

    pub fn buffer(&self) -> &AuAudioBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> AuAudioBuffer {
        self.buffer
    }

    pub fn config(&self) -> &AuAudioConfig {
        &self.config
    }

    fn replace_with<F>(&mut self, transform: F) -> Result<()>
    where
        F: FnOnce(&AuAudioBuffer) -> Result<AuAudioBuffer>,
    {
        self.buffer = transform(&self.buffer)?;
        Ok(())
    }
}

static AUDIO_OPERATIONS: AuStaticRegistry<AuAudio> = AuStaticRegistry::new(register_operations);

/// Registry of the audio operations.
pub fn registry() -> Result<&'static AuRegistry<AuAudio>> {
    AUDIO_OPERATIONS.get()
}

impl AuAugmentable for AuAudio {
    const MEDIA_TYPE: AuMediaType = AuMediaType::Audio;

    fn operations(&self) -> Result<&'static [AuRegisteredOperation<Self>]> {
        registry()?.owned_operations(Self::MEDIA_TYPE)
    }
}

fn register_operations() -> Result<AuRegistry<AuAudio>> {
    let tag = AuMediaType::Audio;
    let mut registry = AuRegistry::new(tag);
    registry.register(tag, "time_shift", time_shift)?;
    registry.register(tag, "time_stretch", time_stretch)?;
    registry.register(tag, "invert_polarity", invert_polarity)?;
    registry.register(tag, "pitch_scale", pitch_scale)?;
    registry.register(tag, "random_gain", random_gain)?;
    registry.register(tag, "gaussian_noise", gaussian_noise)?;
    registry.register(tag, "time_mask", time_mask)?;
    registry.register(tag, "low_pass_filter", low_pass_filter)?;
    registry.register(tag, "high_pass_filter", high_pass_filter)?;
    registry.register(tag, "room", room)?;
    Ok(registry)
}

fn time_shift(audio: &mut AuAudio, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(audio.config.time_shift(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let fraction = audio.config.shift().sample(rng);
    invocation.record("fraction", AuParamValue::Float(fraction));
    audio.replace_with(|buffer| primitives::time_shift(buffer, fraction))?;
    Ok(invocation)
}

fn time_stretch(audio: &mut AuAudio, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(audio.config.time_stretch(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let factor = audio.config.stretch_factor().sample(rng);
    invocation.record("factor", AuParamValue::Float(factor));
    audio.replace_with(|buffer| primitives::time_stretch(buffer, factor))?;
    Ok(invocation)
}

fn invert_polarity(audio: &mut AuAudio, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let invocation = AuInvocation::gate(audio.config.invert_polarity(), rng);
    if invocation.fired() {
        audio.replace_with(primitives::invert_polarity)?;
    }
    Ok(invocation)
}

fn pitch_scale(audio: &mut AuAudio, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(audio.config.pitch_scale(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let semitones = audio.config.semitones().sample(rng);
    invocation.record("semitones", AuParamValue::Int(semitones as i64));
    audio.replace_with(|buffer| primitives::pitch_shift(buffer, semitones))?;
    Ok(invocation)
}

fn random_gain(audio: &mut AuAudio, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(audio.config.random_gain(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let factor = audio.config.gain_factor().sample(rng);
    invocation.record("factor", AuParamValue::Float(factor));
    audio.replace_with(|buffer| primitives::gain(buffer, factor))?;
    Ok(invocation)
}

fn gaussian_noise(audio: &mut AuAudio, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(audio.config.gaussian_noise(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let amplitude = audio.config.noise_amplitude().sample(rng);
    invocation.record("amplitude", AuParamValue::Float(amplitude));
    let seed = invocation.seed("seed", rng);
    audio.replace_with(|buffer| primitives::gaussian_noise(buffer, amplitude, seed))?;
    Ok(invocation)
}

fn time_mask(audio: &mut AuAudio, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(audio.config.time_mask(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let fraction = audio.config.mask_part().sample(rng);
    let start = rng.gen::<f64>();
    invocation.record("fraction", AuParamValue::Float(fraction));
    invocation.record("start", AuParamValue::Float(start));
    audio.replace_with(|buffer| primitives::time_mask(buffer, fraction, start))?;
    Ok(invocation)
}

fn low_pass_filter(audio: &mut AuAudio, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(audio.config.low_pass_filter(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let cutoff = audio.config.low_pass_freq().sample(rng);
    invocation.record("cutoff_hz", AuParamValue::Float(cutoff));
    audio.replace_with(|buffer| primitives::low_pass(buffer, cutoff))?;
    Ok(invocation)
}

fn high_pass_filter(audio: &mut AuAudio, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(audio.config.high_pass_filter(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let cutoff = audio.config.high_pass_freq().sample(rng);
    invocation.record("cutoff_hz", AuParamValue::Float(cutoff));
    audio.replace_with(|buffer| primitives::high_pass(buffer, cutoff))?;
    Ok(invocation)
}

fn room(audio: &mut AuAudio, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(audio.config.room(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let decay = audio.config.room_decay().sample(rng);
    invocation.record("decay", AuParamValue::Float(decay));
    audio.replace_with(|buffer| primitives::room(buffer, decay))?;
    Ok(invocation)
}
