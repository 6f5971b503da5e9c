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

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{AuProbability, AuRange};
use crate::errors::{AuError, Result};

/// Validated knobs of every audio operation.
///
/// Built through [`AuAudioConfigBuilder`], `Default`, or any serde format;
/// deserialization goes through the builder and is therefore validated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AuAudioConfigBuilder")]
pub struct AuAudioConfig {
    time_shift_p: f64,
    min_shift: f64,
    max_shift: f64,

    time_stretch_p: f64,
    min_stretch_factor: f64,
    max_stretch_factor: f64,

    invert_polarity_p: f64,

    pitch_scale_p: f64,
    min_semitones: i32,
    max_semitones: i32,

    random_gain_p: f64,
    min_gain_factor: f64,
    max_gain_factor: f64,

    gaussian_noise_p: f64,
    min_noise_amplitude: f64,
    max_noise_amplitude: f64,

    time_mask_p: f64,
    min_mask_part: f64,
    max_mask_part: f64,

    low_pass_filter_p: f64,
    min_low_pass_freq: f64,
    max_low_pass_freq: f64,

    high_pass_filter_p: f64,
    min_high_pass_freq: f64,
    max_high_pass_freq: f64,

    room_p: f64,
    min_room_decay: f64,
    max_room_decay: f64,
}

impl Default for AuAudioConfig {
    fn default() -> Self {
        AuAudioConfig {
            time_shift_p: 0.5,
            min_shift: -0.5,
            max_shift: 0.5,
            time_stretch_p: 0.5,
            min_stretch_factor: 0.5,
            max_stretch_factor: 1.5,
            invert_polarity_p: 0.5,
            pitch_scale_p: 0.5,
            min_semitones: -6,
            max_semitones: 6,
            random_gain_p: 0.5,
            min_gain_factor: 0.5,
            max_gain_factor: 1.5,
            gaussian_noise_p: 0.5,
            min_noise_amplitude: 0.001,
            max_noise_amplitude: 0.015,
            time_mask_p: 0.5,
            min_mask_part: 0.01,
            max_mask_part: 0.5,
            low_pass_filter_p: 0.5,
            min_low_pass_freq: 150.0,
            max_low_pass_freq: 7500.0,
            high_pass_filter_p: 0.5,
            min_high_pass_freq: 20.0,
            max_high_pass_freq: 2400.0,
            room_p: 0.5,
            min_room_decay: 0.2,
            max_room_decay: 0.6,
        }
    }
}

impl AuAudioConfig {
    pub fn builder() -> AuAudioConfigBuilder {
        AuAudioConfigBuilder::default()
    }

    /// Parses and validates a JSON object of knob overrides.
    pub fn from_json(value: &Value) -> Result<Self> {
        let builder: AuAudioConfigBuilder = serde_json::from_value(value.clone())
            .map_err(|err| AuError::configuration("audio", err.to_string()))?;
        builder.build()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let builder: AuAudioConfigBuilder = serde_json::from_str(json)
            .map_err(|err| AuError::configuration("audio", err.to_string()))?;
        builder.build()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let builder: AuAudioConfigBuilder = serde_yaml::from_str(yaml)
            .map_err(|err| AuError::configuration("audio", err.to_string()))?;
        builder.build()
    }

    fn validate(&self) -> Result<()> {
        AuProbability::new("time_shift_p", self.time_shift_p)?;
        AuRange::bounded("shift", self.min_shift, self.max_shift, -1.0, 1.0)?;

        AuProbability::new("time_stretch_p", self.time_stretch_p)?;
        AuRange::bounded(
            "stretch_factor",
            self.min_stretch_factor,
            self.max_stretch_factor,
            0.01,
            10.0,
        )?;

        AuProbability::new("invert_polarity_p", self.invert_polarity_p)?;

        AuProbability::new("pitch_scale_p", self.pitch_scale_p)?;
        AuRange::bounded("semitones", self.min_semitones, self.max_semitones, -24, 24)?;

        AuProbability::new("random_gain_p", self.random_gain_p)?;
        AuRange::bounded(
            "gain_factor",
            self.min_gain_factor,
            self.max_gain_factor,
            0.0,
            16.0,
        )?;

        AuProbability::new("gaussian_noise_p", self.gaussian_noise_p)?;
        AuRange::bounded(
            "noise_amplitude",
            self.min_noise_amplitude,
            self.max_noise_amplitude,
            0.0,
            1.0,
        )?;

        AuProbability::new("time_mask_p", self.time_mask_p)?;
        AuRange::bounded("mask_part", self.min_mask_part, self.max_mask_part, 0.0, 1.0)?;

        AuProbability::new("low_pass_filter_p", self.low_pass_filter_p)?;
        AuRange::bounded(
            "low_pass_freq",
            self.min_low_pass_freq,
            self.max_low_pass_freq,
            1.0,
            96_000.0,
        )?;

        AuProbability::new("high_pass_filter_p", self.high_pass_filter_p)?;
        AuRange::bounded(
            "high_pass_freq",
            self.min_high_pass_freq,
            self.max_high_pass_freq,
            1.0,
            96_000.0,
        )?;

        AuProbability::new("room_p", self.room_p)?;
        AuRange::bounded("room_decay", self.min_room_decay, self.max_room_decay, 0.0, 0.95)?;

        Ok(())
    }

    pub fn time_shift(&self) -> AuProbability {
        AuProbability::trusted(self.time_shift_p)
    }

    /// Shift as a signed fraction of the clip length.
    pub fn shift(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_shift, self.max_shift)
    }

    pub fn time_stretch(&self) -> AuProbability {
        AuProbability::trusted(self.time_stretch_p)
    }

    pub fn stretch_factor(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_stretch_factor, self.max_stretch_factor)
    }

    pub fn invert_polarity(&self) -> AuProbability {
        AuProbability::trusted(self.invert_polarity_p)
    }

    pub fn pitch_scale(&self) -> AuProbability {
        AuProbability::trusted(self.pitch_scale_p)
    }

    pub fn semitones(&self) -> AuRange<i32> {
        AuRange::trusted(self.min_semitones, self.max_semitones)
    }

    pub fn random_gain(&self) -> AuProbability {
        AuProbability::trusted(self.random_gain_p)
    }

    pub fn gain_factor(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_gain_factor, self.max_gain_factor)
    }

    pub fn gaussian_noise(&self) -> AuProbability {
        AuProbability::trusted(self.gaussian_noise_p)
    }

    pub fn noise_amplitude(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_noise_amplitude, self.max_noise_amplitude)
    }

    pub fn time_mask(&self) -> AuProbability {
        AuProbability::trusted(self.time_mask_p)
    }

    /// Masked span as a fraction of the clip length.
    pub fn mask_part(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_mask_part, self.max_mask_part)
    }

    pub fn low_pass_filter(&self) -> AuProbability {
        AuProbability::trusted(self.low_pass_filter_p)
    }

    pub fn low_pass_freq(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_low_pass_freq, self.max_low_pass_freq)
    }

    pub fn high_pass_filter(&self) -> AuProbability {
        AuProbability::trusted(self.high_pass_filter_p)
    }

    pub fn high_pass_freq(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_high_pass_freq, self.max_high_pass_freq)
    }

    pub fn room(&self) -> AuProbability {
        AuProbability::trusted(self.room_p)
    }

    pub fn room_decay(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_room_decay, self.max_room_decay)
    }
}

/// Partial audio configuration. Unset fields take the documented defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuAudioConfigBuilder {
    pub time_shift_p: Option<f64>,
    pub min_shift: Option<f64>,
    pub max_shift: Option<f64>,
    pub time_stretch_p: Option<f64>,
    pub min_stretch_factor: Option<f64>,
    pub max_stretch_factor: Option<f64>,
    pub invert_polarity_p: Option<f64>,
    pub pitch_scale_p: Option<f64>,
    pub min_semitones: Option<i32>,
    pub max_semitones: Option<i32>,
    pub random_gain_p: Option<f64>,
    pub min_gain_factor: Option<f64>,
    pub max_gain_factor: Option<f64>,
    pub gaussian_noise_p: Option<f64>,
    pub min_noise_amplitude: Option<f64>,
    pub max_noise_amplitude: Option<f64>,
    pub time_mask_p: Option<f64>,
    pub min_mask_part: Option<f64>,
    pub max_mask_part: Option<f64>,
    pub low_pass_filter_p: Option<f64>,
    pub min_low_pass_freq: Option<f64>,
    pub max_low_pass_freq: Option<f64>,
    pub high_pass_filter_p: Option<f64>,
    pub min_high_pass_freq: Option<f64>,
    pub max_high_pass_freq: Option<f64>,
    pub room_p: Option<f64>,
    pub min_room_decay: Option<f64>,
    pub max_room_decay: Option<f64>,
}

impl AuAudioConfigBuilder {
    /// Builder with every trigger probability set to `p`.
    pub fn with_all_probabilities(p: f64) -> Self {
        AuAudioConfigBuilder {
            time_shift_p: Some(p),
            time_stretch_p: Some(p),
            invert_polarity_p: Some(p),
            pitch_scale_p: Some(p),
            random_gain_p: Some(p),
            gaussian_noise_p: Some(p),
            time_mask_p: Some(p),
            low_pass_filter_p: Some(p),
            high_pass_filter_p: Some(p),
            room_p: Some(p),
            ..Default::default()
        }
    }

    pub fn build(self) -> Result<AuAudioConfig> {
        let base = AuAudioConfig::default();
        let config = AuAudioConfig {
            time_shift_p: self.time_shift_p.unwrap_or(base.time_shift_p),
            min_shift: self.min_shift.unwrap_or(base.min_shift),
            max_shift: self.max_shift.unwrap_or(base.max_shift),
            time_stretch_p: self.time_stretch_p.unwrap_or(base.time_stretch_p),
            min_stretch_factor: self.min_stretch_factor.unwrap_or(base.min_stretch_factor),
            max_stretch_factor: self.max_stretch_factor.unwrap_or(base.max_stretch_factor),
            invert_polarity_p: self.invert_polarity_p.unwrap_or(base.invert_polarity_p),
            pitch_scale_p: self.pitch_scale_p.unwrap_or(base.pitch_scale_p),
            min_semitones: self.min_semitones.unwrap_or(base.min_semitones),
            max_semitones: self.max_semitones.unwrap_or(base.max_semitones),
            random_gain_p: self.random_gain_p.unwrap_or(base.random_gain_p),
            min_gain_factor: self.min_gain_factor.unwrap_or(base.min_gain_factor),
            max_gain_factor: self.max_gain_factor.unwrap_or(base.max_gain_factor),
            gaussian_noise_p: self.gaussian_noise_p.unwrap_or(base.gaussian_noise_p),
            min_noise_amplitude: self.min_noise_amplitude.unwrap_or(base.min_noise_amplitude),
            max_noise_amplitude: self.max_noise_amplitude.unwrap_or(base.max_noise_amplitude),
            time_mask_p: self.time_mask_p.unwrap_or(base.time_mask_p),
            min_mask_part: self.min_mask_part.unwrap_or(base.min_mask_part),
            max_mask_part: self.max_mask_part.unwrap_or(base.max_mask_part),
            low_pass_filter_p: self.low_pass_filter_p.unwrap_or(base.low_pass_filter_p),
            min_low_pass_freq: self.min_low_pass_freq.unwrap_or(base.min_low_pass_freq),
            max_low_pass_freq: self.max_low_pass_freq.unwrap_or(base.max_low_pass_freq),
            high_pass_filter_p: self.high_pass_filter_p.unwrap_or(base.high_pass_filter_p),
            min_high_pass_freq: self.min_high_pass_freq.unwrap_or(base.min_high_pass_freq),
            max_high_pass_freq: self.max_high_pass_freq.unwrap_or(base.max_high_pass_freq),
            room_p: self.room_p.unwrap_or(base.room_p),
            min_room_decay: self.min_room_decay.unwrap_or(base.min_room_decay),
            max_room_decay: self.max_room_decay.unwrap_or(base.max_room_decay),
        };
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<AuAudioConfigBuilder> for AuAudioConfig {
    type Error = AuError;

    fn try_from(builder: AuAudioConfigBuilder) -> Result<Self> {
        builder.build()
    }
}
