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

use std::f32::consts::PI;
use std::sync::Arc;

use august::{
    AuAudio, AuAudioBuffer, AuAudioConfig, AuAudioConfigBuilder, AuError, AuExecutor,
};
use hound::{SampleFormat, WavSpec, WavWriter};

const SAMPLE_RATE: u32 = 8_000;

fn tone(len: usize) -> AuAudioBuffer {
    let samples = (0..len)
        .map(|i| 0.5 * (2.0 * PI * 440.0 * i as f32 / SAMPLE_RATE as f32).sin())
        .collect();
    AuAudioBuffer::new(samples, SAMPLE_RATE)
}

fn only(builder: AuAudioConfigBuilder) -> Arc<AuAudioConfig> {
    let base = AuAudioConfigBuilder::with_all_probabilities(0.0);
    let merged = AuAudioConfigBuilder {
        time_shift_p: builder.time_shift_p.or(base.time_shift_p),
        time_stretch_p: builder.time_stretch_p.or(base.time_stretch_p),
        invert_polarity_p: builder.invert_polarity_p.or(base.invert_polarity_p),
        pitch_scale_p: builder.pitch_scale_p.or(base.pitch_scale_p),
        random_gain_p: builder.random_gain_p.or(base.random_gain_p),
        gaussian_noise_p: builder.gaussian_noise_p.or(base.gaussian_noise_p),
        time_mask_p: builder.time_mask_p.or(base.time_mask_p),
        low_pass_filter_p: builder.low_pass_filter_p.or(base.low_pass_filter_p),
        high_pass_filter_p: builder.high_pass_filter_p.or(base.high_pass_filter_p),
        room_p: builder.room_p.or(base.room_p),
        ..builder
    };
    Arc::new(merged.build().unwrap())
}

#[test]
fn test_zero_probabilities_leave_audio_untouched() {
    let config = Arc::new(AuAudioConfigBuilder::with_all_probabilities(0.0).build().unwrap());
    let mut executor = AuExecutor::seeded(1);
    for _ in 0..100 {
        let mut audio = AuAudio::new(tone(512), config.clone());
        executor.augment(&mut audio).unwrap();
        assert_eq!(audio.buffer(), &tone(512));
    }
}

#[test]
fn test_invert_polarity_only() {
    let config = only(AuAudioConfigBuilder {
        invert_polarity_p: Some(1.0),
        ..Default::default()
    });
    let mut audio = AuAudio::new(tone(256), config);
    let trace = AuExecutor::seeded(4).augment_traced(&mut audio).unwrap();

    assert_eq!(trace.fired(), vec!["invert_polarity"]);
    let expected: Vec<f32> = tone(256).samples().iter().map(|s| -s).collect();
    assert_eq!(audio.buffer().samples(), expected.as_slice());
}

#[test]
fn test_gain_only_scales_within_range() {
    let config = only(AuAudioConfigBuilder {
        random_gain_p: Some(1.0),
        min_gain_factor: Some(2.0),
        max_gain_factor: Some(2.0),
        ..Default::default()
    });
    let mut audio = AuAudio::new(tone(64), config);
    AuExecutor::seeded(8).augment(&mut audio).unwrap();
    for (out, inp) in audio.buffer().samples().iter().zip(tone(64).samples()) {
        assert!((out - 2.0 * inp).abs() < 1e-6);
    }
}

#[test]
fn test_full_pass_keeps_sample_rate() {
    let config = Arc::new(AuAudioConfigBuilder::with_all_probabilities(1.0).build().unwrap());
    let mut audio = AuAudio::new(tone(4096), config);
    let trace = AuExecutor::seeded(21).augment_traced(&mut audio).unwrap();

    assert_eq!(trace.fired().len(), 10);
    assert_eq!(audio.buffer().sample_rate(), SAMPLE_RATE);
    assert!(!audio.buffer().is_empty());
    assert!(audio.buffer().samples().iter().all(|s| s.is_finite()));
}

#[test]
fn test_sampled_parameters_stay_in_range() {
    let config = Arc::new(AuAudioConfigBuilder::with_all_probabilities(1.0).build().unwrap());
    let mut executor = AuExecutor::seeded(1000);
    let float = |trace: &august::AuAugmentTrace, op: &str, param: &str| {
        trace
            .invocation(op)
            .and_then(|inv| inv.param(param))
            .and_then(|v| v.as_f64())
            .unwrap()
    };

    for _ in 0..1000 {
        let mut audio = AuAudio::new(tone(300), config.clone());
        let trace = executor.augment_traced(&mut audio).unwrap();

        assert!(config.shift().contains(float(&trace, "time_shift", "fraction")));
        assert!(config
            .stretch_factor()
            .contains(float(&trace, "time_stretch", "factor")));
        assert!(config
            .semitones()
            .contains(float(&trace, "pitch_scale", "semitones") as i32));
        assert!(config
            .gain_factor()
            .contains(float(&trace, "random_gain", "factor")));
        assert!(config
            .noise_amplitude()
            .contains(float(&trace, "gaussian_noise", "amplitude")));
        assert!(config
            .mask_part()
            .contains(float(&trace, "time_mask", "fraction")));
        assert!(config
            .low_pass_freq()
            .contains(float(&trace, "low_pass_filter", "cutoff_hz")));
        assert!(config
            .high_pass_freq()
            .contains(float(&trace, "high_pass_filter", "cutoff_hz")));
        assert!(config.room_decay().contains(float(&trace, "room", "decay")));
    }
}

#[test]
fn test_same_seed_same_audio() {
    let config = Arc::new(AuAudioConfig::default());
    let mut first = AuAudio::new(tone(2048), config.clone());
    let mut second = AuAudio::new(tone(2048), config);
    AuExecutor::seeded(55).augment(&mut first).unwrap();
    AuExecutor::seeded(55).augment(&mut second).unwrap();
    assert_eq!(first.buffer(), second.buffer());
}

#[test]
fn test_wav_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tone.wav");
    let config = Arc::new(AuAudioConfig::default());

    let audio = AuAudio::new(tone(1000), config.clone());
    audio.save(&path).unwrap();
    let loaded = AuAudio::load(&path, config).unwrap();

    assert_eq!(loaded.buffer(), audio.buffer());
}

#[test]
fn test_stereo_integer_wav_is_mixed_down() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stereo.wav");
    let spec = WavSpec {
        channels: 2,
        sample_rate: 22_050,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&path, spec).unwrap();
    for _ in 0..100 {
        writer.write_sample(16_384i16).unwrap();
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();

    let audio = AuAudio::load(&path, Arc::new(AuAudioConfig::default())).unwrap();
    assert_eq!(audio.buffer().sample_rate(), 22_050);
    assert_eq!(audio.buffer().len(), 100);
    assert!(audio
        .buffer()
        .samples()
        .iter()
        .all(|s| (s - 0.25).abs() < 1e-6));
}

#[test]
fn test_missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.wav");
    let err = AuAudio::load(&path, Arc::new(AuAudioConfig::default())).unwrap_err();
    assert!(matches!(err, AuError::Load { .. }));
}
