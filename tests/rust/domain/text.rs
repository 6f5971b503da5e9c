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

use std::sync::Arc;

use august::{AuError, AuExecutor, AuText, AuTextConfig, AuTextConfigBuilder};

const SENTENCE: &str = "The quick brown fox";

fn sorted_words(text: &str) -> Vec<&str> {
    let mut words: Vec<&str> = text.split_whitespace().collect();
    words.sort_unstable();
    words
}

fn silent() -> AuTextConfigBuilder {
    AuTextConfigBuilder::with_all_probabilities(0.0)
}

#[test]
fn test_word_swap_scenario() {
    let config = Arc::new(
        AuTextConfigBuilder {
            random_word_swap_p: Some(1.0),
            ..silent()
        }
        .build()
        .unwrap(),
    );

    let mut executor = AuExecutor::seeded(8);
    for _ in 0..200 {
        let mut text = AuText::new(SENTENCE, config.clone());
        let trace = executor.augment_traced(&mut text).unwrap();
        assert_eq!(trace.fired(), vec!["random_word_swap"]);
        assert_eq!(sorted_words(text.text()), sorted_words(SENTENCE));
        assert_eq!(text.original_text(), SENTENCE);
    }
}

#[test]
fn test_original_text_survives_every_operation() {
    let config = Arc::new(AuTextConfigBuilder::with_all_probabilities(1.0).build().unwrap());
    let mut executor = AuExecutor::seeded(31);
    for _ in 0..200 {
        let mut text = AuText::new("The quick brown fox jumps over the lazy dog", config.clone());
        let trace = executor.augment_traced(&mut text).unwrap();
        assert_eq!(trace.fired().len(), 9);
        assert_eq!(
            text.original_text(),
            "The quick brown fox jumps over the lazy dog"
        );
        assert!(!text.text().is_empty());
    }
}

#[test]
fn test_zero_probabilities_leave_text_untouched() {
    let config = Arc::new(silent().build().unwrap());
    let mut executor = AuExecutor::seeded(2);
    for _ in 0..1000 {
        let mut text = AuText::new(SENTENCE, config.clone());
        executor.augment(&mut text).unwrap();
        assert_eq!(text.text(), SENTENCE);
    }
}

#[test]
fn test_word_delete_keeps_a_word() {
    let config = Arc::new(
        AuTextConfigBuilder {
            random_word_delete_p: Some(1.0),
            min_word_fraction: Some(1.0),
            max_word_fraction: Some(1.0),
            ..silent()
        }
        .build()
        .unwrap(),
    );
    let mut text = AuText::new(SENTENCE, config);
    AuExecutor::seeded(6).augment(&mut text).unwrap();
    assert_eq!(text.text().split_whitespace().count(), 1);
    assert!(SENTENCE.split_whitespace().any(|w| w == text.text()));
}

#[test]
fn test_word_substitute_writes_placeholders() {
    let config = Arc::new(
        AuTextConfigBuilder {
            random_word_substitute_p: Some(1.0),
            min_word_fraction: Some(0.5),
            max_word_fraction: Some(0.5),
            ..silent()
        }
        .build()
        .unwrap(),
    );
    let mut text = AuText::new(SENTENCE, config);
    AuExecutor::seeded(10).augment(&mut text).unwrap();
    let placeholders = text.text().split_whitespace().filter(|w| *w == "_").count();
    assert_eq!(placeholders, 2);
}

#[test]
fn test_sampled_fractions_stay_in_range() {
    let config = Arc::new(AuTextConfigBuilder::with_all_probabilities(1.0).build().unwrap());
    let mut executor = AuExecutor::seeded(1000);
    for _ in 0..1000 {
        let mut text = AuText::new(SENTENCE, config.clone());
        let trace = executor.augment_traced(&mut text).unwrap();
        for step in trace.steps() {
            let fraction = step
                .invocation
                .param("fraction")
                .and_then(|v| v.as_f64())
                .unwrap();
            let range = match step.operation {
                "ocr" | "keyboard" | "random_character" => config.char_fraction(),
                _ => config.word_fraction(),
            };
            assert!(range.contains(fraction), "{} {}", step.operation, fraction);
        }
    }
}

#[test]
fn test_same_seed_same_text() {
    let config = Arc::new(AuTextConfigBuilder::with_all_probabilities(0.6).build().unwrap());
    let mut first = AuText::new("Happy people run fast because it is good", config.clone());
    let mut second = AuText::new("Happy people run fast because it is good", config);
    AuExecutor::seeded(404).augment(&mut first).unwrap();
    AuExecutor::seeded(404).augment(&mut second).unwrap();
    assert_eq!(first.text(), second.text());
}

#[test]
fn test_text_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("in.txt");
    let target = dir.path().join("out.txt");
    std::fs::write(&source, SENTENCE).unwrap();

    let config = Arc::new(
        AuTextConfigBuilder {
            random_word_swap_p: Some(1.0),
            ..silent()
        }
        .build()
        .unwrap(),
    );
    let mut text = AuText::load(&source, config).unwrap();
    AuExecutor::seeded(1).augment(&mut text).unwrap();
    text.save(&target).unwrap();

    let written = std::fs::read_to_string(&target).unwrap();
    assert_eq!(written, text.text());
    assert_eq!(text.original_text(), SENTENCE);
}

#[test]
fn test_missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AuText::load(dir.path().join("nope.txt"), Arc::new(AuTextConfig::default()))
        .unwrap_err();
    assert!(matches!(err, AuError::Load { .. }));
}
