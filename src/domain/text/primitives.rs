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

//! # Text Transform Primitives
//!
//! Pure string-in/string-out noise functions.
//!
//! Every primitive takes an intensity `fraction` in `[0, 1]` and a `seed`.
//! Word-level primitives split on whitespace and join the result with single
//! spaces; character-level primitives keep the original spacing. At least one
//! unit is touched whenever the text has an eligible word or character.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::lexicon::{self, WordTable};
use crate::errors::{AuError, Result};

/// Placeholder written by [`random_word_substitute`].
pub const SUBSTITUTE_TOKEN: &str = "_";

const RANDOM_CHARACTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn synonym_replace(text: &str, fraction: f64, seed: u64) -> Result<String> {
    check_fraction("synonym_replace", fraction)?;
    Ok(replace_from_table(text, fraction, seed, lexicon::SYNONYMS))
}

pub fn antonym_replace(text: &str, fraction: f64, seed: u64) -> Result<String> {
    check_fraction("antonym_replace", fraction)?;
    Ok(replace_from_table(text, fraction, seed, lexicon::ANTONYMS))
}

/// Replaces known words with common misspellings.
pub fn spelling(text: &str, fraction: f64, seed: u64) -> Result<String> {
    check_fraction("spelling", fraction)?;
    Ok(replace_from_table(text, fraction, seed, lexicon::MISSPELLINGS))
}

/// Swaps characters for look-alikes an OCR engine would confuse them with.
pub fn ocr(text: &str, fraction: f64, seed: u64) -> Result<String> {
    check_fraction("ocr", fraction)?;
    Ok(replace_chars(text, fraction, seed, |c, rng| {
        let confusions = lexicon::lookup_char(lexicon::OCR_CONFUSIONS, c)?;
        confusions.choose(rng).copied()
    }))
}

/// Replaces letters with a neighbouring key, keeping the letter case.
pub fn keyboard(text: &str, fraction: f64, seed: u64) -> Result<String> {
    check_fraction("keyboard", fraction)?;
    Ok(replace_chars(text, fraction, seed, |c, rng| {
        let lower = c.to_ascii_lowercase();
        let neighbours = lexicon::lookup_char(lexicon::KEYBOARD_NEIGHBOURS, lower)?;
        let replacement = *neighbours.choose(rng)?;
        Some(if c.is_ascii_uppercase() {
            replacement.to_ascii_uppercase()
        } else {
            replacement
        })
    }))
}

/// Substitutes alphanumeric characters with random ASCII alphanumerics.
pub fn random_character(text: &str, fraction: f64, seed: u64) -> Result<String> {
    check_fraction("random_character", fraction)?;
    Ok(replace_chars(text, fraction, seed, |c, rng| {
        if !c.is_alphanumeric() {
            return None;
        }
        RANDOM_CHARACTERS.choose(rng).map(|b| *b as char)
    }))
}

/// Deletes words, always keeping at least one.
pub fn random_word_delete(text: &str, fraction: f64, seed: u64) -> Result<String> {
    check_fraction("random_word_delete", fraction)?;
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= 1 {
        return Ok(words.join(" "));
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    let count = unit_count(words.len(), fraction).min(words.len() - 1);
    let mut indices: Vec<usize> = (0..words.len()).collect();
    indices.shuffle(&mut rng);
    let mut doomed = vec![false; words.len()];
    for &index in &indices[..count] {
        doomed[index] = true;
    }
    let kept: Vec<&str> = words
        .iter()
        .zip(doomed)
        .filter(|(_, doomed)| !doomed)
        .map(|(word, _)| *word)
        .collect();
    Ok(kept.join(" "))
}

/// Replaces words with [`SUBSTITUTE_TOKEN`].
pub fn random_word_substitute(text: &str, fraction: f64, seed: u64) -> Result<String> {
    check_fraction("random_word_substitute", fraction)?;
    let mut words: Vec<&str> = text.split_whitespace().collect();
    let mut rng = SmallRng::seed_from_u64(seed);
    let count = unit_count(words.len(), fraction);
    let mut indices: Vec<usize> = (0..words.len()).collect();
    indices.shuffle(&mut rng);
    for &index in &indices[..count] {
        words[index] = SUBSTITUTE_TOKEN;
    }
    Ok(words.join(" "))
}

/// Swaps random adjacent word pairs. The output is always a permutation of
/// the input words.
pub fn random_word_swap(text: &str, fraction: f64, seed: u64) -> Result<String> {
    check_fraction("random_word_swap", fraction)?;
    let mut words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 2 {
        return Ok(words.join(" "));
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..unit_count(words.len(), fraction) {
        let index = rng.gen_range(0..words.len() - 1);
        words.swap(index, index + 1);
    }
    Ok(words.join(" "))
}

fn check_fraction(operation: &str, fraction: f64) -> Result<()> {
    if fraction.is_finite() && (0.0..=1.0).contains(&fraction) {
        Ok(())
    } else {
        Err(AuError::text_transform(
            operation,
            format!("fraction {} must lie in [0, 1]", fraction),
        ))
    }
}

/// Number of units to touch out of `available`, at least one when any exist.
fn unit_count(available: usize, fraction: f64) -> usize {
    if available == 0 {
        return 0;
    }
    ((available as f64 * fraction).round() as usize).clamp(1, available)
}

fn replace_from_table(text: &str, fraction: f64, seed: u64, table: WordTable) -> String {
    let mut words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    let candidates: Vec<usize> = words
        .iter()
        .enumerate()
        .filter(|(_, word)| lexicon::lookup(table, &word_core(word).to_lowercase()).is_some())
        .map(|(index, _)| index)
        .collect();

    let mut rng = SmallRng::seed_from_u64(seed);
    let count = unit_count(candidates.len(), fraction);
    let chosen: Vec<usize> = candidates
        .choose_multiple(&mut rng, count)
        .copied()
        .collect();

    for index in chosen {
        let word = &words[index];
        let core = word_core(word);
        let Some(choices) = lexicon::lookup(table, &core.to_lowercase()) else {
            continue;
        };
        let Some(replacement) = choices.choose(&mut rng) else {
            continue;
        };
        let start = word.len() - word.trim_start_matches(|c: char| !c.is_alphanumeric()).len();
        let end = start + core.len();
        let replaced = format!(
            "{}{}{}",
            &word[..start],
            match_case(core, replacement),
            &word[end..]
        );
        words[index] = replaced;
    }
    words.join(" ")
}

/// Word with leading and trailing punctuation removed.
fn word_core(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

fn match_case(original: &str, replacement: &str) -> String {
    let mut chars = original.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            if original.len() > 1 && original.chars().all(|c| !c.is_lowercase()) {
                return replacement.to_uppercase();
            }
            let mut out = String::with_capacity(replacement.len());
            let mut rest = replacement.chars();
            if let Some(head) = rest.next() {
                out.extend(head.to_uppercase());
            }
            out.extend(rest);
            out
        }
        _ => replacement.to_string(),
    }
}

fn replace_chars<F>(text: &str, fraction: f64, seed: u64, mut replace: F) -> String
where
    F: FnMut(char, &mut SmallRng) -> Option<char>,
{
    let mut chars: Vec<char> = text.chars().collect();
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut lookahead = rng.clone();
    let eligible: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| replace(**c, &mut lookahead).is_some())
        .map(|(index, _)| index)
        .collect();

    let count = unit_count(eligible.len(), fraction);
    let chosen: Vec<usize> = eligible.choose_multiple(&mut rng, count).copied().collect();
    for index in chosen {
        if let Some(replacement) = replace(chars[index], &mut rng) {
            chars[index] = replacement;
        }
    }
    chars.into_iter().collect()
}
