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

//! # Text Domain Module
//!
//! Text adapter. The media object keeps the text it was created with next to
//! the augmented text, so callers can always compare the two.
//!
//! ## Registered Operations
//!
//! In declaration order: `synonym_replace`, `antonym_replace`, `ocr`,
//! `keyboard`, `random_character`, `random_word_delete`,
//! `random_word_substitute`, `random_word_swap`, `spelling`.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rand::RngCore;

use crate::config::{AuProbability, AuRange};
use crate::domain::AuMediaType;
use crate::errors::{AuError, Result};
use crate::operation::{AuAugmentable, AuInvocation, AuParamValue};
use crate::registry::{AuRegisteredOperation, AuRegistry, AuStaticRegistry};

pub mod config;
mod lexicon;
pub mod primitives;

pub use config::{AuTextConfig, AuTextConfigBuilder};

/// Text media object.
#[derive(Debug, Clone)]
pub struct AuText {
    text: String,
    original_text: String,
    config: Arc<AuTextConfig>,
}

impl AuText {
    pub fn new(text: impl Into<String>, config: Arc<AuTextConfig>) -> Self {
        let text = text.into();
        AuText {
            original_text: text.clone(),
            text,
            config,
        }
    }

    /// Reads a UTF-8 text file.
    pub fn load(path: impl AsRef<Path>, config: Arc<AuTextConfig>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| AuError::load(path.display().to_string(), e.to_string()))?;
        Ok(AuText::new(text, config))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, &self.text)
            .map_err(|e| AuError::save(path.display().to_string(), e.to_string()))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text as it was before any augmentation.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn config(&self) -> &AuTextConfig {
        &self.config
    }

    fn replace_with<F>(&mut self, transform: F) -> Result<()>
    where
        F: FnOnce(&str) -> Result<String>,
    {
        self.text = transform(&self.text)?;
        Ok(())
    }
}

static TEXT_OPERATIONS: AuStaticRegistry<AuText> = AuStaticRegistry::new(register_operations);

/// Registry of the text operations.
pub fn registry() -> Result<&'static AuRegistry<AuText>> {
    TEXT_OPERATIONS.get()
}

impl AuAugmentable for AuText {
    const MEDIA_TYPE: AuMediaType = AuMediaType::Text;

    fn operations(&self) -> Result<&'static [AuRegisteredOperation<Self>]> {
        registry()?.owned_operations(Self::MEDIA_TYPE)
    }
}

fn register_operations() -> Result<AuRegistry<AuText>> {
    let tag = AuMediaType::Text;
    let mut registry = AuRegistry::new(tag);
    registry.register(tag, "synonym_replace", synonym_replace)?;
    registry.register(tag, "antonym_replace", antonym_replace)?;
    registry.register(tag, "ocr", ocr)?;
    registry.register(tag, "keyboard", keyboard)?;
    registry.register(tag, "random_character", random_character)?;
    registry.register(tag, "random_word_delete", random_word_delete)?;
    registry.register(tag, "random_word_substitute", random_word_substitute)?;
    registry.register(tag, "random_word_swap", random_word_swap)?;
    registry.register(tag, "spelling", spelling)?;
    Ok(registry)
}

type AuTextPrimitive = fn(&str, f64, u64) -> Result<String>;

/// Shared body of every text operation: gate, sample an intensity and a
/// seed, then run `primitive`.
fn apply(
    text: &mut AuText,
    rng: &mut dyn RngCore,
    probability: AuProbability,
    intensity: AuRange<f64>,
    primitive: AuTextPrimitive,
) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(probability, rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let fraction = intensity.sample(rng);
    invocation.record("fraction", AuParamValue::Float(fraction));
    let seed = invocation.seed("seed", rng);
    text.replace_with(|current| primitive(current, fraction, seed))?;
    Ok(invocation)
}

fn synonym_replace(text: &mut AuText, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let (p, range) = (text.config.synonym_replace(), text.config.word_fraction());
    apply(text, rng, p, range, primitives::synonym_replace)
}

fn antonym_replace(text: &mut AuText, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let (p, range) = (text.config.antonym_replace(), text.config.word_fraction());
    apply(text, rng, p, range, primitives::antonym_replace)
}

fn ocr(text: &mut AuText, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let (p, range) = (text.config.ocr(), text.config.char_fraction());
    apply(text, rng, p, range, primitives::ocr)
}

fn keyboard(text: &mut AuText, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let (p, range) = (text.config.keyboard(), text.config.char_fraction());
    apply(text, rng, p, range, primitives::keyboard)
}

fn random_character(text: &mut AuText, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let (p, range) = (text.config.random_character(), text.config.char_fraction());
    apply(text, rng, p, range, primitives::random_character)
}

fn random_word_delete(text: &mut AuText, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let (p, range) = (text.config.random_word_delete(), text.config.word_fraction());
    apply(text, rng, p, range, primitives::random_word_delete)
}

fn random_word_substitute(text: &mut AuText, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let (p, range) = (
        text.config.random_word_substitute(),
        text.config.word_fraction(),
    );
    apply(text, rng, p, range, primitives::random_word_substitute)
}

fn random_word_swap(text: &mut AuText, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let (p, range) = (text.config.random_word_swap(), text.config.word_fraction());
    apply(text, rng, p, range, primitives::random_word_swap)
}

fn spelling(text: &mut AuText, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let (p, range) = (text.config.spelling(), text.config.word_fraction());
    apply(text, rng, p, range, primitives::spelling)
}
