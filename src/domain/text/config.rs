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

/// Validated knobs of every text operation.
///
/// Word-level operations (synonym, antonym, delete, substitute, swap,
/// spelling) draw their intensity from `word_fraction`; character-level
/// operations (OCR, keyboard, random character) from `char_fraction`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AuTextConfigBuilder")]
pub struct AuTextConfig {
    synonym_replace_p: f64,
    antonym_replace_p: f64,
    ocr_p: f64,
    keyboard_p: f64,
    random_character_p: f64,
    random_word_delete_p: f64,
    random_word_substitute_p: f64,
    random_word_swap_p: f64,
    spelling_p: f64,

    min_word_fraction: f64,
    max_word_fraction: f64,
    min_char_fraction: f64,
    max_char_fraction: f64,
}

impl Default for AuTextConfig {
    fn default() -> Self {
        AuTextConfig {
            synonym_replace_p: 0.3,
            antonym_replace_p: 0.3,
            ocr_p: 0.3,
            keyboard_p: 0.3,
            random_character_p: 0.3,
            random_word_delete_p: 0.3,
            random_word_substitute_p: 0.3,
            random_word_swap_p: 0.3,
            spelling_p: 0.3,
            min_word_fraction: 0.1,
            max_word_fraction: 0.3,
            min_char_fraction: 0.05,
            max_char_fraction: 0.3,
        }
    }
}

impl AuTextConfig {
    pub fn builder() -> AuTextConfigBuilder {
        AuTextConfigBuilder::default()
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        let builder: AuTextConfigBuilder = serde_json::from_value(value.clone())
            .map_err(|err| AuError::configuration("text", err.to_string()))?;
        builder.build()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let builder: AuTextConfigBuilder = serde_json::from_str(json)
            .map_err(|err| AuError::configuration("text", err.to_string()))?;
        builder.build()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let builder: AuTextConfigBuilder = serde_yaml::from_str(yaml)
            .map_err(|err| AuError::configuration("text", err.to_string()))?;
        builder.build()
    }

    fn validate(&self) -> Result<()> {
        AuProbability::new("synonym_replace_p", self.synonym_replace_p)?;
        AuProbability::new("antonym_replace_p", self.antonym_replace_p)?;
        AuProbability::new("ocr_p", self.ocr_p)?;
        AuProbability::new("keyboard_p", self.keyboard_p)?;
        AuProbability::new("random_character_p", self.random_character_p)?;
        AuProbability::new("random_word_delete_p", self.random_word_delete_p)?;
        AuProbability::new("random_word_substitute_p", self.random_word_substitute_p)?;
        AuProbability::new("random_word_swap_p", self.random_word_swap_p)?;
        AuProbability::new("spelling_p", self.spelling_p)?;
        AuRange::bounded(
            "word_fraction",
            self.min_word_fraction,
            self.max_word_fraction,
            0.0,
            1.0,
        )?;
        AuRange::bounded(
            "char_fraction",
            self.min_char_fraction,
            self.max_char_fraction,
            0.0,
            1.0,
        )?;
        Ok(())
    }

    pub fn synonym_replace(&self) -> AuProbability {
        AuProbability::trusted(self.synonym_replace_p)
    }

    pub fn antonym_replace(&self) -> AuProbability {
        AuProbability::trusted(self.antonym_replace_p)
    }

    pub fn ocr(&self) -> AuProbability {
        AuProbability::trusted(self.ocr_p)
    }

    pub fn keyboard(&self) -> AuProbability {
        AuProbability::trusted(self.keyboard_p)
    }

    pub fn random_character(&self) -> AuProbability {
        AuProbability::trusted(self.random_character_p)
    }

    pub fn random_word_delete(&self) -> AuProbability {
        AuProbability::trusted(self.random_word_delete_p)
    }

    pub fn random_word_substitute(&self) -> AuProbability {
        AuProbability::trusted(self.random_word_substitute_p)
    }

    pub fn random_word_swap(&self) -> AuProbability {
        AuProbability::trusted(self.random_word_swap_p)
    }

    pub fn spelling(&self) -> AuProbability {
        AuProbability::trusted(self.spelling_p)
    }

    pub fn word_fraction(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_word_fraction, self.max_word_fraction)
    }

    pub fn char_fraction(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_char_fraction, self.max_char_fraction)
    }
}

/// Partial text configuration. Unset fields take the documented defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuTextConfigBuilder {
    pub synonym_replace_p: Option<f64>,
    pub antonym_replace_p: Option<f64>,
    pub ocr_p: Option<f64>,
    pub keyboard_p: Option<f64>,
    pub random_character_p: Option<f64>,
    pub random_word_delete_p: Option<f64>,
    pub random_word_substitute_p: Option<f64>,
    pub random_word_swap_p: Option<f64>,
    pub spelling_p: Option<f64>,
    pub min_word_fraction: Option<f64>,
    pub max_word_fraction: Option<f64>,
    pub min_char_fraction: Option<f64>,
    pub max_char_fraction: Option<f64>,
}

impl AuTextConfigBuilder {
    /// Builder with every trigger probability set to `p`.
    pub fn with_all_probabilities(p: f64) -> Self {
        AuTextConfigBuilder {
            synonym_replace_p: Some(p),
            antonym_replace_p: Some(p),
            ocr_p: Some(p),
            keyboard_p: Some(p),
            random_character_p: Some(p),
            random_word_delete_p: Some(p),
            random_word_substitute_p: Some(p),
            random_word_swap_p: Some(p),
            spelling_p: Some(p),
            ..Default::default()
        }
    }

    pub fn build(self) -> Result<AuTextConfig> {
        let base = AuTextConfig::default();
        let config = AuTextConfig {
            synonym_replace_p: self.synonym_replace_p.unwrap_or(base.synonym_replace_p),
            antonym_replace_p: self.antonym_replace_p.unwrap_or(base.antonym_replace_p),
            ocr_p: self.ocr_p.unwrap_or(base.ocr_p),
            keyboard_p: self.keyboard_p.unwrap_or(base.keyboard_p),
            random_character_p: self.random_character_p.unwrap_or(base.random_character_p),
            random_word_delete_p: self
                .random_word_delete_p
                .unwrap_or(base.random_word_delete_p),
            random_word_substitute_p: self
                .random_word_substitute_p
                .unwrap_or(base.random_word_substitute_p),
            random_word_swap_p: self.random_word_swap_p.unwrap_or(base.random_word_swap_p),
            spelling_p: self.spelling_p.unwrap_or(base.spelling_p),
            min_word_fraction: self.min_word_fraction.unwrap_or(base.min_word_fraction),
            max_word_fraction: self.max_word_fraction.unwrap_or(base.max_word_fraction),
            min_char_fraction: self.min_char_fraction.unwrap_or(base.min_char_fraction),
            max_char_fraction: self.max_char_fraction.unwrap_or(base.max_char_fraction),
        };
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<AuTextConfigBuilder> for AuTextConfig {
    type Error = AuError;

    fn try_from(builder: AuTextConfigBuilder) -> Result<Self> {
        builder.build()
    }
}
