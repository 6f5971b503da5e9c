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

//! # Configuration Knobs
//!
//! Validated building blocks shared by every media type's configuration
//! model: a trigger probability and a closed parameter range.
//!
//! Each domain configuration (`AuAudioConfig`, `AuImageConfig`,
//! `AuTextConfig`) validates its raw fields with the constructors below and
//! hands out these knobs to its operations. Knobs are `Copy` and carry no
//! interior mutability, so a configuration stays read-only once built.

use std::fmt;

use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use serde::Serialize;

use crate::errors::{AuError, Result};

/// Probability that an operation fires during one augmentation pass.
///
/// The gate is inclusive: a uniform draw `u` in `[0, 1)` fires the
/// operation when `u <= p`. A probability of `1.0` therefore always fires.
/// A probability of `0.0` fires only when the draw is exactly `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct AuProbability(f64);

impl AuProbability {
    pub const ALWAYS: AuProbability = AuProbability(1.0);
    pub const NEVER: AuProbability = AuProbability(0.0);

    /// Validates `value` as a probability for the knob named `field`.
    pub fn new(field: &str, value: f64) -> Result<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(AuError::configuration(
                field,
                format!("probability {} must lie in [0, 1]", value),
            ));
        }
        Ok(AuProbability(value))
    }

    pub(crate) fn trusted(value: f64) -> Self {
        AuProbability(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Draws once from `rng` and reports whether the gate opens.
    pub fn fires<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
        rng.gen::<f64>() <= self.0
    }
}

/// Scalar types that may appear as the bounds of an [`AuRange`].
pub trait AuParam: Copy + PartialOrd + SampleUniform + fmt::Display {
    /// Rejects values that cannot be ordered, such as NaN.
    fn is_valid(self) -> bool;
}

impl AuParam for f64 {
    fn is_valid(self) -> bool {
        self.is_finite()
    }
}

impl AuParam for i32 {
    fn is_valid(self) -> bool {
        true
    }
}

impl AuParam for u32 {
    fn is_valid(self) -> bool {
        true
    }
}

/// Closed interval `[min, max]` from which an operation samples a parameter.
///
/// Floating point ranges are sampled uniformly; integer ranges are sampled
/// uniformly with both endpoints included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AuRange<T> {
    min: T,
    max: T,
}

impl<T: AuParam> AuRange<T> {
    /// Validates that `min <= max` for the knob named `field`.
    pub fn new(field: &str, min: T, max: T) -> Result<Self> {
        if !min.is_valid() || !max.is_valid() {
            return Err(AuError::configuration(
                field,
                format!("range [{}, {}] contains a non-finite bound", min, max),
            ));
        }
        if min > max {
            return Err(AuError::configuration(
                field,
                format!("minimum {} is greater than maximum {}", min, max),
            ));
        }
        Ok(AuRange { min, max })
    }

    /// Like [`AuRange::new`], additionally requiring both bounds to lie in
    /// the domain interval `[lower, upper]`.
    pub fn bounded(field: &str, min: T, max: T, lower: T, upper: T) -> Result<Self> {
        let range = Self::new(field, min, max)?;
        if min < lower || max > upper {
            return Err(AuError::configuration(
                field,
                format!(
                    "range [{}, {}] must lie within [{}, {}]",
                    min, max, lower, upper
                ),
            ));
        }
        Ok(range)
    }

    /// Builds a range from bounds that were validated when their
    /// configuration was constructed.
    pub(crate) fn trusted(min: T, max: T) -> Self {
        AuRange { min, max }
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Samples one value uniformly from the closed range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}
