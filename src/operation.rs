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

//! # August Operation Module
//!
//! This module defines the capability every media object exposes to the
//! executor, and the ephemeral record an operation returns for one call.
//!
//! ## Writing an Operation
//!
//! An operation is a plain function registered with
//! [`AuRegistry::register`](crate::registry::AuRegistry::register). It
//! follows the same three steps for every media type:
//!
//! 1. Open the gate with [`AuInvocation::gate`] using its trigger probability
//! 2. When fired, sample each parameter from its configured range and record it
//! 3. Replace the media buffer with the primitive's output, only on success
//!
//! ```rust
//! fn mirror(image: &mut AuImage, rng: &mut dyn RngCore) -> Result<AuInvocation> {
//!     let invocation = AuInvocation::gate(image.config().mirror(), rng);
//!     if invocation.fired() {
//!         image.replace_with(|img| primitives::mirror(img))?;
//!     }
//!     Ok(invocation)
//! }
//! ```

use rand::{Rng, RngCore};
use serde::Serialize;

use crate::config::AuProbability;
use crate::domain::AuMediaType;
use crate::errors::Result;
use crate::registry::AuRegisteredOperation;

/// Capability of a media object whose type declares registered operations.
///
/// The executor is generic over this trait and never needs to know the
/// buffer representation behind it.
pub trait AuAugmentable: Sized + 'static {
    /// Tag of the media type owning the operations.
    const MEDIA_TYPE: AuMediaType;

    /// Registered operations of this media type, in declaration order.
    fn operations(&self) -> Result<&'static [AuRegisteredOperation<Self>]>;
}

/// Value sampled for one named parameter of an operation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AuParamValue {
    Int(i64),
    Float(f64),
    /// Seed handed to a primitive that needs its own randomness.
    Seed(u64),
    /// Name of a variant picked among fixed alternatives.
    Choice(&'static str),
}

impl AuParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AuParamValue::Int(value) => Some(*value as f64),
            AuParamValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AuParamValue::Int(value) => Some(*value),
            _ => None,
        }
    }
}

/// Record of one operation call: whether it fired and what it sampled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuInvocation {
    fired: bool,
    params: Vec<(&'static str, AuParamValue)>,
}

impl AuInvocation {
    /// Draws the trigger for an operation with probability `probability`.
    pub fn gate(probability: AuProbability, rng: &mut dyn RngCore) -> Self {
        AuInvocation {
            fired: probability.fires(rng),
            params: Vec::new(),
        }
    }

    /// Samples a fresh seed for a primitive and records it as `name`.
    pub fn seed(&mut self, name: &'static str, rng: &mut dyn RngCore) -> u64 {
        let seed = rng.gen::<u64>();
        self.params.push((name, AuParamValue::Seed(seed)));
        seed
    }

    pub fn record(&mut self, name: &'static str, value: AuParamValue) {
        self.params.push((name, value));
    }

    pub fn fired(&self) -> bool {
        self.fired
    }

    pub fn params(&self) -> &[(&'static str, AuParamValue)] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&AuParamValue> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}
