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

//! # Augmentation Executor
//!
//! Runs one augmentation pass: every registered operation of a media object
//! is invoked exactly once, in a uniformly random order.
//!
//! The random stream is always explicit. An [`AuExecutor`] owns one, and the
//! free functions [`augment`] and [`augment_traced`] borrow one from the
//! caller. Seeding the stream makes both the permutation and every sampled
//! parameter reproducible.
//!
//! Errors raised by an operation are returned as they are. The failing
//! operation leaves the buffer untouched and the remaining operations of the
//! pass do not run.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use serde::Serialize;

use crate::domain::AuMediaType;
use crate::errors::Result;
use crate::operation::{AuAugmentable, AuInvocation};
use crate::registry::AuRegisteredOperation;

/// One entry of an [`AuAugmentTrace`], in execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuTraceStep {
    pub operation: &'static str,
    pub invocation: AuInvocation,
}

/// Execution order and invocation records of one augmentation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuAugmentTrace {
    media_type: AuMediaType,
    steps: Vec<AuTraceStep>,
}

impl AuAugmentTrace {
    pub fn media_type(&self) -> AuMediaType {
        self.media_type
    }

    pub fn steps(&self) -> &[AuTraceStep] {
        &self.steps
    }

    /// Operation names in the order they were invoked.
    pub fn order(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.operation).collect()
    }

    /// Names of the operations whose gate opened.
    pub fn fired(&self) -> Vec<&'static str> {
        self.steps
            .iter()
            .filter(|step| step.invocation.fired())
            .map(|step| step.operation)
            .collect()
    }

    pub fn invocation(&self, operation: &str) -> Option<&AuInvocation> {
        self.steps
            .iter()
            .find(|step| step.operation == operation)
            .map(|step| &step.invocation)
    }
}

/// Augmentation executor owning its random stream.
///
/// Use one executor per worker thread; the executor itself is never shared.
#[derive(Debug, Clone)]
pub struct AuExecutor<R: RngCore = StdRng> {
    rng: R,
}

impl AuExecutor<StdRng> {
    /// Executor whose whole output is reproducible from `seed`.
    pub fn seeded(seed: u64) -> Self {
        AuExecutor {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        AuExecutor {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: RngCore> AuExecutor<R> {
    pub fn new(rng: R) -> Self {
        AuExecutor { rng }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Runs one augmentation pass over `media`.
    pub fn augment<M: AuAugmentable>(&mut self, media: &mut M) -> Result<()> {
        augment(media, &mut self.rng)
    }

    /// Runs one augmentation pass and returns what happened.
    pub fn augment_traced<M: AuAugmentable>(&mut self, media: &mut M) -> Result<AuAugmentTrace> {
        augment_traced(media, &mut self.rng)
    }
}

/// Runs one augmentation pass over `media` using the caller's random stream.
pub fn augment<M: AuAugmentable>(media: &mut M, rng: &mut dyn RngCore) -> Result<()> {
    augment_traced(media, rng).map(|_| ())
}

/// Runs one augmentation pass over `media` and records every invocation.
pub fn augment_traced<M: AuAugmentable>(
    media: &mut M,
    rng: &mut dyn RngCore,
) -> Result<AuAugmentTrace> {
    let operations = media.operations()?;
    let mut order: Vec<&AuRegisteredOperation<M>> = operations.iter().collect();
    order.shuffle(rng);

    log::debug!(
        "augmenting {} sample with {} operations",
        M::MEDIA_TYPE,
        order.len()
    );

    let mut steps = Vec::with_capacity(order.len());
    for operation in order {
        let invocation = operation.invoke(media, rng)?;
        if invocation.fired() {
            log::debug!(
                "{}.{} fired with {:?}",
                M::MEDIA_TYPE,
                operation.name(),
                invocation.params()
            );
        }
        steps.push(AuTraceStep {
            operation: operation.name(),
            invocation,
        });
    }

    Ok(AuAugmentTrace {
        media_type: M::MEDIA_TYPE,
        steps,
    })
}

/// Augments every element of `media` in parallel.
///
/// Element `i` gets its own stream seeded with `seed + i` (wrapping), so the
/// result does not depend on how Rayon schedules the work. The first error
/// encountered is returned; elements processed before it keep their output.
#[cfg(feature = "parallel")]
pub fn augment_all<M>(media: &mut [M], seed: u64) -> Result<()>
where
    M: AuAugmentable + Send,
{
    use rayon::prelude::*;

    log::info!("augmenting {} {} samples in parallel", media.len(), M::MEDIA_TYPE);

    media
        .par_iter_mut()
        .enumerate()
        .try_for_each(|(index, item)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
            augment(item, &mut rng)
        })
}
