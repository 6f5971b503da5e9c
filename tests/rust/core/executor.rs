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

use std::collections::HashSet;

use august::{
    augment, augment_traced, AuAugmentable, AuError, AuExecutor, AuInvocation, AuMediaType,
    AuParamValue, AuProbability, AuRegisteredOperation, AuRegistry, AuStaticRegistry,
};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

const NAMES: [&str; 5] = ["alpha", "beta", "gamma", "delta", "epsilon"];

/// Media type whose operations fold their name into an order-sensitive value.
#[derive(Debug, Clone, PartialEq)]
struct Scripted {
    value: u64,
    calls: Vec<&'static str>,
    probability: f64,
}

impl Scripted {
    fn new(probability: f64) -> Self {
        Scripted {
            value: 1,
            calls: Vec::new(),
            probability,
        }
    }
}

fn step(
    media: &mut Scripted,
    rng: &mut dyn RngCore,
    name: &'static str,
    salt: u64,
) -> august::Result<AuInvocation> {
    let probability = AuProbability::new("probability", media.probability)?;
    let mut invocation = AuInvocation::gate(probability, rng);
    media.calls.push(name);
    if invocation.fired() {
        let amount = rng.gen_range(1..=9u64);
        invocation.record("amount", AuParamValue::Int(amount as i64));
        media.value = media.value.wrapping_mul(31).wrapping_add(salt * amount);
    }
    Ok(invocation)
}

fn alpha(m: &mut Scripted, r: &mut dyn RngCore) -> august::Result<AuInvocation> {
    step(m, r, "alpha", 1)
}

fn beta(m: &mut Scripted, r: &mut dyn RngCore) -> august::Result<AuInvocation> {
    step(m, r, "beta", 2)
}

fn gamma(m: &mut Scripted, r: &mut dyn RngCore) -> august::Result<AuInvocation> {
    step(m, r, "gamma", 3)
}

fn delta(m: &mut Scripted, r: &mut dyn RngCore) -> august::Result<AuInvocation> {
    step(m, r, "delta", 4)
}

fn epsilon(m: &mut Scripted, r: &mut dyn RngCore) -> august::Result<AuInvocation> {
    step(m, r, "epsilon", 5)
}

fn scripted_operations() -> august::Result<AuRegistry<Scripted>> {
    let tag = AuMediaType::Text;
    let mut registry = AuRegistry::new(tag);
    registry.register(tag, "alpha", alpha)?;
    registry.register(tag, "beta", beta)?;
    registry.register(tag, "gamma", gamma)?;
    registry.register(tag, "delta", delta)?;
    registry.register(tag, "epsilon", epsilon)?;
    Ok(registry)
}

static SCRIPTED: AuStaticRegistry<Scripted> = AuStaticRegistry::new(scripted_operations);

impl AuAugmentable for Scripted {
    const MEDIA_TYPE: AuMediaType = AuMediaType::Text;

    fn operations(&self) -> august::Result<&'static [AuRegisteredOperation<Self>]> {
        SCRIPTED.get()?.owned_operations(Self::MEDIA_TYPE)
    }
}

/// Media type with one healthy and one failing operation.
#[derive(Debug, Clone, PartialEq)]
struct Fragile {
    buffer: Vec<i32>,
    grew: bool,
}

impl Fragile {
    fn replace_with<F>(&mut self, transform: F) -> august::Result<()>
    where
        F: FnOnce(&[i32]) -> august::Result<Vec<i32>>,
    {
        self.buffer = transform(&self.buffer)?;
        Ok(())
    }
}

fn grow(media: &mut Fragile, rng: &mut dyn RngCore) -> august::Result<AuInvocation> {
    let invocation = AuInvocation::gate(AuProbability::ALWAYS, rng);
    media.replace_with(|buffer| {
        let mut next = buffer.to_vec();
        next.push(7);
        Ok(next)
    })?;
    media.grew = true;
    Ok(invocation)
}

fn explode(media: &mut Fragile, rng: &mut dyn RngCore) -> august::Result<AuInvocation> {
    let _ = AuInvocation::gate(AuProbability::ALWAYS, rng);
    media.replace_with(|_| Err(AuError::text_transform("explode", "primitive failed")))?;
    unreachable!("explode never succeeds")
}

fn fragile_operations() -> august::Result<AuRegistry<Fragile>> {
    let tag = AuMediaType::Image;
    let mut registry = AuRegistry::new(tag);
    registry.register(tag, "grow", grow)?;
    registry.register(tag, "explode", explode)?;
    Ok(registry)
}

static FRAGILE: AuStaticRegistry<Fragile> = AuStaticRegistry::new(fragile_operations);

impl AuAugmentable for Fragile {
    const MEDIA_TYPE: AuMediaType = AuMediaType::Image;

    fn operations(&self) -> august::Result<&'static [AuRegisteredOperation<Self>]> {
        FRAGILE.get()?.owned_operations(Self::MEDIA_TYPE)
    }
}

/// Media type whose declared tag disagrees with the owner of its registry.
struct Mislabeled {
    touched: bool,
}

fn touch(media: &mut Mislabeled, rng: &mut dyn RngCore) -> august::Result<AuInvocation> {
    let invocation = AuInvocation::gate(AuProbability::ALWAYS, rng);
    media.touched = true;
    Ok(invocation)
}

fn mislabeled_operations() -> august::Result<AuRegistry<Mislabeled>> {
    let mut registry = AuRegistry::new(AuMediaType::Text);
    registry.register(AuMediaType::Text, "touch", touch)?;
    Ok(registry)
}

static MISLABELED: AuStaticRegistry<Mislabeled> = AuStaticRegistry::new(mislabeled_operations);

impl AuAugmentable for Mislabeled {
    const MEDIA_TYPE: AuMediaType = AuMediaType::Audio;

    fn operations(&self) -> august::Result<&'static [AuRegisteredOperation<Self>]> {
        MISLABELED.get()?.owned_operations(Self::MEDIA_TYPE)
    }
}

#[test]
fn test_every_operation_runs_exactly_once() {
    let mut executor = AuExecutor::seeded(7);
    for _ in 0..50 {
        let mut media = Scripted::new(0.5);
        let trace = executor.augment_traced(&mut media).unwrap();

        let mut calls = media.calls.clone();
        calls.sort_unstable();
        let mut expected = NAMES.to_vec();
        expected.sort_unstable();
        assert_eq!(calls, expected);
        assert_eq!(trace.order(), media.calls);
        assert_eq!(trace.steps().len(), NAMES.len());
        assert_eq!(trace.media_type(), AuMediaType::Text);
    }
}

#[test]
fn test_order_is_shuffled() {
    let mut executor = AuExecutor::seeded(99);
    let mut first_operations = HashSet::new();
    let mut orders = HashSet::new();
    for _ in 0..500 {
        let mut media = Scripted::new(1.0);
        let trace = executor.augment_traced(&mut media).unwrap();
        first_operations.insert(trace.order()[0]);
        orders.insert(trace.order());
    }
    assert_eq!(first_operations.len(), NAMES.len());
    assert!(orders.len() > 60, "only {} distinct orders", orders.len());
}

#[test]
fn test_same_seed_is_deterministic() {
    let mut first = Scripted::new(0.5);
    let mut second = Scripted::new(0.5);
    let trace_a = AuExecutor::seeded(1234).augment_traced(&mut first).unwrap();
    let trace_b = AuExecutor::seeded(1234).augment_traced(&mut second).unwrap();
    assert_eq!(first, second);
    assert_eq!(trace_a, trace_b);
}

#[test]
fn test_free_function_matches_executor() {
    let mut by_executor = Scripted::new(0.7);
    AuExecutor::seeded(5).augment(&mut by_executor).unwrap();

    let mut by_function = Scripted::new(0.7);
    let mut rng = StdRng::seed_from_u64(5);
    augment(&mut by_function, &mut rng).unwrap();

    assert_eq!(by_executor, by_function);
}

#[test]
fn test_zero_probability_never_mutates() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..1000 {
        let mut media = Scripted::new(0.0);
        let trace = augment_traced(&mut media, &mut rng).unwrap();
        assert_eq!(media.value, 1);
        assert!(trace.fired().is_empty());
    }
}

#[test]
fn test_full_probability_always_mutates() {
    let mut executor = AuExecutor::seeded(2025);
    for _ in 0..1000 {
        let mut media = Scripted::new(1.0);
        let trace = executor.augment_traced(&mut media).unwrap();
        assert_ne!(media.value, 1);
        assert_eq!(trace.fired().len(), NAMES.len());
    }
}

#[test]
fn test_sampled_parameters_are_recorded() {
    let mut media = Scripted::new(1.0);
    let trace = AuExecutor::seeded(3).augment_traced(&mut media).unwrap();
    for name in NAMES {
        let invocation = trace.invocation(name).unwrap();
        let amount = invocation.param("amount").and_then(|v| v.as_i64()).unwrap();
        assert!((1..=9).contains(&amount));
    }
}

#[test]
fn test_failing_operation_leaves_buffer_untouched() {
    let mut executor = AuExecutor::seeded(11);
    let mut saw_grow_first = false;
    let mut saw_explode_first = false;
    for _ in 0..64 {
        let mut media = Fragile {
            buffer: vec![1, 2, 3],
            grew: false,
        };
        let err = executor.augment(&mut media).unwrap_err();
        assert_eq!(err, AuError::text_transform("explode", "primitive failed"));
        if media.grew {
            saw_grow_first = true;
            assert_eq!(media.buffer, vec![1, 2, 3, 7]);
        } else {
            saw_explode_first = true;
            assert_eq!(media.buffer, vec![1, 2, 3]);
        }
    }
    assert!(saw_grow_first && saw_explode_first);
}

#[test]
fn test_mismatched_media_type_is_a_registration_error() {
    let mut media = Mislabeled { touched: false };
    let err = AuExecutor::seeded(5).augment(&mut media).unwrap_err();
    assert!(matches!(err, AuError::Registration { .. }));
    assert!(!media.touched);
}

#[test]
fn test_entropy_executor_runs() {
    let mut media = Scripted::new(1.0);
    AuExecutor::from_entropy().augment(&mut media).unwrap();
    assert_eq!(media.calls.len(), NAMES.len());
}

#[cfg(feature = "parallel")]
#[test]
fn test_augment_all_is_reproducible() {
    let originals: Vec<Scripted> = (0..16).map(|_| Scripted::new(0.5)).collect();

    let mut parallel = originals.clone();
    august::augment_all(&mut parallel, 77).unwrap();

    let mut sequential = originals;
    for (index, media) in sequential.iter_mut().enumerate() {
        let mut rng = StdRng::seed_from_u64(77 + index as u64);
        augment(media, &mut rng).unwrap();
    }

    assert_eq!(parallel, sequential);
}
