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

//! # August Core Library
//!
//! August applies randomized, probability-gated augmentations to audio,
//! image, and text samples to produce variant training data.
//!
//! ## Module Overview
//!
//! - **config**: Validated knobs (`AuProbability`, `AuRange`) shared by every configuration
//! - **registry**: Per-media-type lists of named operations, in declaration order
//! - **operation**: The `AuAugmentable` capability and per-call `AuInvocation` records
//! - **executor**: Randomized-order augmentation passes over a media object
//! - **domain**: Audio, image, and text adapters with their transform primitives
//! - **errors**: `AuError` and the crate-wide `Result` alias
//!
//! ## Feature Flags
//!
//! - `parallel`: Enables `augment_all` for slices of media objects (Rayon)
//! - `full`: Enables all features
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use august::{AuExecutor, AuText, AuTextConfigBuilder};
//!
//! let config = AuTextConfigBuilder {
//!     random_word_swap_p: Some(1.0),
//!     ..Default::default()
//! }
//! .build()?;
//!
//! let mut text = AuText::new("The quick brown fox", Arc::new(config));
//! let trace = AuExecutor::seeded(42).augment_traced(&mut text)?;
//! println!("{} -> {} via {:?}", text.original_text(), text.text(), trace.fired());
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: Built once, validated, then shared read-only through `Arc`
//! 2. **Registration**: Each media type registers its operations once per process
//! 3. **Execution**: The executor shuffles the operations and invokes each exactly once
//! 4. **Primitives**: Operations sample parameters and call pure buffer transforms
//!
//! ## Error Handling
//!
//! All fallible calls return `Result<T, AuError>`. Configuration errors are
//! raised before any augmentation runs; transform errors leave the media
//! buffer at its last good value.

pub mod config;
pub mod domain;
pub mod errors;
pub mod executor;
pub mod operation;
pub mod registry;

pub use config::{AuParam, AuProbability, AuRange};
pub use domain::{
    AuAudio, AuAudioBuffer, AuAudioConfig, AuAudioConfigBuilder, AuImage, AuImageConfig,
    AuImageConfigBuilder, AuMediaType, AuText, AuTextConfig, AuTextConfigBuilder,
};
pub use errors::{AuError, Result};
#[cfg(feature = "parallel")]
pub use executor::augment_all;
pub use executor::{augment, augment_traced, AuAugmentTrace, AuExecutor, AuTraceStep};
pub use operation::{AuAugmentable, AuInvocation, AuParamValue};
pub use registry::{AuOperationFn, AuRegisteredOperation, AuRegistry, AuStaticRegistry};

/// Builds the audio, image, and text registries.
///
/// Registries are otherwise built lazily on first use; calling this at
/// startup surfaces duplicate or mis-tagged registrations immediately.
pub fn verify_registries() -> Result<()> {
    let audio = domain::audio::registry()?;
    let image = domain::image::registry()?;
    let text = domain::text::registry()?;
    log::info!(
        "registries ready: {} audio, {} image, {} text operations",
        audio.len(),
        image.len(),
        text.len()
    );
    Ok(())
}
