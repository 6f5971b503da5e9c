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

//! # August Error Module
//!
//! This module defines the error types used throughout August for consistent
//! error handling and reporting.
//!
//! ## Error Handling Philosophy
//!
//! August is a fail-fast orchestrator:
//!
//! - **Explicit Error Types**: Each variant represents one category of failure
//! - **No Local Recovery**: The executor never catches an error raised by an
//!   operation; it reaches the caller exactly as the primitive produced it
//! - **Serde Support**: Errors can be serialized for logging and reporting by
//!   whatever batch driver sits on top of the core
//!
//! ## Error Categories
//!
//! - **Configuration**: Invalid probability or parameter range
//! - **DuplicateRegistration / Registration**: Programming errors while
//!   declaring a media type's operations
//! - **AudioTransform / ImageTransform / TextTransform**: Failures raised by a
//!   transform primitive, one variant per adapter
//! - **Load / Save**: Boundary errors from loaders and savers
//! - **Io / Serde**: Conversions from standard and serde errors

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::AuMediaType;

/// Convenience result type used throughout August.
///
/// # Example
///
/// ```rust
/// use august::errors::{AuError, Result};
///
/// fn check(p: f64) -> Result<f64> {
///     if !(0.0..=1.0).contains(&p) {
///         return Err(AuError::configuration("p", "must lie in [0, 1]"));
///     }
///     Ok(p)
/// }
/// ```
pub type Result<T> = std::result::Result<T, AuError>;

/// Canonical error enumeration for August.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum AuError {
    /// Invalid probability, range, or field in a configuration model.
    #[error("configuration error in '{field}': {message}")]
    Configuration { field: String, message: String },

    /// The same operation name was registered twice for one media type.
    #[error("operation '{operation}' is already registered for {media_type}")]
    DuplicateRegistration {
        media_type: AuMediaType,
        operation: String,
    },

    /// Any other misuse of a registry.
    #[error("registration error: {message}")]
    Registration { message: String },

    /// Failure raised by an audio transform primitive.
    #[error("audio transform '{operation}' failed: {message}")]
    AudioTransform { operation: String, message: String },

    /// Failure raised by an image transform primitive.
    #[error("image transform '{operation}' failed: {message}")]
    ImageTransform { operation: String, message: String },

    /// Failure raised by a text transform primitive.
    #[error("text transform '{operation}' failed: {message}")]
    TextTransform { operation: String, message: String },

    /// A loader could not produce the initial buffer.
    #[error("failed to load '{path}': {message}")]
    Load { path: String, message: String },

    /// A saver could not persist the final buffer.
    #[error("failed to save '{path}': {message}")]
    Save { path: String, message: String },

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<io::Error> for AuError {
    fn from(err: io::Error) -> Self {
        AuError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AuError {
    fn from(err: serde_json::Error) -> Self {
        AuError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for AuError {
    fn from(err: serde_yaml::Error) -> Self {
        AuError::Serde(err.to_string())
    }
}

impl AuError {
    /// Helper to construct configuration errors.
    pub fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        AuError::Configuration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Helper to construct registration errors.
    pub fn registration<T: Into<String>>(message: T) -> Self {
        AuError::Registration {
            message: message.into(),
        }
    }

    pub fn audio_transform(operation: impl Into<String>, message: impl Into<String>) -> Self {
        AuError::AudioTransform {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn image_transform(operation: impl Into<String>, message: impl Into<String>) -> Self {
        AuError::ImageTransform {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn text_transform(operation: impl Into<String>, message: impl Into<String>) -> Self {
        AuError::TextTransform {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Helper to construct loader errors.
    pub fn load(path: impl Into<String>, message: impl Into<String>) -> Self {
        AuError::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Helper to construct saver errors.
    pub fn save(path: impl Into<String>, message: impl Into<String>) -> Self {
        AuError::Save {
            path: path.into(),
            message: message.into(),
        }
    }
}
