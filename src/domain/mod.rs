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

//! # August Domain Module
//!
//! Media-type adapters. Each adapter supplies a media object, its
//! configuration model, the pure transform primitives it wraps, and the
//! operations it registers.
//!
//! ## Architecture Overview
//!
//! - **AuMediaType**: Tag identifying which adapter owns an operation
//! - **audio**: Mono sample buffers (`AuAudio`), loaded from and saved to WAV
//! - **image**: Pixel grids (`AuImage`) backed by `image::DynamicImage`
//! - **text**: Strings (`AuText`) that remember their original content
//!
//! Adapters are independent of each other: none of them reads another
//! adapter's buffer type or calls another adapter's operations.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod audio;
pub mod image;
pub mod text;

pub use audio::{AuAudio, AuAudioBuffer, AuAudioConfig, AuAudioConfigBuilder};
pub use image::{AuImage, AuImageConfig, AuImageConfigBuilder};
pub use text::{AuText, AuTextConfig, AuTextConfigBuilder};

/// Tag of the media type owning a set of registered operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuMediaType {
    Audio,
    Image,
    Text,
}

impl AuMediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuMediaType::Audio => "audio",
            AuMediaType::Image => "image",
            AuMediaType::Text => "text",
        }
    }
}

impl fmt::Display for AuMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
