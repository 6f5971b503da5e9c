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

/// Validated knobs of every image operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AuImageConfigBuilder")]
pub struct AuImageConfig {
    mirror_p: f64,
    flip_p: f64,
    color_p: f64,

    temperature_p: f64,
    min_temperature_ratio: i32,
    max_temperature_ratio: i32,

    rotate_p: f64,
    min_angle: i32,
    max_angle: i32,

    blur_p: f64,
    min_pixel_radius: u32,
    max_pixel_radius: u32,

    offset_p: f64,
    min_x_offset: f64,
    max_x_offset: f64,
    min_y_offset: f64,
    max_y_offset: f64,

    crop_p: f64,
    min_x_crop: f64,
    max_x_crop: f64,
    min_y_crop: f64,
    max_y_crop: f64,
}

impl Default for AuImageConfig {
    fn default() -> Self {
        AuImageConfig {
            mirror_p: 0.5,
            flip_p: 0.5,
            color_p: 0.5,
            temperature_p: 0.5,
            min_temperature_ratio: -50,
            max_temperature_ratio: 50,
            rotate_p: 0.5,
            min_angle: -89,
            max_angle: 89,
            blur_p: 0.5,
            min_pixel_radius: 1,
            max_pixel_radius: 5,
            offset_p: 0.5,
            min_x_offset: -0.5,
            max_x_offset: 0.5,
            min_y_offset: -0.5,
            max_y_offset: 0.5,
            crop_p: 0.5,
            min_x_crop: 0.6,
            max_x_crop: 0.9,
            min_y_crop: 0.6,
            max_y_crop: 0.9,
        }
    }
}

impl AuImageConfig {
    pub fn builder() -> AuImageConfigBuilder {
        AuImageConfigBuilder::default()
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        let builder: AuImageConfigBuilder = serde_json::from_value(value.clone())
            .map_err(|err| AuError::configuration("image", err.to_string()))?;
        builder.build()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let builder: AuImageConfigBuilder = serde_json::from_str(json)
            .map_err(|err| AuError::configuration("image", err.to_string()))?;
        builder.build()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let builder: AuImageConfigBuilder = serde_yaml::from_str(yaml)
            .map_err(|err| AuError::configuration("image", err.to_string()))?;
        builder.build()
    }

    fn validate(&self) -> Result<()> {
        AuProbability::new("mirror_p", self.mirror_p)?;
        AuProbability::new("flip_p", self.flip_p)?;
        AuProbability::new("color_p", self.color_p)?;

        AuProbability::new("temperature_p", self.temperature_p)?;
        AuRange::bounded(
            "temperature_ratio",
            self.min_temperature_ratio,
            self.max_temperature_ratio,
            -255,
            255,
        )?;

        AuProbability::new("rotate_p", self.rotate_p)?;
        AuRange::bounded("angle", self.min_angle, self.max_angle, -360, 360)?;

        AuProbability::new("blur_p", self.blur_p)?;
        AuRange::bounded(
            "pixel_radius",
            self.min_pixel_radius,
            self.max_pixel_radius,
            0,
            100,
        )?;

        AuProbability::new("offset_p", self.offset_p)?;
        AuRange::bounded("x_offset", self.min_x_offset, self.max_x_offset, -1.0, 1.0)?;
        AuRange::bounded("y_offset", self.min_y_offset, self.max_y_offset, -1.0, 1.0)?;

        AuProbability::new("crop_p", self.crop_p)?;
        AuRange::bounded("x_crop", self.min_x_crop, self.max_x_crop, 0.0, 1.0)?;
        AuRange::bounded("y_crop", self.min_y_crop, self.max_y_crop, 0.0, 1.0)?;

        Ok(())
    }

    pub fn mirror(&self) -> AuProbability {
        AuProbability::trusted(self.mirror_p)
    }

    pub fn flip(&self) -> AuProbability {
        AuProbability::trusted(self.flip_p)
    }

    pub fn color(&self) -> AuProbability {
        AuProbability::trusted(self.color_p)
    }

    pub fn temperature(&self) -> AuProbability {
        AuProbability::trusted(self.temperature_p)
    }

    /// Amount added to red and removed from blue.
    pub fn temperature_ratio(&self) -> AuRange<i32> {
        AuRange::trusted(self.min_temperature_ratio, self.max_temperature_ratio)
    }

    pub fn rotate(&self) -> AuProbability {
        AuProbability::trusted(self.rotate_p)
    }

    /// Rotation in degrees, counter-clockwise.
    pub fn angle(&self) -> AuRange<i32> {
        AuRange::trusted(self.min_angle, self.max_angle)
    }

    pub fn blur(&self) -> AuProbability {
        AuProbability::trusted(self.blur_p)
    }

    pub fn pixel_radius(&self) -> AuRange<u32> {
        AuRange::trusted(self.min_pixel_radius, self.max_pixel_radius)
    }

    pub fn offset(&self) -> AuProbability {
        AuProbability::trusted(self.offset_p)
    }

    /// Horizontal roll as a signed fraction of the width.
    pub fn x_offset(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_x_offset, self.max_x_offset)
    }

    /// Vertical roll as a signed fraction of the height.
    pub fn y_offset(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_y_offset, self.max_y_offset)
    }

    pub fn crop(&self) -> AuProbability {
        AuProbability::trusted(self.crop_p)
    }

    /// Kept width as a fraction of the original width.
    pub fn x_crop(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_x_crop, self.max_x_crop)
    }

    /// Kept height as a fraction of the original height.
    pub fn y_crop(&self) -> AuRange<f64> {
        AuRange::trusted(self.min_y_crop, self.max_y_crop)
    }
}

/// Partial image configuration. Unset fields take the documented defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuImageConfigBuilder {
    pub mirror_p: Option<f64>,
    pub flip_p: Option<f64>,
    pub color_p: Option<f64>,
    pub temperature_p: Option<f64>,
    pub min_temperature_ratio: Option<i32>,
    pub max_temperature_ratio: Option<i32>,
    pub rotate_p: Option<f64>,
    pub min_angle: Option<i32>,
    pub max_angle: Option<i32>,
    pub blur_p: Option<f64>,
    pub min_pixel_radius: Option<u32>,
    pub max_pixel_radius: Option<u32>,
    pub offset_p: Option<f64>,
    pub min_x_offset: Option<f64>,
    pub max_x_offset: Option<f64>,
    pub min_y_offset: Option<f64>,
    pub max_y_offset: Option<f64>,
    pub crop_p: Option<f64>,
    pub min_x_crop: Option<f64>,
    pub max_x_crop: Option<f64>,
    pub min_y_crop: Option<f64>,
    pub max_y_crop: Option<f64>,
}

impl AuImageConfigBuilder {
    /// Builder with every trigger probability set to `p`.
    pub fn with_all_probabilities(p: f64) -> Self {
        AuImageConfigBuilder {
            mirror_p: Some(p),
            flip_p: Some(p),
            color_p: Some(p),
            temperature_p: Some(p),
            rotate_p: Some(p),
            blur_p: Some(p),
            offset_p: Some(p),
            crop_p: Some(p),
            ..Default::default()
        }
    }

    pub fn build(self) -> Result<AuImageConfig> {
        let base = AuImageConfig::default();
        let config = AuImageConfig {
            mirror_p: self.mirror_p.unwrap_or(base.mirror_p),
            flip_p: self.flip_p.unwrap_or(base.flip_p),
            color_p: self.color_p.unwrap_or(base.color_p),
            temperature_p: self.temperature_p.unwrap_or(base.temperature_p),
            min_temperature_ratio: self
                .min_temperature_ratio
                .unwrap_or(base.min_temperature_ratio),
            max_temperature_ratio: self
                .max_temperature_ratio
                .unwrap_or(base.max_temperature_ratio),
            rotate_p: self.rotate_p.unwrap_or(base.rotate_p),
            min_angle: self.min_angle.unwrap_or(base.min_angle),
            max_angle: self.max_angle.unwrap_or(base.max_angle),
            blur_p: self.blur_p.unwrap_or(base.blur_p),
            min_pixel_radius: self.min_pixel_radius.unwrap_or(base.min_pixel_radius),
            max_pixel_radius: self.max_pixel_radius.unwrap_or(base.max_pixel_radius),
            offset_p: self.offset_p.unwrap_or(base.offset_p),
            min_x_offset: self.min_x_offset.unwrap_or(base.min_x_offset),
            max_x_offset: self.max_x_offset.unwrap_or(base.max_x_offset),
            min_y_offset: self.min_y_offset.unwrap_or(base.min_y_offset),
            max_y_offset: self.max_y_offset.unwrap_or(base.max_y_offset),
            crop_p: self.crop_p.unwrap_or(base.crop_p),
            min_x_crop: self.min_x_crop.unwrap_or(base.min_x_crop),
            max_x_crop: self.max_x_crop.unwrap_or(base.max_x_crop),
            min_y_crop: self.min_y_crop.unwrap_or(base.min_y_crop),
            max_y_crop: self.max_y_crop.unwrap_or(base.max_y_crop),
        };
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<AuImageConfigBuilder> for AuImageConfig {
    type Error = AuError;

    fn try_from(builder: AuImageConfigBuilder) -> Result<Self> {
        builder.build()
    }
}
