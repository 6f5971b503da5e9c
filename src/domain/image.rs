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

//! # Image Domain Module
//!
//! Image adapter backed by `image::DynamicImage`.
//!
//! ## Registered Operations
//!
//! In declaration order: `mirror`, `flip`, `color_change`,
//! `color_temperature`, `rotate`, `blur`, `offset`, `crop`.
//!
//! `color_change` picks sepia or grayscale with equal odds and records the
//! pick as the `filter` parameter.

use std::path::Path;
use std::sync::Arc;

use ::image::{DynamicImage, GenericImageView};
use rand::{Rng, RngCore};

use crate::domain::AuMediaType;
use crate::errors::{AuError, Result};
use crate::operation::{AuAugmentable, AuInvocation, AuParamValue};
use crate::registry::{AuRegisteredOperation, AuRegistry, AuStaticRegistry};

pub mod config;
pub mod primitives;

pub use config::{AuImageConfig, AuImageConfigBuilder};

/// Image media object.
#[derive(Debug, Clone)]
pub struct AuImage {
    image: DynamicImage,
    config: Arc<AuImageConfig>,
}

impl AuImage {
    pub fn new(image: DynamicImage, config: Arc<AuImageConfig>) -> Self {
        AuImage { image, config }
    }

    /// Decodes any raster format supported by the `image` crate.
    pub fn load(path: impl AsRef<Path>, config: Arc<AuImageConfig>) -> Result<Self> {
        let path = path.as_ref();
        let image = ::image::open(path)
            .map_err(|e| AuError::load(path.display().to_string(), e.to_string()))?;
        log::debug!(
            "loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(AuImage::new(image, config))
    }

    /// Encodes the current image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.image
            .save(path)
            .map_err(|e| AuError::save(path.display().to_string(), e.to_string()))
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    pub fn config(&self) -> &AuImageConfig {
        &self.config
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn replace_with<F>(&mut self, transform: F) -> Result<()>
    where
        F: FnOnce(&DynamicImage) -> Result<DynamicImage>,
    {
        self.image = transform(&self.image)?;
        Ok(())
    }
}

static IMAGE_OPERATIONS: AuStaticRegistry<AuImage> = AuStaticRegistry::new(register_operations);

/// Registry of the image operations.
pub fn registry() -> Result<&'static AuRegistry<AuImage>> {
    IMAGE_OPERATIONS.get()
}

impl AuAugmentable for AuImage {
    const MEDIA_TYPE: AuMediaType = AuMediaType::Image;

    fn operations(&self) -> Result<&'static [AuRegisteredOperation<Self>]> {
        registry()?.owned_operations(Self::MEDIA_TYPE)
    }
}

fn register_operations() -> Result<AuRegistry<AuImage>> {
    let tag = AuMediaType::Image;
    let mut registry = AuRegistry::new(tag);
    registry.register(tag, "mirror", mirror)?;
    registry.register(tag, "flip", flip)?;
    registry.register(tag, "color_change", color_change)?;
    registry.register(tag, "color_temperature", color_temperature)?;
    registry.register(tag, "rotate", rotate)?;
    registry.register(tag, "blur", blur)?;
    registry.register(tag, "offset", offset)?;
    registry.register(tag, "crop", crop)?;
    Ok(registry)
}

fn mirror(image: &mut AuImage, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let invocation = AuInvocation::gate(image.config.mirror(), rng);
    if invocation.fired() {
        image.replace_with(primitives::mirror)?;
    }
    Ok(invocation)
}

fn flip(image: &mut AuImage, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let invocation = AuInvocation::gate(image.config.flip(), rng);
    if invocation.fired() {
        image.replace_with(primitives::flip)?;
    }
    Ok(invocation)
}

fn color_change(image: &mut AuImage, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(image.config.color(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    if rng.gen_bool(0.5) {
        invocation.record("filter", AuParamValue::Choice("sepia"));
        image.replace_with(primitives::sepia)?;
    } else {
        invocation.record("filter", AuParamValue::Choice("grayscale"));
        image.replace_with(primitives::grayscale)?;
    }
    Ok(invocation)
}

fn color_temperature(image: &mut AuImage, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(image.config.temperature(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let ratio = image.config.temperature_ratio().sample(rng);
    invocation.record("ratio", AuParamValue::Int(ratio as i64));
    image.replace_with(|img| primitives::color_temperature(img, ratio))?;
    Ok(invocation)
}

fn rotate(image: &mut AuImage, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(image.config.rotate(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let angle = image.config.angle().sample(rng);
    invocation.record("angle", AuParamValue::Int(angle as i64));
    image.replace_with(|img| primitives::rotate(img, angle))?;
    Ok(invocation)
}

fn blur(image: &mut AuImage, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(image.config.blur(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let radius = image.config.pixel_radius().sample(rng);
    invocation.record("radius", AuParamValue::Int(radius as i64));
    image.replace_with(|img| primitives::box_blur(img, radius))?;
    Ok(invocation)
}

fn offset(image: &mut AuImage, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(image.config.offset(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let x_fraction = image.config.x_offset().sample(rng);
    let y_fraction = image.config.y_offset().sample(rng);
    invocation.record("x_offset", AuParamValue::Float(x_fraction));
    invocation.record("y_offset", AuParamValue::Float(y_fraction));

    let (width, height) = image.dimensions();
    let dx = (x_fraction * width as f64).trunc() as i64;
    let dy = (y_fraction * height as f64).trunc() as i64;
    image.replace_with(|img| primitives::offset(img, dx, dy))?;
    Ok(invocation)
}

fn crop(image: &mut AuImage, rng: &mut dyn RngCore) -> Result<AuInvocation> {
    let mut invocation = AuInvocation::gate(image.config.crop(), rng);
    if !invocation.fired() {
        return Ok(invocation);
    }
    let x_fraction = image.config.x_crop().sample(rng);
    let y_fraction = image.config.y_crop().sample(rng);
    invocation.record("x_crop", AuParamValue::Float(x_fraction));
    invocation.record("y_crop", AuParamValue::Float(y_fraction));

    let (width, height) = image.dimensions();
    let crop_width = crop_extent(width, x_fraction);
    let crop_height = crop_extent(height, y_fraction);
    let x = rng.gen_range(0..=width.saturating_sub(crop_width));
    let y = rng.gen_range(0..=height.saturating_sub(crop_height));
    invocation.record("x", AuParamValue::Int(x as i64));
    invocation.record("y", AuParamValue::Int(y as i64));

    image.replace_with(|img| primitives::crop(img, x, y, crop_width, crop_height))?;
    Ok(invocation)
}

/// Kept extent along one axis, at least one pixel for a non-empty image.
fn crop_extent(extent: u32, fraction: f64) -> u32 {
    let kept = (extent as f64 * fraction).floor() as u32;
    kept.clamp(extent.min(1), extent)
}
