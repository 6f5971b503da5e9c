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

use std::sync::Arc;

use august::{AuError, AuExecutor, AuImage, AuImageConfig, AuImageConfigBuilder, AuParamValue};
use image::{ColorType, DynamicImage, GenericImageView, ImageBuffer, Rgb, RgbImage};

fn checkerboard(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        if (x / 10 + y / 10) % 2 == 0 {
            Rgb([200, 120, 40])
        } else {
            Rgb([20, 60, 220])
        }
    }))
}

fn silent() -> AuImageConfigBuilder {
    AuImageConfigBuilder::with_all_probabilities(0.0)
}

#[test]
fn test_crop_scenario() {
    let config = AuImageConfigBuilder {
        crop_p: Some(1.0),
        min_x_crop: Some(0.5),
        max_x_crop: Some(0.5),
        min_y_crop: Some(0.5),
        max_y_crop: Some(0.5),
        ..silent()
    }
    .build()
    .unwrap();

    let mut executor = AuExecutor::seeded(3);
    for _ in 0..20 {
        let mut image = AuImage::new(checkerboard(100, 100), Arc::new(config.clone()));
        let trace = executor.augment_traced(&mut image).unwrap();
        assert_eq!(image.dimensions(), (50, 50));
        assert_eq!(trace.fired(), vec!["crop"]);

        let crop = trace.invocation("crop").unwrap();
        let x = crop.param("x").and_then(AuParamValue::as_i64).unwrap();
        let y = crop.param("y").and_then(AuParamValue::as_i64).unwrap();
        assert!((0..=50).contains(&x) && (0..=50).contains(&y));
    }
}

#[test]
fn test_crop_dimensions_stay_in_range() {
    let config = Arc::new(
        AuImageConfigBuilder {
            crop_p: Some(1.0),
            ..silent()
        }
        .build()
        .unwrap(),
    );
    let mut executor = AuExecutor::seeded(17);
    for _ in 0..200 {
        let mut image = AuImage::new(checkerboard(80, 40), config.clone());
        executor.augment(&mut image).unwrap();
        let (w, h) = image.dimensions();
        assert!((48..=72).contains(&w), "width {w}");
        assert!((24..=36).contains(&h), "height {h}");
    }
}

#[test]
fn test_failed_crop_leaves_image_untouched() {
    let config = Arc::new(
        AuImageConfigBuilder {
            crop_p: Some(1.0),
            ..silent()
        }
        .build()
        .unwrap(),
    );
    let mut executor = AuExecutor::seeded(29);
    for _ in 0..20 {
        let mut image = AuImage::new(DynamicImage::new_rgb8(0, 0), config.clone());
        let err = executor.augment(&mut image).unwrap_err();
        assert!(matches!(err, AuError::ImageTransform { .. }), "{err:?}");
        assert_eq!(image.image(), &DynamicImage::new_rgb8(0, 0));
    }
}

#[test]
fn test_pixel_operations_keep_sixteen_bit_images() {
    let config = Arc::new(
        AuImageConfigBuilder {
            crop_p: Some(0.0),
            ..AuImageConfigBuilder::with_all_probabilities(1.0)
        }
        .build()
        .unwrap(),
    );
    let source = DynamicImage::ImageRgb16(ImageBuffer::from_fn(24, 16, |x, y| {
        Rgb([(x * 2000) as u16, (y * 3000) as u16, 50_000])
    }));
    let mut executor = AuExecutor::seeded(77);
    for _ in 0..50 {
        let mut image = AuImage::new(source.clone(), config.clone());
        let trace = executor.augment_traced(&mut image).unwrap();
        let filter = trace
            .invocation("color_change")
            .and_then(|inv| inv.param("filter"));
        let expected = if filter == Some(&AuParamValue::Choice("grayscale")) {
            ColorType::L16
        } else {
            ColorType::Rgb16
        };
        assert_eq!(image.image().color(), expected);
        assert_eq!(image.dimensions(), (24, 16));
    }
}

#[test]
fn test_zero_probabilities_leave_image_untouched() {
    let config = Arc::new(silent().build().unwrap());
    let mut executor = AuExecutor::seeded(0);
    for _ in 0..100 {
        let mut image = AuImage::new(checkerboard(30, 20), config.clone());
        executor.augment(&mut image).unwrap();
        assert_eq!(image.image(), &checkerboard(30, 20));
    }
}

#[test]
fn test_mirror_and_flip_compose() {
    let config = AuImageConfigBuilder {
        mirror_p: Some(1.0),
        flip_p: Some(1.0),
        ..silent()
    }
    .build()
    .unwrap();
    let source = checkerboard(37, 23);
    let mut image = AuImage::new(source.clone(), Arc::new(config));
    AuExecutor::seeded(12).augment(&mut image).unwrap();

    assert_eq!(image.image(), &source.rotate180());
}

#[test]
fn test_sampled_parameters_stay_in_range() {
    let config = Arc::new(
        AuImageConfigBuilder::with_all_probabilities(1.0)
            .build()
            .unwrap(),
    );
    let mut executor = AuExecutor::seeded(1000);
    for _ in 0..1000 {
        let mut image = AuImage::new(checkerboard(12, 12), config.clone());
        let trace = executor.augment_traced(&mut image).unwrap();
        let param = |op: &str, name: &str| {
            trace
                .invocation(op)
                .and_then(|inv| inv.param(name))
                .cloned()
                .unwrap()
        };

        let ratio = param("color_temperature", "ratio").as_i64().unwrap() as i32;
        assert!(config.temperature_ratio().contains(ratio));
        let angle = param("rotate", "angle").as_i64().unwrap() as i32;
        assert!(config.angle().contains(angle));
        let radius = param("blur", "radius").as_i64().unwrap() as u32;
        assert!(config.pixel_radius().contains(radius));
        assert!(config
            .x_offset()
            .contains(param("offset", "x_offset").as_f64().unwrap()));
        assert!(config
            .y_crop()
            .contains(param("crop", "y_crop").as_f64().unwrap()));

        let filter = param("color_change", "filter");
        assert!(
            filter == AuParamValue::Choice("sepia") || filter == AuParamValue::Choice("grayscale")
        );
    }
}

#[test]
fn test_image_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.png");
    let config = Arc::new(AuImageConfig::default());

    let image = AuImage::new(checkerboard(16, 8), config.clone());
    image.save(&path).unwrap();
    let loaded = AuImage::load(&path, config).unwrap();

    assert_eq!(loaded.dimensions(), (16, 8));
    assert_eq!(loaded.image().to_rgb8(), checkerboard(16, 8).to_rgb8());
}

#[test]
fn test_unreadable_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not an image").unwrap();
    let err = AuImage::load(&path, Arc::new(AuImageConfig::default())).unwrap_err();
    assert!(matches!(err, AuError::Load { .. }));
}

#[test]
fn test_unknown_extension_is_a_save_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.unknown");
    let image = AuImage::new(checkerboard(4, 4), Arc::new(AuImageConfig::default()));
    assert!(matches!(image.save(&path), Err(AuError::Save { .. })));
}
