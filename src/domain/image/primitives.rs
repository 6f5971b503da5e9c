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

//! # Image Transform Primitives
//!
//! Pure image-in/image-out routines built on `image` and `imageproc`.
//!
//! Pixel-level routines work on a 32-bit float RGBA copy with channels in
//! `[0, 1]` and convert the result back to the color type of their input.
//! A grayscale image stays grayscale, an RGB image never gains an alpha
//! channel, and 16-bit or float images keep their depth.

use ::image::{DynamicImage, GenericImageView, Rgba, Rgba32FImage};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};

use crate::errors::{AuError, Result};

pub fn mirror(image: &DynamicImage) -> Result<DynamicImage> {
    Ok(image.fliph())
}

pub fn flip(image: &DynamicImage) -> Result<DynamicImage> {
    Ok(image.flipv())
}

/// Classic sepia tone matrix, saturating at full intensity.
pub fn sepia(image: &DynamicImage) -> Result<DynamicImage> {
    let mut working = image.to_rgba32f();
    for pixel in working.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let tr = r * 0.393 + g * 0.769 + b * 0.189;
        let tg = r * 0.349 + g * 0.686 + b * 0.168;
        let tb = r * 0.272 + g * 0.534 + b * 0.131;
        *pixel = Rgba([saturate(tr), saturate(tg), saturate(tb), a]);
    }
    Ok(restore_color(image, working))
}

pub fn grayscale(image: &DynamicImage) -> Result<DynamicImage> {
    Ok(image.grayscale())
}

/// Warms (positive `ratio`) or cools the image by adding `ratio` to the
/// red channel and subtracting it from the blue channel. `ratio` is on the
/// 8-bit scale and is rescaled for deeper images.
pub fn color_temperature(image: &DynamicImage, ratio: i32) -> Result<DynamicImage> {
    if ratio == 0 {
        return Ok(image.clone());
    }
    let shift = ratio as f32 / 255.0;
    let mut working = image.to_rgba32f();
    for pixel in working.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        *pixel = Rgba([saturate(r + shift), g, saturate(b - shift), a]);
    }
    Ok(restore_color(image, working))
}

/// Rotates counter-clockwise by `degrees` about the center. The canvas size
/// is kept and uncovered pixels are black.
pub fn rotate(image: &DynamicImage, degrees: i32) -> Result<DynamicImage> {
    if degrees % 360 == 0 {
        return Ok(image.clone());
    }
    let theta = -(degrees as f32).to_radians();
    let working = image.to_rgba32f();
    let rotated = rotate_about_center(
        &working,
        theta,
        Interpolation::Bilinear,
        Rgba([0.0, 0.0, 0.0, 0.0]),
    );
    Ok(restore_color(image, rotated))
}

/// Box blur with a square kernel of side `2 * radius + 1`, edges clamped.
pub fn box_blur(image: &DynamicImage, radius: u32) -> Result<DynamicImage> {
    let (width, height) = image.dimensions();
    if radius == 0 || width == 0 || height == 0 {
        return Ok(image.clone());
    }
    let source = image.to_rgba32f();
    let horizontal = blur_pass(&source, radius as i64, true);
    let blurred = blur_pass(&horizontal, radius as i64, false);
    Ok(restore_color(image, blurred))
}

/// Rolls the image by `dx` columns and `dy` rows, wrapping pixels that leave
/// one edge back in at the opposite edge.
pub fn offset(image: &DynamicImage, dx: i64, dy: i64) -> Result<DynamicImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Ok(image.clone());
    }
    let source = image.to_rgba32f();
    let rolled = Rgba32FImage::from_fn(width, height, |x, y| {
        let sx = (x as i64 - dx).rem_euclid(width as i64) as u32;
        let sy = (y as i64 - dy).rem_euclid(height as i64) as u32;
        *source.get_pixel(sx, sy)
    });
    Ok(restore_color(image, rolled))
}

/// Cuts the `width` x `height` window whose top-left corner is `(x, y)`.
pub fn crop(image: &DynamicImage, x: u32, y: u32, width: u32, height: u32) -> Result<DynamicImage> {
    let (image_width, image_height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AuError::image_transform(
            "crop",
            format!("crop window {}x{} is empty", width, height),
        ));
    }
    let fits_x = x.checked_add(width).map_or(false, |end| end <= image_width);
    let fits_y = y.checked_add(height).map_or(false, |end| end <= image_height);
    if !fits_x || !fits_y {
        return Err(AuError::image_transform(
            "crop",
            format!(
                "window {}x{} at ({}, {}) exceeds image {}x{}",
                width, height, x, y, image_width, image_height
            ),
        ));
    }
    Ok(image.crop_imm(x, y, width, height))
}

fn saturate(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

fn blur_pass(source: &Rgba32FImage, radius: i64, horizontal: bool) -> Rgba32FImage {
    let (width, height) = source.dimensions();
    let span = (2 * radius + 1) as f32;
    Rgba32FImage::from_fn(width, height, |x, y| {
        let mut sums = [0f32; 4];
        for k in -radius..=radius {
            let (sx, sy) = if horizontal {
                ((x as i64 + k).clamp(0, width as i64 - 1) as u32, y)
            } else {
                (x, (y as i64 + k).clamp(0, height as i64 - 1) as u32)
            };
            let pixel = source.get_pixel(sx, sy);
            for (sum, channel) in sums.iter_mut().zip(pixel.0.iter()) {
                *sum += *channel;
            }
        }
        Rgba(sums.map(|sum| sum / span))
    })
}

fn restore_color(original: &DynamicImage, working: Rgba32FImage) -> DynamicImage {
    let result = DynamicImage::ImageRgba32F(working);
    match original {
        DynamicImage::ImageLuma8(_) => DynamicImage::ImageLuma8(result.to_luma8()),
        DynamicImage::ImageLumaA8(_) => DynamicImage::ImageLumaA8(result.to_luma_alpha8()),
        DynamicImage::ImageRgb8(_) => DynamicImage::ImageRgb8(result.to_rgb8()),
        DynamicImage::ImageRgba8(_) => DynamicImage::ImageRgba8(result.to_rgba8()),
        DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma16(result.to_luma16()),
        DynamicImage::ImageLumaA16(_) => DynamicImage::ImageLumaA16(result.to_luma_alpha16()),
        DynamicImage::ImageRgb16(_) => DynamicImage::ImageRgb16(result.to_rgb16()),
        DynamicImage::ImageRgba16(_) => DynamicImage::ImageRgba16(result.to_rgba16()),
        DynamicImage::ImageRgb32F(_) => DynamicImage::ImageRgb32F(result.to_rgb32f()),
        _ => result,
    }
}
