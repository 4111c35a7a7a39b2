//! Raster primitives with exact area-averaging semantics
//!
//! The area filter weights every source pixel by the fraction of it covered by
//! the destination pixel, so shrinking a region to a single pixel yields the
//! arithmetic mean of that region. Enlarging degrades gracefully to a box filter.

use crate::io::error::{Result, ensure_extent, ensure_unit_interval, invalid_parameter};
use crate::math::color::Color;
use image::{Rgb, RgbImage, imageops};

/// Source pixels (with coverage weights) contributing to one destination pixel
#[derive(Debug, Clone)]
struct Coverage {
    weights: Vec<(u32, f64)>,
}

// Destination pixel o covers source interval [o * scale, (o + 1) * scale)
fn coverage(source: u32, target: u32) -> Vec<Coverage> {
    let scale = f64::from(source) / f64::from(target);

    (0..target)
        .map(|o| {
            let start = f64::from(o) * scale;
            let end = (f64::from(o) + 1.0) * scale;
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(source);

            let weights = (first..last)
                .filter_map(|i| {
                    let weight = end.min(f64::from(i) + 1.0) - start.max(f64::from(i));
                    (weight > 0.0).then_some((i, weight))
                })
                .collect();

            Coverage { weights }
        })
        .collect()
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Resize an image to exactly `width` x `height` with the area filter
///
/// # Errors
///
/// Returns `DegenerateSize` if the source or the requested size has a zero dimension
pub fn resize_area(image: &RgbImage, width: u32, height: u32) -> Result<RgbImage> {
    ensure_extent("source image", image.width(), image.height())?;
    ensure_extent("resize target", width, height)?;

    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    let columns = coverage(image.width(), width);
    let rows = coverage(image.height(), height);
    let mut output = RgbImage::new(width, height);

    for (y, row) in rows.iter().enumerate() {
        for (x, column) in columns.iter().enumerate() {
            let mut sums = [0.0_f64; 3];
            let mut total = 0.0_f64;

            for &(sy, wy) in &row.weights {
                for &(sx, wx) in &column.weights {
                    let weight = wx * wy;
                    let pixel = image.get_pixel(sx, sy);
                    for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                        *sum = weight.mul_add(f64::from(channel), *sum);
                    }
                    total += weight;
                }
            }

            if total > 0.0 {
                output.put_pixel(x as u32, y as u32, Rgb(sums.map(|s| to_channel(s / total))));
            }
        }
    }

    Ok(output)
}

/// Per-channel mean of all pixels, computed by area-resizing to one pixel
///
/// # Errors
///
/// Returns `DegenerateSize` for an empty image
pub fn mean_color(image: &RgbImage) -> Result<Color> {
    let single = resize_area(image, 1, 1)?;
    Ok(Color::from(*single.get_pixel(0, 0)))
}

/// Cut a centered `width` x `height` rectangle out of `image`
///
/// The rectangle is clamped to the image bounds and to at least one pixel.
pub fn crop_centered(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    let width = width.clamp(1, image.width().max(1));
    let height = height.clamp(1, image.height().max(1));
    let x = image.width().saturating_sub(width) / 2;
    let y = image.height().saturating_sub(height) / 2;

    imageops::crop_imm(image, x, y, width, height).to_image()
}

/// Alpha-blend `overlay` onto `base`: 0 keeps `base`, 1 yields `overlay`
///
/// # Errors
///
/// Returns `InvalidParameter` if `factor` lies outside [0, 1] or the
/// images differ in size
pub fn blend(base: &RgbImage, overlay: &RgbImage, factor: f64) -> Result<RgbImage> {
    let factor = ensure_unit_interval("blend", factor)?;

    if base.dimensions() != overlay.dimensions() {
        return Err(invalid_parameter(
            "overlay",
            &format!("{}x{}", overlay.width(), overlay.height()),
            &format!("must match base size {}x{}", base.width(), base.height()),
        ));
    }

    let mut output = base.clone();
    if factor <= 0.0 {
        return Ok(output);
    }

    for (dst, src) in output.pixels_mut().zip(overlay.pixels()) {
        for (d, &s) in dst.0.iter_mut().zip(src.0.iter()) {
            *d = to_channel(f64::from(*d).mul_add(1.0 - factor, f64::from(s) * factor));
        }
    }

    Ok(output)
}

/// Scale an image by `factor` with the area filter
///
/// The new size is the truncated product of each dimension and `factor`.
///
/// # Errors
///
/// Returns `InvalidParameter` for a non-positive or non-finite factor and
/// `DegenerateSize` if the scaled image would be empty
pub fn zoom(image: &RgbImage, factor: f64) -> Result<RgbImage> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(invalid_parameter(
            "zoom",
            &factor,
            &"must be a positive number",
        ));
    }

    let width = (f64::from(image.width()) * factor) as u32;
    let height = (f64::from(image.height()) * factor) as u32;
    ensure_extent("zoomed target", width, height)?;

    resize_area(image, width, height)
}

/// Image of the given size filled with one color
pub fn solid(width: u32, height: u32, color: Color) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb::from(color))
}
