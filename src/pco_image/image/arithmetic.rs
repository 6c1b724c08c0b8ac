//! Elementwise arithmetic on image handles.
//!
//! Each operation loads both operands if needed, computes eagerly, and
//! returns a fresh in-memory handle whose stamp is unset, since a derived
//! image has no timestamp of its own. All math runs in `f64`, so dividing by a
//! zero pixel yields `inf`/`NaN` rather than an error.

use crate::pco_image::common::error::{PcoError, Result};
use crate::pco_image::image::handle::PcoImage;
use crate::pco_image::image::types::PixelBuffer;

pub fn add(a: &mut PcoImage, b: &mut PcoImage) -> Result<PcoImage> {
    combine(a, b, |x, y| x + y)
}

pub fn sub(a: &mut PcoImage, b: &mut PcoImage) -> Result<PcoImage> {
    combine(a, b, |x, y| x - y)
}

pub fn mul(a: &mut PcoImage, b: &mut PcoImage) -> Result<PcoImage> {
    combine(a, b, |x, y| x * y)
}

pub fn div(a: &mut PcoImage, b: &mut PcoImage) -> Result<PcoImage> {
    combine(a, b, |x, y| x / y)
}

pub fn add_scalar(a: &mut PcoImage, k: f64) -> Result<PcoImage> {
    apply(a, |x| x + k)
}

pub fn sub_scalar(a: &mut PcoImage, k: f64) -> Result<PcoImage> {
    apply(a, |x| x - k)
}

/// Multiplies every pixel by `k`.
pub fn scale(a: &mut PcoImage, k: f64) -> Result<PcoImage> {
    apply(a, |x| x * k)
}

pub fn div_scalar(a: &mut PcoImage, k: f64) -> Result<PcoImage> {
    apply(a, |x| x / k)
}

fn combine(
    a: &mut PcoImage,
    b: &mut PcoImage,
    op: impl Fn(f64, f64) -> f64,
) -> Result<PcoImage> {
    let config = a.config().clone();
    let lhs = a.pixel_buffer()?.clone();
    let rhs = b.pixel_buffer()?;

    if lhs.width() != rhs.width() || lhs.height() != rhs.height() {
        return Err(PcoError::UnsupportedOperation(format!(
            "shape mismatch: {}x{} vs {}x{}",
            lhs.width(),
            lhs.height(),
            rhs.width(),
            rhs.height()
        )));
    }

    let data: Vec<f64> = lhs
        .to_f64()
        .into_iter()
        .zip(rhs.to_f64())
        .map(|(x, y)| op(x, y))
        .collect();
    let buffer = PixelBuffer::from_f64(lhs.width(), lhs.height(), data);
    Ok(PcoImage::from_buffer_with_config(buffer, config))
}

fn apply(a: &mut PcoImage, op: impl Fn(f64) -> f64) -> Result<PcoImage> {
    let config = a.config().clone();
    let lhs = a.pixel_buffer()?;

    let data: Vec<f64> = lhs.to_f64().into_iter().map(op).collect();
    let buffer = PixelBuffer::from_f64(lhs.width(), lhs.height(), data);
    Ok(PcoImage::from_buffer_with_config(buffer, config))
}
