//! Pixel buffer and stamp configuration types

use crate::pco_image::common::error::{PcoError, Result};
use crate::pco_image::stamp::types::StampMode;

/// Number of leading pixels that carry the stamp on tested PCO cameras.
pub const DEFAULT_N_PIXELS: usize = 14;

/// Pixel samples of one frame, flattened in row-major order.
///
/// Frames come off disk as unsigned 16-bit; elementwise arithmetic promotes
/// to `f64` so that division keeps IEEE semantics instead of erroring.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    U16(Vec<u16>),
    F64(Vec<f64>),
}

/// Decoded frame pixels with their dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: PixelData,
}

impl PixelBuffer {
    pub fn from_u16(width: usize, height: usize, data: Vec<u16>) -> Self {
        Self {
            width,
            height,
            data: PixelData::U16(data),
        }
    }

    pub fn from_f64(width: usize, height: usize, data: Vec<f64>) -> Self {
        Self {
            width,
            height,
            data: PixelData::F64(data),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        match &self.data {
            PixelData::U16(data) => data.len(),
            PixelData::F64(data) => data.len(),
        }
    }

    pub fn data(&self) -> &PixelData {
        &self.data
    }

    pub fn as_u16(&self) -> Option<&[u16]> {
        match &self.data {
            PixelData::U16(data) => Some(data),
            PixelData::F64(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<&[f64]> {
        match &self.data {
            PixelData::U16(_) => None,
            PixelData::F64(data) => Some(data),
        }
    }

    /// All samples widened to `f64`, for elementwise arithmetic.
    pub fn to_f64(&self) -> Vec<f64> {
        match &self.data {
            PixelData::U16(data) => data.iter().map(|&v| f64::from(v)).collect(),
            PixelData::F64(data) => data.clone(),
        }
    }

    /// The first `n` pixels in row-major order, as stamp decoding needs
    /// them. Derived floating-point buffers carry no stamp and refuse.
    pub fn first_pixels(&self, n: usize) -> Result<Vec<u16>> {
        match &self.data {
            PixelData::U16(data) => {
                if data.len() < n {
                    return Err(PcoError::Decode(format!(
                        "buffer holds {} pixels, {n} requested",
                        data.len()
                    )));
                }
                Ok(data[..n].to_vec())
            }
            PixelData::F64(_) => Err(PcoError::UnsupportedOperation(
                "stamp pixels require 16-bit data; derived floating-point buffers have no timestamp".to_string(),
            )),
        }
    }
}

/// Configuration for reading the embedded stamp.
#[derive(Debug, Clone)]
pub struct StampConfig {
    /// Number of leading pixels scanned for the stamp.
    pub n_pixels: usize,
    /// Whether pixels are 14-bit values stored left-shifted by 2 bits in
    /// 16-bit containers, as CamWare writes them.
    pub shift_mode: bool,
    /// Parsed date-time or raw digit strings.
    pub mode: StampMode,
    /// Read only the stamp pixels from b16 files instead of the full frame.
    pub enhanced_reading: bool,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            n_pixels: DEFAULT_N_PIXELS,
            shift_mode: true,
            mode: StampMode::Parsed,
            enhanced_reading: true,
        }
    }
}

impl StampConfig {
    pub fn builder() -> StampConfigBuilder {
        StampConfigBuilder::default()
    }
}

/// Builder for StampConfig
#[derive(Default)]
pub struct StampConfigBuilder {
    n_pixels: Option<usize>,
    shift_mode: Option<bool>,
    mode: Option<StampMode>,
    enhanced_reading: Option<bool>,
}

impl StampConfigBuilder {
    pub fn n_pixels(mut self, n_pixels: usize) -> Self {
        self.n_pixels = Some(n_pixels);
        self
    }

    pub fn shift_mode(mut self, shift_mode: bool) -> Self {
        self.shift_mode = Some(shift_mode);
        self
    }

    pub fn mode(mut self, mode: StampMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn enhanced_reading(mut self, enhanced: bool) -> Self {
        self.enhanced_reading = Some(enhanced);
        self
    }

    pub fn build(self) -> StampConfig {
        let default = StampConfig::default();
        StampConfig {
            n_pixels: self.n_pixels.unwrap_or(default.n_pixels),
            shift_mode: self.shift_mode.unwrap_or(default.shift_mode),
            mode: self.mode.unwrap_or(default.mode),
            enhanced_reading: self.enhanced_reading.unwrap_or(default.enhanced_reading),
        }
    }
}
