use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, info, instrument};

use crate::pco_image::b16;
use crate::pco_image::common::error::{PcoError, Result};
use crate::pco_image::image::source::ImageSource;
use crate::pco_image::image::types::{PixelBuffer, StampConfig};
use crate::pco_image::stamp::{self, types::ImageStamp};
use crate::pco_image::tiff;
use crate::pco_image::tiff::types::EncodeConfig;

/// Lazily-loaded handle to a PCO image.
///
/// Construction does no I/O beyond checking that the file exists. The pixel
/// buffer is loaded on first access and cached; the stamp is decoded on
/// first access and cached independently. A cached stamp stays valid until
/// it is explicitly decoded again, even across [`PcoImage::reload`]; the
/// two caches are deliberately asymmetric.
#[derive(Debug, Clone)]
pub struct PcoImage {
    source: ImageSource,
    config: StampConfig,
    buffer: Option<PixelBuffer>,
    stamp: Option<ImageStamp>,
}

impl PcoImage {
    /// Opens an image, inferring the format from the file extension.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_config(path, StampConfig::default())
    }

    /// Opens an image with an explicit stamp configuration.
    pub fn with_config<P: AsRef<Path>>(path: P, config: StampConfig) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PcoError::SourceNotFound(path.to_path_buf()));
        }
        Ok(Self::from_source(ImageSource::from_path(path)?, config))
    }

    /// Opens a b16 image regardless of its file extension.
    pub fn from_b16<P: AsRef<Path>>(path: P, config: StampConfig) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PcoError::SourceNotFound(path.to_path_buf()));
        }
        Ok(Self::from_source(
            ImageSource::B16 {
                path: path.to_path_buf(),
            },
            config,
        ))
    }

    /// Opens a TIFF image regardless of its file extension.
    pub fn from_tiff<P: AsRef<Path>>(path: P, config: StampConfig) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PcoError::SourceNotFound(path.to_path_buf()));
        }
        Ok(Self::from_source(
            ImageSource::Tiff {
                path: path.to_path_buf(),
            },
            config,
        ))
    }

    /// Wraps an already-loaded buffer; there is no backing file.
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self::from_buffer_with_config(buffer, StampConfig::default())
    }

    pub fn from_buffer_with_config(buffer: PixelBuffer, config: StampConfig) -> Self {
        Self {
            source: ImageSource::Memory,
            config,
            buffer: Some(buffer),
            stamp: None,
        }
    }

    fn from_source(source: ImageSource, config: StampConfig) -> Self {
        Self {
            source,
            config,
            buffer: None,
            stamp: None,
        }
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn config(&self) -> &StampConfig {
        &self.config
    }

    /// The full frame, loaded through the format codec on first call and
    /// cached afterwards.
    pub fn pixel_buffer(&mut self) -> Result<&PixelBuffer> {
        let buffer = match self.buffer.take() {
            Some(buffer) => buffer,
            None => self.load_frame()?,
        };
        Ok(self.buffer.insert(buffer))
    }

    /// Replaces the cached buffer, e.g. after external processing.
    pub fn set_pixel_buffer(&mut self, buffer: PixelBuffer) {
        self.buffer = Some(buffer);
    }

    /// Drops the cached pixel buffer so the next access reloads from disk.
    ///
    /// The cached stamp is kept: if the file may have changed, decode the
    /// stamp again on a fresh handle.
    pub fn reload(&mut self) {
        self.buffer = None;
    }

    fn load_frame(&self) -> Result<PixelBuffer> {
        match &self.source {
            ImageSource::B16 { path } => b16::decode_frame(path),
            ImageSource::Tiff { path } => tiff::decode_frame(path),
            ImageSource::Memory => Err(PcoError::UnsupportedOperation(
                "in-memory image has no backing file to load from".to_string(),
            )),
        }
    }

    /// The first `n` pixels in row-major order, avoiding a full-frame read
    /// where the format allows it.
    ///
    /// A cached buffer is sliced directly. For b16 sources with enhanced
    /// reading enabled only `header + n*2` bytes leave the disk; everything
    /// else falls back to a full decode plus slice.
    #[instrument(skip(self, resolver))]
    pub fn first_pixels(
        &mut self,
        n: usize,
        resolver: &mut b16::HeaderSizeResolver,
    ) -> Result<Vec<u16>> {
        if let Some(buffer) = &self.buffer {
            return buffer.first_pixels(n);
        }

        let partial_path = match &self.source {
            ImageSource::B16 { path } if self.config.enhanced_reading => Some(path.clone()),
            _ => None,
        };
        match partial_path {
            Some(path) => {
                debug!(n, "partial b16 read");
                b16::read_first_pixels(&path, n, resolver)
            }
            None => self.pixel_buffer()?.first_pixels(n),
        }
    }

    /// The embedded stamp, decoded from the leading pixels on first call
    /// and cached afterwards. Index and timestamp come out of the same
    /// decode, so both are cached together.
    pub fn stamp(&mut self, resolver: &mut b16::HeaderSizeResolver) -> Result<&ImageStamp> {
        let stamp = match self.stamp.take() {
            Some(stamp) => stamp,
            None => {
                let pixels = self.first_pixels(self.config.n_pixels, resolver)?;
                let stamp = stamp::decode_stamp(&pixels, self.config.shift_mode, self.config.mode)?;
                info!(?stamp, "decoded image stamp");
                stamp
            }
        };
        Ok(self.stamp.insert(stamp))
    }

    /// The frame index; only available in parsed stamp mode.
    pub fn index(&mut self, resolver: &mut b16::HeaderSizeResolver) -> Result<u32> {
        match self.stamp(resolver)? {
            ImageStamp::Parsed { index, .. } => Ok(*index),
            ImageStamp::Raw { .. } => Err(PcoError::UnsupportedOperation(
                "integer index is only available in parsed stamp mode; use stamp()".to_string(),
            )),
        }
    }

    /// The acquisition time; only available in parsed stamp mode.
    pub fn timestamp(&mut self, resolver: &mut b16::HeaderSizeResolver) -> Result<NaiveDateTime> {
        match self.stamp(resolver)? {
            ImageStamp::Parsed { timestamp, .. } => Ok(*timestamp),
            ImageStamp::Raw { .. } => Err(PcoError::UnsupportedOperation(
                "parsed timestamp is only available in parsed stamp mode; use stamp()".to_string(),
            )),
        }
    }

    /// The b16 preamble fields. Only b16 sources have one.
    pub fn header_info(&self) -> Result<b16::B16Header> {
        match &self.source {
            ImageSource::B16 { path } => b16::read_header(path),
            _ => Err(PcoError::UnsupportedOperation(
                "header info is only available for b16 images".to_string(),
            )),
        }
    }

    /// Writes the current buffer through the TIFF codec.
    pub fn write_tiff<P: AsRef<Path>>(&mut self, path: P, config: &EncodeConfig) -> Result<()> {
        let buffer = self.pixel_buffer()?;
        tiff::encode_frame(path.as_ref(), buffer, config)
    }
}
