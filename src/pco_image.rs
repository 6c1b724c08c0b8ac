//! PCO image access module
//!
//! This module decodes the binary timestamp PCO cameras embed in the leading
//! pixels of a frame and provides lazy access to the pixel data, with
//! separate modules for BCD stamp decoding, b16 reading, and the TIFF codec.

pub mod b16;
pub mod common;
pub mod image;
pub mod stamp;
pub mod tiff;


pub use common::{PcoError, Result};

pub use stamp::{ImageStamp, StampMode, decode_digit_pair, decode_stamp};

pub use b16::{B16Header, DEFAULT_HEADER_SIZE, HeaderSizeResolver};

pub use tiff::{EncodeConfig, EncodeConfigBuilder, TiffCompression};

pub use image::{
    ImageSource, PcoImage, PixelBuffer, PixelData, StampConfig, StampConfigBuilder,
};
