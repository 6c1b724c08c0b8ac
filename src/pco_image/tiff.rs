//! TIFF codec module
//!
//! Full-frame codec collaborator for encoded images: reads PCO-exported
//! TIFF files into pixel buffers and writes buffers back out as Gray16
//! TIFF with optional compression.

mod reader;
pub mod types;
mod writer;

pub use reader::decode_frame;
pub use types::{EncodeConfig, EncodeConfigBuilder, TiffCompression};
pub use writer::encode_frame;
