use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::pco_image::common::error::{PcoError, Result};
use crate::pco_image::image::types::PixelBuffer;
use crate::pco_image::tiff::types::{EncodeConfig, TiffCompression};

/// Writes a pixel buffer to `path` as a Gray16 TIFF.
pub fn encode_frame(path: &Path, buffer: &PixelBuffer, config: &EncodeConfig) -> Result<()> {
    let data = buffer.as_u16().ok_or_else(|| {
        PcoError::Encode("only 16-bit pixel buffers can be written as TIFF".to_string())
    })?;
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        "encoding TIFF image"
    );

    let compression = match config.compression {
        TiffCompression::None => tiff::encoder::Compression::Uncompressed,
        TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
        TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(
            tiff::encoder::compression::DeflateLevel::Fast,
        ),
        TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(
            tiff::encoder::compression::DeflateLevel::Balanced,
        ),
        TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(
            tiff::encoder::compression::DeflateLevel::Best,
        ),
    };

    let file =
        File::create(path).map_err(|e| PcoError::Encode(format!("{}: {e}", path.display())))?;
    let mut encoder = tiff::encoder::TiffEncoder::new(file)
        .map_err(|e| PcoError::Encode(e.to_string()))?
        .with_compression(compression);

    if let Some(predictor_val) = config.predictor {
        let predictor = match predictor_val {
            2 => tiff::tags::Predictor::Horizontal,
            _ => tiff::tags::Predictor::None,
        };
        encoder = encoder.with_predictor(predictor);
    }

    encoder
        .write_image::<tiff::encoder::colortype::Gray16>(
            buffer.width() as u32,
            buffer.height() as u32,
            data,
        )
        .map_err(|e| PcoError::Encode(e.to_string()))?;

    debug!("TIFF encoding complete");
    Ok(())
}
