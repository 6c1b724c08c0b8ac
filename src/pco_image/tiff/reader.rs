use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::pco_image::common::error::{PcoError, Result};
use crate::pco_image::image::types::PixelBuffer;

/// Decodes a whole TIFF frame into a pixel buffer.
///
/// TIFF has no variable preamble to shortcut through, so this is the only
/// way to get at its pixels; stamp reads on TIFF sources always pay for the
/// full decode. Only single-channel images are accepted, since stacked
/// channels would shift the stamp pixels out of the leading positions.
pub fn decode_frame(path: &Path) -> Result<PixelBuffer> {
    let file =
        File::open(path).map_err(|e| PcoError::Decode(format!("{}: {e}", path.display())))?;
    let mut decoder =
        tiff::decoder::Decoder::new(file).map_err(|e| PcoError::Decode(e.to_string()))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| PcoError::Decode(e.to_string()))?;
    let image = decoder
        .read_image()
        .map_err(|e| PcoError::Decode(e.to_string()))?;

    let data: Vec<u16> = match image {
        tiff::decoder::DecodingResult::U16(data) => data,
        tiff::decoder::DecodingResult::U8(data) => data.into_iter().map(u16::from).collect(),
        _ => {
            return Err(PcoError::Decode(
                "unsupported TIFF sample format, expected 8- or 16-bit unsigned".to_string(),
            ));
        }
    };

    let (width, height) = (width as usize, height as usize);
    if data.len() != width * height {
        return Err(PcoError::Decode(format!(
            "expected a single-channel {width}x{height} image, got {} samples",
            data.len()
        )));
    }
    debug!(width, height, "decoded TIFF frame");

    Ok(PixelBuffer::from_u16(width, height, data))
}
