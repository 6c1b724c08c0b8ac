//! b16 frame reading.
//!
//! Two paths into a b16 file: a partial read that pulls only the leading
//! stamp pixels through the header-size resolver, and a full-frame decode
//! that loads the whole pixel array.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::pco_image::b16::header::{B16Header, HeaderSizeResolver, PREAMBLE_LEN};
use crate::pco_image::common::error::{PcoError, Result};
use crate::pco_image::image::types::PixelBuffer;

/// Reads only the first `n` pixels of a b16 file.
///
/// This avoids loading the frame when all the caller wants is the embedded
/// stamp: the resolver's probe already holds `header_size + n*2` bytes, and
/// the trailing `n*2` of them are the pixels, little-endian u16.
pub fn read_first_pixels(
    path: &Path,
    n: usize,
    resolver: &mut HeaderSizeResolver,
) -> Result<Vec<u16>> {
    let probe = resolver.resolve(path, n)?;
    probe.pixels(n)
}

/// Decodes a whole b16 frame into a pixel buffer.
pub fn decode_frame(path: &Path) -> Result<PixelBuffer> {
    let bytes = std::fs::read(path)
        .map_err(|e| PcoError::Decode(format!("{}: {e}", path.display())))?;
    let header = B16Header::parse(&bytes)?;

    let width = header.width as usize;
    let height = header.height as usize;
    let start = header.header_size as usize;
    let end = start + width * height * 2;
    if bytes.len() < end {
        return Err(PcoError::Decode(format!(
            "truncated pixel data: {} bytes, {}x{} frame needs {end}",
            bytes.len(),
            width,
            height
        )));
    }

    let data: Vec<u16> = bytes[start..end]
        .chunks_exact(2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .collect();
    debug!(width, height, "decoded b16 frame");

    Ok(PixelBuffer::from_u16(width, height, data))
}

/// Parses just the fixed preamble of a b16 file.
pub fn read_header(path: &Path) -> Result<B16Header> {
    let mut buf = Vec::with_capacity(PREAMBLE_LEN);
    File::open(path)?
        .take(PREAMBLE_LEN as u64)
        .read_to_end(&mut buf)?;
    B16Header::parse(&buf)
}
