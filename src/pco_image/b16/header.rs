//! b16 preamble parsing and adaptive header size resolution.
//!
//! A b16 file starts with a fixed 24-byte preamble of six little-endian
//! u32 fields; pixel data begins at the byte offset declared by the third
//! field. That offset varies between camera software versions, so readers
//! have to learn it from the file itself.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::pco_image::common::error::{PcoError, Result};

/// Length of the fixed preamble: six little-endian u32 fields.
pub const PREAMBLE_LEN: usize = 24;

/// `PCO-` as a little-endian u32, the first preamble field.
const B16_MAGIC: u32 = u32::from_le_bytes(*b"PCO-");

/// Seed for the first probe of a fresh resolver. The authoritative size
/// comes out of the file's own header-length field.
pub const DEFAULT_HEADER_SIZE: u32 = 512;

/// A well-formed file stabilizes in at most two passes; anything that still
/// moves after this many declared a different size on every read.
const MAX_PROBE_PASSES: u32 = 4;

/// Fixed preamble fields of a b16 file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct B16Header {
    pub file_size: u32,
    /// Byte offset at which pixel data begins.
    pub header_size: u32,
    pub width: u32,
    pub height: u32,
}

impl B16Header {
    /// Parses the preamble from the start of `buf`.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        if buf.len() < PREAMBLE_LEN {
            return Err(PcoError::Decode(format!(
                "file too short for a b16 preamble: {} bytes, need {PREAMBLE_LEN}",
                buf.len()
            )));
        }
        let word = |i: usize| {
            u32::from_le_bytes([buf[i * 4], buf[i * 4 + 1], buf[i * 4 + 2], buf[i * 4 + 3]])
        };
        if word(0) != B16_MAGIC {
            return Err(PcoError::Decode("not a b16 file: missing PCO- magic".to_string()));
        }
        Ok(Self {
            file_size: word(1),
            header_size: word(2),
            width: word(3),
            height: word(4),
        })
    }
}

/// Learns the true b16 header size by probing files.
///
/// The resolver starts from an assumed size, reads just enough of the file
/// to see the declared header-length field, and corrects itself when the
/// two disagree. The corrected value is kept in `last_known_size`, so the
/// first file of a session pays for at most one extra read and every later
/// file of the same format starts from the right guess. Construct one per
/// format and pass it to readers explicitly; it is plain `&mut` state with
/// no interior locking.
#[derive(Debug, Clone)]
pub struct HeaderSizeResolver {
    last_known_size: u32,
}

impl Default for HeaderSizeResolver {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_SIZE)
    }
}

impl HeaderSizeResolver {
    pub fn new(assumed_size: u32) -> Self {
        Self {
            last_known_size: assumed_size,
        }
    }

    /// The size the next probe will start from.
    pub fn last_known_size(&self) -> u32 {
        self.last_known_size
    }

    /// Probes `path` until the declared header size matches the size the
    /// probe was read with, keeping `pixel_count` pixels past the header in
    /// the returned buffer.
    ///
    /// The declared field cannot change between reads of the same file, so
    /// the fixed point is reached after at most one correction; the pass
    /// bound turns a corrupt, never-stabilizing declaration into
    /// [`PcoError::HeaderResolution`] instead of an endless loop.
    pub fn resolve(&mut self, path: &Path, pixel_count: usize) -> Result<HeaderProbe> {
        let mut assumed = self.last_known_size;
        for pass in 1..=MAX_PROBE_PASSES {
            let buf = read_prefix(path, assumed as usize + pixel_count * 2)?;
            let header = B16Header::parse(&buf)?;
            if header.header_size == assumed {
                debug!(size = assumed, pass, "header size resolved");
                return Ok(HeaderProbe { header, buf });
            }
            debug!(
                assumed,
                declared = header.header_size,
                "correcting assumed header size"
            );
            assumed = header.header_size;
            self.last_known_size = assumed;
        }
        Err(PcoError::HeaderResolution {
            attempts: MAX_PROBE_PASSES,
            last: assumed,
        })
    }
}

/// Result of a successful probe: the parsed preamble plus the bytes read to
/// find it, which already cover the requested leading pixels.
#[derive(Debug)]
pub struct HeaderProbe {
    pub header: B16Header,
    buf: Vec<u8>,
}

impl HeaderProbe {
    /// The first `n` pixels after the header, little-endian u16.
    pub fn pixels(&self, n: usize) -> Result<Vec<u16>> {
        let start = self.header.header_size as usize;
        let end = start + n * 2;
        if self.buf.len() < end {
            return Err(PcoError::Decode(format!(
                "file ends before pixel {n}: {} bytes past the header",
                self.buf.len().saturating_sub(start)
            )));
        }
        Ok(self.buf[start..end]
            .chunks_exact(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .collect())
    }
}

fn read_prefix(path: &Path, len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len);
    File::open(path)?.take(len as u64).read_to_end(&mut buf)?;
    Ok(buf)
}
