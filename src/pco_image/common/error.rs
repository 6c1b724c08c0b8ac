use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PcoError {
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Invalid BCD digit: pixel {pixel:#06x} holds nibble value {nibble}, expected 0-9")]
    InvalidBcdDigit { pixel: u16, nibble: u16 },

    #[error(
        "Could not parse '{value}' as a timestamp: {reason}. \
         The first pixels may not carry a binary timestamp, `n_pixels` may be \
         wrong (typically 14 or 16, at least 10), or `shift_mode` may need \
         toggling when 14-bit data was scaled to 16 bit"
    )]
    TimestampParse { value: String, reason: String },

    #[error("Header size did not stabilize after {attempts} probes (last declared value: {last})")]
    HeaderResolution { attempts: u32, last: u32 },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Failed to decode frame: {0}")]
    Decode(String),

    #[error("Failed to encode frame: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PcoError>;
