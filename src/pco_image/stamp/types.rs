//! Stamp decoding result types

use chrono::NaiveDateTime;

/// How decoded stamps are handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StampMode {
    /// Parse the digits into a typed index and date-time (validated).
    #[default]
    Parsed,
    /// Return the digit substrings as-is, with no validation.
    Raw,
}

/// Frame index and acquisition time decoded from the leading pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStamp {
    Parsed { index: u32, timestamp: NaiveDateTime },
    Raw { index: String, timestamp: String },
}

impl ImageStamp {
    /// The frame index, when this stamp was decoded in parsed mode.
    pub fn index(&self) -> Option<u32> {
        match self {
            ImageStamp::Parsed { index, .. } => Some(*index),
            ImageStamp::Raw { .. } => None,
        }
    }

    /// The acquisition time, when this stamp was decoded in parsed mode.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            ImageStamp::Parsed { timestamp, .. } => Some(*timestamp),
            ImageStamp::Raw { .. } => None,
        }
    }
}
