//! Binary timestamp decoding module
//!
//! PCO cameras with "binary timestamp" enabled write the frame index and the
//! acquisition time BCD-encoded into the leading pixels of every frame. This
//! module converts those pixel values back into an index and a date-time.

mod decoder;
pub mod types;

pub use decoder::{decode_digit_pair, decode_stamp};
pub use types::{ImageStamp, StampMode};
