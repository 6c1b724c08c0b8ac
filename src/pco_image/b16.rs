//! b16 raw frame reading module
//!
//! This module parses the b16 preamble, resolves the variable header size,
//! and reads either the whole frame or just the leading stamp pixels.

pub mod header;
mod reader;

pub use header::{B16Header, DEFAULT_HEADER_SIZE, HeaderProbe, HeaderSizeResolver};
pub use reader::{decode_frame, read_first_pixels, read_header};
