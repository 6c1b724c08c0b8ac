//! Access to PCO camera images with embedded binary timestamps.
//!
//! When "binary timestamp" is enabled in the PCO software, the camera writes
//! the frame index and acquisition time BCD-encoded into the first pixels of
//! every frame. This crate decodes that stamp and, for b16 files, reads only
//! the handful of leading pixels it needs instead of the whole frame.

pub mod logger;
pub mod pco_image;
