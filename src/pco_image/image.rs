//! Image handle module
//!
//! The lazily-loaded [`PcoImage`] handle ties the pieces together: source
//! dispatch, cached pixel buffer, cached stamp, and elementwise arithmetic.

pub mod arithmetic;
mod handle;
mod source;
pub mod types;

pub use arithmetic::{add, add_scalar, div, div_scalar, mul, scale, sub, sub_scalar};
pub use handle::PcoImage;
pub use source::ImageSource;
pub use types::{PixelBuffer, PixelData, StampConfig, StampConfigBuilder};
