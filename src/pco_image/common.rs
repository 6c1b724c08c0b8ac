//! Common utilities module
//!
//! Shared error taxonomy used across the PCO image modules.

pub mod error;

pub use error::{PcoError, Result};
