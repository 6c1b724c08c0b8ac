use std::path::{Path, PathBuf};

use crate::pco_image::common::error::{PcoError, Result};

/// Where a handle's pixels come from.
///
/// A closed set: the b16 raw format with its variable preamble, encoded
/// frames behind the TIFF codec, or a buffer supplied at construction with
/// no backing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    B16 { path: PathBuf },
    Tiff { path: PathBuf },
    Memory,
}

impl ImageSource {
    /// Infers the source format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("b16") => Ok(Self::B16 {
                path: path.to_path_buf(),
            }),
            Some("tif") | Some("tiff") => Ok(Self::Tiff {
                path: path.to_path_buf(),
            }),
            _ => Err(PcoError::UnsupportedOperation(format!(
                "cannot infer image format from '{}', expected .b16 or .tif(f)",
                path.display()
            ))),
        }
    }

    /// The backing file, if there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ImageSource::B16 { path } | ImageSource::Tiff { path } => Some(path),
            ImageSource::Memory => None,
        }
    }
}
