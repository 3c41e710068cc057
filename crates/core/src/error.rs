//! Error types for SpecRes

use crate::raster::Window;
use thiserror::Error;

/// Main error type for SpecRes operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported wavelength unit '{unit}' in response function '{band}'")]
    UnsupportedUnit { unit: String, band: String },

    #[error("response function '{band}' has no samples above the cutoff")]
    EmptyResponseFunction { band: String },

    #[error("duplicate response function name '{name}'")]
    DuplicateBandName { name: String },

    #[error("response function library contains no records")]
    EmptyLibrary,

    #[error("raster I/O failed at window {window}: {message}")]
    RasterIo { message: String, window: Window },

    #[error("resampling cancelled")]
    Cancelled,

    #[error("invalid raster dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("band index {index} out of range for raster with {count} bands")]
    BandOutOfRange { index: usize, count: usize },

    #[error("window {window} exceeds raster extent ({rows}, {cols})")]
    WindowOutOfBounds {
        window: Window,
        rows: usize,
        cols: usize,
    },

    #[error("invalid SRF library: {0}")]
    InvalidLibrary(String),

    #[cfg(feature = "gdal")]
    #[error("GDAL error: {0}")]
    Gdal(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "gdal")]
impl From<gdal::errors::GdalError> for Error {
    fn from(e: gdal::errors::GdalError) -> Self {
        Error::Gdal(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidLibrary(e.to_string())
    }
}

/// Result type alias for SpecRes operations
pub type Result<T> = std::result::Result<T, Error>;
