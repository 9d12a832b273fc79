//! Error types for AgriVis

use crate::bands::{BandRole, SensorLayout};
use thiserror::Error;

/// Main error type for AgriVis operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid image shape: expected 3 channels, got {channels}")]
    InvalidImageShape { channels: usize },

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("Invalid index selection: {0}")]
    UnknownIndex(String),

    #[error("The selected index {label} (id {index}) is not valid for the image type {layout}")]
    UnsupportedLayout {
        index: String,
        label: String,
        layout: SensorLayout,
    },

    #[error(
        "The selected index {label} (id {index}) requires the {band} band, \
         which is not available in the image type {layout}"
    )]
    MissingBand {
        index: String,
        label: String,
        band: BandRole,
        layout: SensorLayout,
    },

    #[error("Index {label} has no finite dynamic range to display")]
    DegenerateResult { label: String },

    #[error("Rendering failed: {0}")]
    Rendering(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the failure was caused by the request itself (bad image,
    /// index, layout or data) rather than by the system processing it.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidImageShape { .. }
                | Error::UnknownIndex(_)
                | Error::UnsupportedLayout { .. }
                | Error::MissingBand { .. }
                | Error::DegenerateResult { .. }
                | Error::InvalidParameter { .. }
        )
    }
}

/// Result type alias for AgriVis operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_are_client_errors() {
        assert!(Error::UnknownIndex("999".into()).is_client_error());
        assert!(Error::InvalidImageShape { channels: 4 }.is_client_error());
        assert!(Error::MissingBand {
            index: "7".into(),
            label: "GNDVI".into(),
            band: BandRole::Nir,
            layout: SensorLayout::Rgb,
        }
        .is_client_error());
    }

    #[test]
    fn rendering_errors_are_internal() {
        assert!(!Error::Rendering("buffer".into()).is_client_error());
        assert!(!Error::Other("boom".into()).is_client_error());
    }

    #[test]
    fn missing_band_message_names_band_and_layout() {
        let msg = Error::MissingBand {
            index: "7".into(),
            label: "GNDVI".into(),
            band: BandRole::Nir,
            layout: SensorLayout::Rgb,
        }
        .to_string();
        assert!(msg.contains("GNDVI"));
        assert!(msg.contains("NIR"));
        assert!(msg.contains("RGB"));
    }
}
