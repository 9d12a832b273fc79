//! # AgriVis Core
//!
//! Core types and I/O for the AgriVis spectral index toolkit.
//!
//! This crate provides:
//! - `Raster<T>`: single-band 2-D grid, the shape of every band and index result
//! - `MultiBandRaster<T>`: interleaved multi-channel raster as decoded from an image
//! - Band extraction: `SensorLayout`, `BandRole`, `BandSet`
//! - Image decoding and PNG encoding

pub mod bands;
pub mod error;
pub mod io;
pub mod raster;

pub use bands::{BandRole, BandSet, SensorLayout};
pub use error::{Error, Result};
pub use raster::{MultiBandRaster, Raster, RasterElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bands::{BandRole, BandSet, SensorLayout};
    pub use crate::error::{Error, Result};
    pub use crate::raster::{MultiBandRaster, Raster, RasterElement};
}
