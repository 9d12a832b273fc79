//! Raster data structures

mod element;
mod grid;
mod multiband;

pub use element::RasterElement;
pub use grid::{FiniteRange, Raster};
pub use multiband::MultiBandRaster;
