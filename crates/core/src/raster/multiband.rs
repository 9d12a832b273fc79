//! Interleaved multi-channel raster

use crate::error::{Error, Result};
use crate::raster::{Raster, RasterElement};
use ndarray::{Array3, Axis};

/// A raster with several channels per cell, stored as `(rows, cols, channels)`.
///
/// This is the shape an image decoder hands over: pixel-interleaved samples
/// at their native bit depth. Channel meaning is not known here; it is
/// assigned by a [`SensorLayout`](crate::SensorLayout) during extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiBandRaster<T: RasterElement> {
    data: Array3<T>,
}

impl<T: RasterElement> MultiBandRaster<T> {
    /// Create a raster filled with zeros
    pub fn new(rows: usize, cols: usize, channels: usize) -> Self {
        Self {
            data: Array3::zeros((rows, cols, channels)),
        }
    }

    /// Create a raster from pixel-interleaved samples
    pub fn from_interleaved(
        data: Vec<T>,
        rows: usize,
        cols: usize,
        channels: usize,
    ) -> Result<Self> {
        if data.len() != rows * cols * channels {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }
        let array = Array3::from_shape_vec((rows, cols, channels), data)
            .map_err(|e| Error::Other(e.to_string()))?;
        Ok(Self { data: array })
    }

    /// Create a raster by stacking single-band rasters as channels
    pub fn from_bands(bands: &[Raster<T>]) -> Result<Self> {
        let first = bands.first().ok_or(Error::InvalidImageShape { channels: 0 })?;
        let (rows, cols) = first.shape();
        let mut data = Array3::zeros((rows, cols, bands.len()));
        for (c, band) in bands.iter().enumerate() {
            if band.shape() != (rows, cols) {
                return Err(Error::SizeMismatch {
                    er: rows,
                    ec: cols,
                    ar: band.rows(),
                    ac: band.cols(),
                });
            }
            data.index_axis_mut(Axis(2), c).assign(band.data());
        }
        Ok(Self { data })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.dim().0
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.dim().1
    }

    /// Number of channels per cell
    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    /// Spatial dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Set one sample
    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: T) -> Result<()> {
        let (rows, cols, _) = self.data.dim();
        match self.data.get_mut((row, col, channel)) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds {
                row,
                col,
                rows,
                cols,
            }),
        }
    }

    /// Copy one channel out as a floating-point band
    pub fn channel_f64(&self, channel: usize) -> Result<Raster<f64>> {
        if channel >= self.channels() {
            return Err(Error::InvalidParameter {
                name: "channel",
                value: channel.to_string(),
                reason: format!("raster has {} channels", self.channels()),
            });
        }
        let band = self
            .data
            .index_axis(Axis(2), channel)
            .mapv(|v| v.to_f64().unwrap_or(f64::NAN));
        Ok(Raster::from_array(band))
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array3<T> {
        &self.data
    }
}
