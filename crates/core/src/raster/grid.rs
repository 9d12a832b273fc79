//! Single-band raster grid

use crate::error::{Error, Result};
use crate::raster::RasterElement;
use ndarray::{Array2, ArrayView2};

/// A single-band 2-D raster grid.
///
/// `Raster<T>` stores values of type `T` in row-major order. Extracted bands
/// and index results are `Raster<f64>`; a result may legitimately hold `NaN`
/// or `±Inf` where a formula divided by zero.
///
/// # Example
///
/// ```ignore
/// use agrivis_core::Raster;
///
/// let mut raster: Raster<f64> = Raster::new(4, 4);
/// raster.set(1, 2, 0.6)?;
/// assert_eq!(raster.get(1, 2)?, 0.6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T: RasterElement> {
    data: Array2<T>,
}

impl<T: RasterElement> Raster<T> {
    /// Create a new raster filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Create a new raster filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// Create a raster from row-major data
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data: array })
    }

    /// Create a raster from an ndarray
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data }
    }

    // Dimensions

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the raster is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    // Statistics

    /// Minimum and maximum over the finite cells, `None` when there are none.
    ///
    /// `NaN` and `±Inf` are skipped rather than propagated.
    pub fn finite_range(&self) -> Option<FiniteRange> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut count = 0usize;

        for &value in self.data.iter() {
            if !value.is_finite_value() {
                continue;
            }
            if let Some(v) = value.to_f64() {
                if v < min {
                    min = v;
                }
                if v > max {
                    max = v;
                }
                count += 1;
            }
        }

        (count > 0).then_some(FiniteRange { min, max, count })
    }
}

/// Range of the finite values in a raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteRange {
    pub min: f64,
    pub max: f64,
    /// Number of finite cells
    pub count: usize,
}

impl FiniteRange {
    /// `max(|min|, |max|)`, the half-width of a zero-centered range
    pub fn abs_max(&self) -> f64 {
        self.min.abs().max(self.max.abs())
    }
}
