//! Raster-to-RGB rendering using color schemes.

use image::RgbImage;

use crate::scheme::{evaluate, ColorScheme, Rgb};
use agrivis_core::raster::{Raster, RasterElement};

/// Parameters for colormap rendering.
///
/// Scaling is symmetric about zero: `-abs_max` maps to the first stop,
/// `+abs_max` to the last, and zero always to the center color.
#[derive(Debug, Clone)]
pub struct ColormapParams {
    /// Color scheme to use.
    pub scheme: ColorScheme,
    /// Half-width of the color range. Values beyond it are clamped.
    pub abs_max: f64,
    /// Color for NaN and infinite cells. Default: white.
    pub nodata_color: Rgb,
}

impl ColormapParams {
    /// Params spanning `[-abs_max, +abs_max]`.
    pub fn symmetric(scheme: ColorScheme, abs_max: f64) -> Self {
        Self {
            scheme,
            abs_max,
            nodata_color: Rgb::WHITE,
        }
    }

    /// Normalized position of `value` on the color axis.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.abs_max > 0.0 && self.abs_max.is_finite() {
            0.5 + 0.5 * value / self.abs_max
        } else {
            0.5
        }
    }

    /// Color of a single value.
    pub fn color_of(&self, value: f64) -> Rgb {
        if value.is_finite() {
            evaluate(self.scheme, self.normalize(value))
        } else {
            self.nodata_color
        }
    }
}

/// Scan a raster and build symmetric params from its largest finite magnitude.
///
/// Returns `None` when the raster holds no finite value at all.
pub fn auto_params<T: RasterElement>(raster: &Raster<T>, scheme: ColorScheme) -> Option<ColormapParams> {
    raster
        .finite_range()
        .map(|range| ColormapParams::symmetric(scheme, range.abs_max()))
}

/// Convert a raster to an RGB image, one pixel per cell.
///
/// Non-finite cells are rendered with `params.nodata_color`.
pub fn raster_to_rgb<T: RasterElement>(raster: &Raster<T>, params: &ColormapParams) -> RgbImage {
    let rows = raster.rows();
    let cols = raster.cols();
    let data = raster.data();

    RgbImage::from_fn(cols as u32, rows as u32, |x, y| {
        let v = data[[y as usize, x as usize]].to_f64().unwrap_or(f64::NAN);
        params.color_of(v).into()
    })
}

/// Nearest-neighbor upscale that keeps every output pixel an exact cell color.
pub fn upscale_nearest(src: &RgbImage, width: u32, height: u32) -> RgbImage {
    if src.width() == 0 || src.height() == 0 {
        return RgbImage::new(width, height);
    }
    if src.width() == width && src.height() == height {
        return src.clone();
    }
    let (sw, sh) = (src.width() as u64, src.height() as u64);
    let (w, h) = (width.max(1) as u64, height.max(1) as u64);
    RgbImage::from_fn(width.max(1), height.max(1), |x, y| {
        let sx = (x as u64 * sw / w).min(sw - 1);
        let sy = (y as u64 * sh / h).min(sh - 1);
        *src.get_pixel(sx as u32, sy as u32)
    })
}
