//! Final output composition: main image, spacer and legend strip.

use image::{imageops, Rgb as Pixel, RgbImage};
use tracing::debug;

use agrivis_core::raster::Raster;
use agrivis_core::{Error, Result};

use crate::legend::{normalize_tick_count, Legend};
use crate::render::{raster_to_rgb, upscale_nearest, ColormapParams};
use crate::scheme::{ColorScheme, Rgb};

/// Output geometry and rendering policy.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Output resolution in pixels per inch.
    pub dpi: u32,
    /// Width of the plotting box, inches.
    pub axes_width_in: f64,
    /// Height of the plotting box, inches.
    pub axes_height_in: f64,
    /// Number of legend ticks (raised to odd, minimum 3).
    pub tick_count: usize,
    /// Color for non-finite cells.
    pub nodata_color: Rgb,
    /// Render an all-zero result with a unit range instead of failing.
    pub allow_flat_result: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dpi: 600,
            axes_width_in: 4.96,
            axes_height_in: 3.696,
            tick_count: 5,
            nodata_color: Rgb::WHITE,
            allow_flat_result: false,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(Error::InvalidParameter {
                name: "dpi",
                value: self.dpi.to_string(),
                reason: "must be positive".into(),
            });
        }
        for (name, v) in [
            ("axes_width_in", self.axes_width_in),
            ("axes_height_in", self.axes_height_in),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(Error::InvalidParameter {
                    name,
                    value: v.to_string(),
                    reason: "must be a positive number of inches".into(),
                });
            }
        }
        Ok(())
    }

    /// Pixel size of the plotting box.
    pub fn box_size(&self) -> (u32, u32) {
        let w = (self.axes_width_in * self.dpi as f64).round().max(1.0) as u32;
        let h = (self.axes_height_in * self.dpi as f64).round().max(1.0) as u32;
        (w, h)
    }
}

/// A composed output raster and the geometry it was built from.
#[derive(Debug, Clone)]
pub struct CompositeImage {
    pub image: RgbImage,
    pub main_size: (u32, u32),
    pub spacer_height: u32,
    pub legend_size: (u32, u32),
    pub params: ColormapParams,
    pub legend: Legend,
}

impl CompositeImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Largest size with the raster's aspect ratio that fits the box.
pub fn fit_to_box(cols: usize, rows: usize, box_size: (u32, u32)) -> (u32, u32) {
    let scale = f64::min(
        box_size.0 as f64 / cols as f64,
        box_size.1 as f64 / rows as f64,
    );
    let w = (cols as f64 * scale).round().max(1.0) as u32;
    let h = (rows as f64 * scale).round().max(1.0) as u32;
    (w, h)
}

/// Compose the colored result, a white spacer and a centered legend strip.
///
/// The color range is `±max|v|` over finite values, so zero always lands on
/// the scheme's center color. Fails with [`Error::DegenerateResult`] when the
/// result has no finite non-zero value, unless
/// [`RenderOptions::allow_flat_result`] is set.
pub fn composite(
    result: &Raster<f64>,
    label: &str,
    scheme: ColorScheme,
    options: &RenderOptions,
) -> Result<CompositeImage> {
    options.validate()?;
    if result.is_empty() {
        return Err(Error::InvalidDimensions {
            width: result.cols(),
            height: result.rows(),
        });
    }

    let abs_max = match result.finite_range().map(|r| r.abs_max()) {
        Some(m) if m > 0.0 => m,
        _ if options.allow_flat_result => 1.0,
        _ => {
            return Err(Error::DegenerateResult {
                label: label.to_string(),
            })
        }
    };
    debug!("{}: abs_max = {}", label, abs_max);

    let params = ColormapParams {
        scheme,
        abs_max,
        nodata_color: options.nodata_color,
    };

    let (mw, mh) = fit_to_box(result.cols(), result.rows(), options.box_size());
    let cells = raster_to_rgb(result, &params);
    let main = upscale_nearest(&cells, mw, mh);

    let legend_size = (
        (0.8 * mw as f64).round().max(1.0) as u32,
        (0.1 * mh as f64).round().max(1.0) as u32,
    );
    let spacer_height = (0.01 * mh as f64).round().max(1.0) as u32;
    let legend = Legend::new(label, params.clone(), normalize_tick_count(options.tick_count));
    let strip = legend.render(legend_size.0, legend_size.1)?;
    debug!(
        "main {}x{}, spacer {}, legend {}x{}",
        mw, mh, spacer_height, legend_size.0, legend_size.1
    );

    let total_h = mh + spacer_height + legend_size.1;
    let mut image = RgbImage::from_pixel(mw, total_h, Pixel([255, 255, 255]));
    imageops::replace(&mut image, &main, 0, 0);
    let legend_x = (mw - legend_size.0) / 2;
    imageops::replace(
        &mut image,
        &strip,
        legend_x as i64,
        (mh + spacer_height) as i64,
    );

    Ok(CompositeImage {
        image,
        main_size: (mw, mh),
        spacer_height,
        legend_size,
        params,
        legend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> RenderOptions {
        RenderOptions {
            dpi: 20,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn default_box_matches_600_dpi() {
        assert_eq!(RenderOptions::default().box_size(), (2976, 2218));
    }

    #[test]
    fn fit_keeps_aspect() {
        assert_eq!(fit_to_box(4, 4, (100, 74)), (74, 74));
        assert_eq!(fit_to_box(8, 2, (100, 74)), (100, 25));
        assert_eq!(fit_to_box(1, 1000, (100, 74)), (1, 74));
    }

    #[test]
    fn geometry_of_stacked_output() {
        let r = Raster::from_vec(vec![-1.0, 0.0, 0.5, 1.0], 2, 2).unwrap();
        let c = composite(&r, "NDVI", ColorScheme::RdYlGn, &small()).unwrap();
        // box 99x74 at 20 dpi, square raster -> 74x74
        assert_eq!(c.main_size, (74, 74));
        assert_eq!(c.legend_size, (59, 7));
        assert_eq!(c.spacer_height, 1);
        assert_eq!(c.width(), 74);
        assert_eq!(c.height(), 74 + 1 + 7);
    }

    #[test]
    fn spacer_and_legend_margins_are_white() {
        let r = Raster::from_vec(vec![-1.0, 1.0], 1, 2).unwrap();
        let c = composite(&r, "NDVI", ColorScheme::RdYlGn, &small()).unwrap();
        let (mw, mh) = c.main_size;
        for x in 0..mw {
            assert_eq!(c.image.get_pixel(x, mh).0, [255, 255, 255]);
        }
        let legend_x = (mw - c.legend_size.0) / 2;
        if legend_x > 0 {
            assert_eq!(c.image.get_pixel(0, mh + 1).0, [255, 255, 255]);
        }
    }

    #[test]
    fn all_zero_is_degenerate() {
        let r = Raster::filled(3, 3, 0.0);
        let err = composite(&r, "NDVI", ColorScheme::RdYlGn, &small()).unwrap_err();
        assert!(matches!(err, Error::DegenerateResult { .. }));
    }

    #[test]
    fn all_nan_is_degenerate() {
        let r = Raster::filled(3, 3, f64::NAN);
        let err = composite(&r, "NDVI", ColorScheme::RdYlGn, &small()).unwrap_err();
        assert!(matches!(err, Error::DegenerateResult { .. }));
    }

    #[test]
    fn flat_result_allowed_renders_center() {
        let r = Raster::filled(4, 4, 0.0);
        let opts = RenderOptions {
            allow_flat_result: true,
            ..small()
        };
        let c = composite(&r, "NDVI", ColorScheme::RdYlGn, &opts).unwrap();
        let (mw, mh) = c.main_size;
        for y in 0..mh {
            for x in 0..mw {
                assert_eq!(c.image.get_pixel(x, y).0, [255, 255, 191]);
            }
        }
    }

    #[test]
    fn nan_cells_use_nodata_color() {
        let r = Raster::from_vec(vec![f64::NAN, 1.0], 1, 2).unwrap();
        let opts = RenderOptions {
            nodata_color: Rgb::BLACK,
            ..small()
        };
        let c = composite(&r, "X", ColorScheme::Viridis, &opts).unwrap();
        assert_eq!(c.image.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn zero_dpi_rejected() {
        let r = Raster::filled(1, 1, 1.0);
        let opts = RenderOptions { dpi: 0, ..small() };
        let err = composite(&r, "X", ColorScheme::Viridis, &opts).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "dpi", .. }));
    }
}
