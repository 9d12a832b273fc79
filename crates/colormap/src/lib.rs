//! # AgriVis Colormap
//!
//! Color mapping, legend rendering and output composition for AgriVis.
//!
//! Provides the named color schemes and custom gradients offered to users,
//! a multi-stop interpolation engine, symmetric (zero-centered) scaling, and
//! [`composite`], which turns an index result into the final image: the
//! colored raster, a thin spacer and a legend strip stacked top to bottom.
//!
//! ## Usage
//!
//! ```ignore
//! use agrivis_colormap::{composite, ColorScheme, RenderOptions};
//!
//! let out = composite(&ndvi, "NDVI", ColorScheme::RdYlGn, &RenderOptions::default())?;
//! out.image.save("field_NDVI.png")?;
//! ```

mod composite;
mod font;
mod legend;
mod render;
mod scheme;

pub use composite::{composite, fit_to_box, CompositeImage, RenderOptions};
pub use legend::{format_tick, normalize_tick_count, Legend};
pub use render::{auto_params, raster_to_rgb, upscale_nearest, ColormapParams};
pub use scheme::{evaluate, ColorScheme, ColorStop, Rgb};
