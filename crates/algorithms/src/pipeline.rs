//! End-to-end visualization: raw raster to composite image.
//!
//! Band extraction, index evaluation and composition run in sequence. The
//! only silent substitution is the colormap: an unrecognized name falls back
//! to the index's default.

use tracing::debug;

use agrivis_colormap::{composite, ColorScheme, CompositeImage, RenderOptions};
use agrivis_core::raster::{MultiBandRaster, Raster, RasterElement};
use agrivis_core::{BandSet, Result, SensorLayout};

use crate::imagery::{evaluate, IndexDefinition, IndexRegistry};

/// What to compute.
#[derive(Debug, Clone, Copy)]
pub struct IndexRequest<'a> {
    pub index_id: &'a str,
    pub layout: SensorLayout,
    /// Colormap name or key; `None` or an unknown name uses the index default.
    pub colormap: Option<&'a str>,
}

/// A rendered index and the values behind it.
#[derive(Debug, Clone)]
pub struct IndexVisualization {
    pub definition: &'static IndexDefinition,
    pub colormap: ColorScheme,
    pub result: Raster<f64>,
    pub composite: CompositeImage,
}

impl IndexVisualization {
    pub fn label(&self) -> &'static str {
        self.definition.label
    }

    pub fn abs_max(&self) -> f64 {
        self.composite.params.abs_max
    }
}

/// Pick the requested colormap, or the definition's default when the name
/// is missing or not in the catalog.
pub fn resolve_colormap(definition: &IndexDefinition, requested: Option<&str>) -> ColorScheme {
    match requested {
        Some(name) => match ColorScheme::from_name(name) {
            Some(scheme) => scheme,
            None => {
                debug!(
                    "unknown colormap '{}', using {} default {}",
                    name, definition.label, definition.default_colormap
                );
                definition.default_colormap
            }
        },
        None => definition.default_colormap,
    }
}

/// Compute and render one index for a raw three-channel raster.
pub fn run<T: RasterElement>(
    registry: &IndexRegistry,
    raw: &MultiBandRaster<T>,
    request: &IndexRequest<'_>,
    options: &RenderOptions,
) -> Result<IndexVisualization> {
    let definition = registry.lookup(request.index_id)?;
    let colormap = resolve_colormap(definition, request.colormap);
    debug!(
        "index {} ({}), layout {}, colormap {}",
        definition.id, definition.label, request.layout, colormap
    );

    let bands = BandSet::extract(raw, request.layout)?;
    let result = evaluate(definition, request.layout, &bands)?;
    let composite = composite(&result, definition.label, colormap, options)?;

    Ok(IndexVisualization {
        definition,
        colormap,
        result,
        composite,
    })
}
