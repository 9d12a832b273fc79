//! Index evaluation over extracted bands.

use ndarray::ArrayView2;
use tracing::debug;

use crate::maybe_rayon::*;
use agrivis_core::raster::Raster;
use agrivis_core::{BandSet, Error, Result, SensorLayout};

use super::registry::{IndexDefinition, IndexRegistry};

/// Upper bound on formula arity.
const MAX_OPERANDS: usize = 4;

/// Resolve `index_id` and evaluate it over `bands`.
pub fn evaluate_index(
    registry: &IndexRegistry,
    index_id: &str,
    layout: SensorLayout,
    bands: &BandSet,
) -> Result<Raster<f64>> {
    let definition = registry.lookup(index_id)?;
    evaluate(definition, layout, bands)
}

/// Apply a definition's formula elementwise to its required bands.
///
/// Checks run in this order: the layout must be listed as supported
/// ([`Error::UnsupportedLayout`]), then every required band must be present
/// ([`Error::MissingBand`], naming the first absent role). Non-finite results
/// from zero denominators are kept in the output.
pub fn evaluate(
    definition: &IndexDefinition,
    layout: SensorLayout,
    bands: &BandSet,
) -> Result<Raster<f64>> {
    let arity = definition.required_bands.len();
    if arity != definition.formula.arity() || arity > MAX_OPERANDS {
        return Err(Error::Algorithm(format!(
            "index {} declares {} bands for a formula of arity {}",
            definition.id,
            arity,
            definition.formula.arity()
        )));
    }

    if !definition.supports(layout) {
        return Err(Error::UnsupportedLayout {
            index: definition.id.to_string(),
            label: definition.label.to_string(),
            layout,
        });
    }

    let mut operands: Vec<&Raster<f64>> = Vec::with_capacity(arity);
    for &role in definition.required_bands {
        let band = bands.get(role).ok_or_else(|| Error::MissingBand {
            index: definition.id.to_string(),
            label: definition.label.to_string(),
            band: role,
            layout,
        })?;
        operands.push(band);
    }

    let (rows, cols) = operands[0].shape();
    for band in &operands[1..] {
        if band.shape() != (rows, cols) {
            return Err(Error::SizeMismatch {
                er: rows,
                ec: cols,
                ar: band.rows(),
                ac: band.cols(),
            });
        }
    }

    debug!(
        "evaluating {} (id {}) on {}x{} {} raster",
        definition.label, definition.id, rows, cols, layout
    );

    let formula = definition.formula;
    let views: Vec<ArrayView2<'_, f64>> = operands.iter().map(|b| b.view()).collect();

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];
            let mut px = [0.0f64; MAX_OPERANDS];
            for (col, out) in row_data.iter_mut().enumerate() {
                for (slot, view) in px.iter_mut().zip(&views) {
                    *slot = view[[row, col]];
                }
                *out = formula.apply(&px[..arity]);
            }
            row_data
        })
        .collect();

    Raster::from_vec(data, rows, cols)
}
