//! # AgriVis Algorithms
//!
//! Spectral index computation and visualization for AgriVis.
//!
//! ## Modules
//!
//! - **imagery**: index formulas, the classic and extended registries, evaluation
//! - **pipeline**: raw raster to composite image in one call

pub(crate) mod maybe_rayon;

pub mod imagery;
pub mod pipeline;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::imagery::{
        evaluate, evaluate_index, Catalog, Formula, IndexDefinition, IndexRegistry,
    };
    pub use crate::pipeline::{resolve_colormap, run, IndexRequest, IndexVisualization};
    pub use agrivis_colormap::{ColorScheme, CompositeImage, RenderOptions};
    pub use agrivis_core::prelude::*;
}
