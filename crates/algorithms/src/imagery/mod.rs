//! Spectral index computation
//!
//! - Formulas: closed-form elementwise expressions over 2-3 bands
//! - Registry: the classic and extended index catalogs
//! - Evaluation: layout and band checks, then row-parallel evaluation

mod evaluate;
mod formula;
mod registry;

pub use evaluate::{evaluate, evaluate_index};
pub use formula::Formula;
pub use registry::{Catalog, IndexDefinition, IndexRegistry};
