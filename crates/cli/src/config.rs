//! Runtime configuration for the command-line front end.

use std::path::PathBuf;

use agrivis_algorithms::imagery::Catalog;
use agrivis_colormap::RenderOptions;

/// Where results go and how they are drawn.
///
/// Built once from the command line and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub result_dir: PathBuf,
    pub catalog: Catalog,
    pub render: RenderOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            result_dir: PathBuf::from("static/results"),
            catalog: Catalog::Extended,
            render: RenderOptions::default(),
        }
    }
}
