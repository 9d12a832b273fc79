//! Result persistence and reporting.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use agrivis_algorithms::pipeline::IndexVisualization;
use agrivis_core::io::write_png;

use crate::config::Config;

/// Summary printed after a successful run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub processed_image: String,
    pub index: String,
    pub colormap: String,
    pub abs_max: f64,
    pub width: u32,
    pub height: u32,
}

impl Report {
    pub fn new(path: &Path, vis: &IndexVisualization) -> Self {
        Self {
            processed_image: path.display().to_string(),
            index: vis.label().to_string(),
            colormap: vis.colormap.name().to_string(),
            abs_max: vis.abs_max(),
            width: vis.composite.width(),
            height: vis.composite.height(),
        }
    }
}

/// `{base}_{label}.png`, where `base` is the input file name without its extension.
pub fn result_file_name(input: &Path, label: &str) -> Result<String> {
    let base = input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .with_context(|| format!("Input path has no usable file name: {}", input.display()))?;
    Ok(format!("{}_{}.png", base, label))
}

/// Write the composite into the result directory, creating it if needed.
pub fn persist(config: &Config, input: &Path, vis: &IndexVisualization) -> Result<PathBuf> {
    fs::create_dir_all(&config.result_dir).with_context(|| {
        format!(
            "Failed to create result directory {}",
            config.result_dir.display()
        )
    })?;

    let path = config
        .result_dir
        .join(result_file_name(input, vis.label())?);
    write_png(&vis.composite.image, &path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Image processed and saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_from_stem_and_label() {
        assert_eq!(
            result_file_name(Path::new("uploads/field_07.tif"), "NDVI").unwrap(),
            "field_07_NDVI.png"
        );
        assert_eq!(
            result_file_name(Path::new("plot.a.png"), "NDBI-Blue").unwrap(),
            "plot.a_NDBI-Blue.png"
        );
        assert_eq!(result_file_name(Path::new("scene"), "ExG").unwrap(), "scene_ExG.png");
    }

    #[test]
    fn rejects_path_without_file_name() {
        assert!(result_file_name(Path::new("/"), "NDVI").is_err());
    }
}
