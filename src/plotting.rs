//! Rendering scenes to image files
//!
//! Mainly used through [`crate::Graph::render`], or [`render`] for a [`Scene`]
//! built by hand.
//!
//! Drawing goes through the [`PlotBackend`] trait. The [`plotters`](self::plotters)
//! module is the one implementation, writing PNG files with its bitmap backend.
use std::path::{Path, PathBuf};

use crate::{scene::Scene, value::Value};

mod backend;
pub use backend::*;

/// Renders a scene to a PNG file at `path`.
///
/// # Errors
/// Returns an error if the image cannot be drawn or written.
pub fn render<T: Value>(path: &Path, scene: &Scene<T>) -> Result<(), backend::plotters::Error> {
    let root = backend::plotters::Root::new(path, scene.size)?;
    backend::plotters::Backend::draw_scene(&root, scene)?;

    tracing::debug!(path = %path.display(), "wrote graph");
    Ok(())
}

/// Path for an output image: `{TARGET_DIR}/plot_output/{name}.png`.
///
/// `TARGET_DIR` defaults to `target`. Creates the directory if it doesn't exist.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn output_path(name: &str) -> std::io::Result<PathBuf> {
    let target_dir = std::env::var("TARGET_DIR").unwrap_or_else(|_| "target".into());
    let plots_dir = Path::new(&target_dir).join("plot_output");
    std::fs::create_dir_all(&plots_dir)?;

    Ok(plots_dir.join(format!("{name}.png")))
}
