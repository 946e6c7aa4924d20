//! Renders the agent workflow architecture diagram to a PNG image.
//!
//! The pipeline is: build the [`model::Canvas`] from hand-authored constants
//! ([`diagram::agent_workflow`]), compose it into SVG ([`render::SvgRenderer`]),
//! rasterize it ([`export::svg_to_png`]) and write the file atomically
//! ([`export::write_atomically`]).

pub mod config;
pub mod diagram;
pub mod error;
pub mod export;
pub mod fonts;
pub mod geometry;
pub mod model;
pub mod palette;
pub mod render;
pub mod xml;

use std::path::PathBuf;

use log::info;

pub use config::RenderConfig;
pub use error::{DiagramError, Result};

/// Text printed on stdout once the image is written.
pub const SUCCESS_MARKER: &str = "diagram saved as";

/// Renders the diagram with `config` and returns the path written.
pub fn run(config: &RenderConfig) -> Result<PathBuf> {
    config.validate()?;
    info!(
        output_path = config.output.display().to_string(),
        dpi = config.dpi;
        "Rendering architecture diagram"
    );

    let canvas = diagram::agent_workflow(&config.palette);

    let mut measure = fonts::CosmicTextMeasure::with_fonts_dir(Some(config.fonts_dir.as_path()));
    let rendered = render::SvgRenderer::new(&mut measure, config.render_options()).render(&canvas);

    let png = export::svg_to_png(
        &rendered.svg,
        export::scale_for_dpi(config.dpi),
        Some(config.fonts_dir.as_path()),
    )?;
    export::write_atomically(&config.output, &png)?;

    Ok(config.output.clone())
}

/// The confirmation line printed after a successful run.
pub fn success_message(path: &std::path::Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("✅ LangGraph architecture {SUCCESS_MARKER} '{name}'")
}
