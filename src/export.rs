use std::io::Write;
use std::path::Path;

use log::{debug, info};
use resvg::usvg;
use tempfile::NamedTempFile;
use tiny_skia::{Pixmap, Transform};

use crate::error::{DiagramError, Result};

/// Points per inch; a raster at `dpi` uses `dpi / POINTS_PER_INCH` pixels per point.
pub const POINTS_PER_INCH: f32 = 72.0;

pub fn scale_for_dpi(dpi: f32) -> f32 {
    dpi / POINTS_PER_INCH
}

/// Pixel size of a document of `width` x `height` points rasterized at `scale`.
pub fn raster_size(width: f32, height: f32, scale: f32) -> (u32, u32) {
    ((width * scale).ceil() as u32, (height * scale).ceil() as u32)
}

pub fn svg_to_png(svg: &str, scale: f32, fonts_dir: Option<&Path>) -> Result<Vec<u8>> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(DiagramError::InvalidSetting(format!(
            "raster scale must be positive, got {scale}"
        )));
    }

    let mut opts = usvg::Options::default();
    {
        let fontdb = opts.fontdb_mut();
        fontdb.load_system_fonts();

        if let Some(dir) = fonts_dir.filter(|d| d.is_dir()) {
            fontdb.load_fonts_dir(dir);
            debug!(dir = dir.display().to_string(); "Loaded local fonts for rasterization");
        }

        configure_font_fallbacks(fontdb);
    }

    let tree = usvg::Tree::from_str(svg, &opts).map_err(|e| DiagramError::Svg(e.to_string()))?;

    let (width, height) = raster_size(tree.size().width(), tree.size().height(), scale);
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        DiagramError::Raster(format!("cannot allocate a {width}x{height} pixmap"))
    })?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    info!(width, height; "Rasterized diagram");

    pixmap
        .encode_png()
        .map_err(|e| DiagramError::Raster(format!("PNG encoding failed: {e}")))
}

/// Writes `bytes` to `path` through a temporary file in the same directory,
/// so a failed write never leaves a partial file at `path`.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Err(DiagramError::MissingDirectory(dir.to_path_buf()));
    }

    let mut file = NamedTempFile::new_in(dir).map_err(|e| DiagramError::io(dir, e))?;
    file.write_all(bytes)
        .map_err(|e| DiagramError::io(file.path(), e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| DiagramError::io(file.path(), e))?;

    // Temp files are created owner-only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o644))
            .map_err(|e| DiagramError::io(file.path(), e))?;
    }

    file.persist(path)
        .map_err(|e| DiagramError::io(path, e.error))?;

    info!(path = path.display().to_string(), bytes = bytes.len(); "Wrote output file");
    Ok(())
}

fn configure_font_fallbacks(fontdb: &mut usvg::fontdb::Database) {
    let mut sans_family: Option<String> = None;
    let mut mono_family: Option<String> = None;
    let mut first_family: Option<String> = None;

    for face in fontdb.faces() {
        for (family, _) in &face.families {
            if first_family.is_none() {
                first_family = Some(family.clone());
            }
            let lower = family.to_ascii_lowercase();
            if sans_family.is_none() && lower.contains("sans") && !lower.contains("mono") {
                sans_family = Some(family.clone());
            }
            if mono_family.is_none() && (lower.contains("mono") || lower.contains("code")) {
                mono_family = Some(family.clone());
            }
        }
    }

    if let Some(family) = sans_family.as_deref().or(first_family.as_deref()) {
        debug!(family; "Using sans-serif fallback");
        fontdb.set_sans_serif_family(family);
        fontdb.set_serif_family(family);
    }
    if let Some(family) = mono_family
        .as_deref()
        .or(sans_family.as_deref())
        .or(first_family.as_deref())
    {
        fontdb.set_monospace_family(family);
    }
}
