//! Rasterizer seam and its resvg-backed implementation.
//!
//! The generator only needs two things from a rasterizer: the natural size of
//! a source, and a PNG written at a target width with the height following
//! the source's aspect ratio.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use resvg::{tiny_skia, usvg};
use tracing::debug;

use crate::utils::{AssetError, AssetResult};

/// Natural size of a vector source in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageMetadata {
    pub width: f32,
    pub height: f32,
}

/// A raster written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// External collaborator converting a vector source into a PNG file.
///
/// Called from blocking worker threads, so implementations must be shareable.
pub trait Rasterizer: Send + Sync {
    fn metadata(&self, source: &Path) -> AssetResult<ImageMetadata>;

    /// Writes `source` to `output` as a PNG exactly `width` pixels wide.
    fn render_png(&self, source: &Path, output: &Path, width: u32) -> AssetResult<RenderedImage>;

    /// Writes `source` at `multiplier` times its natural width.
    ///
    /// Implementations that can read the size while rendering should
    /// override this to load the source only once.
    fn render_scaled(&self, source: &Path, output: &Path, multiplier: f32) -> AssetResult<RenderedImage> {
        let metadata = self.metadata(source)?;
        self.render_png(source, output, scaled_width(metadata.width, multiplier))
    }
}

/// `natural * multiplier`, rounded to whole pixels and never below 1.
pub fn scaled_width(natural: f32, multiplier: f32) -> u32 {
    ((natural * multiplier).round() as u32).max(1)
}

/// Height matching `width` under the aspect ratio of `metadata`.
pub fn proportional_height(metadata: &ImageMetadata, width: u32) -> u32 {
    if metadata.width <= 0.0 {
        return 1;
    }
    ((metadata.height * width as f32 / metadata.width).round() as u32).max(1)
}

/// Renders SVG files with `resvg`.
#[derive(Clone)]
pub struct SvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for SvgRasterizer {
    /// No fonts loaded; `<text>` elements render as nothing.
    fn default() -> Self {
        Self { fontdb: Arc::new(usvg::fontdb::Database::new()) }
    }
}

impl SvgRasterizer {
    /// Rasterizer that can render `<text>` using the fonts installed on the host.
    pub fn with_system_fonts() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        debug!("Loaded {} system font faces", fontdb.len());
        Self { fontdb: Arc::new(fontdb) }
    }

    fn load_tree(&self, source: &Path) -> AssetResult<usvg::Tree> {
        let data = std::fs::read(source).map_err(|e| {
            AssetError::render(format!("Cannot read '{}': {e}", source.display()))
        })?;

        let mut opt = usvg::Options::default();
        // Relative image references resolve against the file's own directory.
        opt.resources_dir = std::fs::canonicalize(source)
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));
        opt.fontdb = Arc::clone(&self.fontdb);

        usvg::Tree::from_data(&data, &opt).map_err(|e| {
            AssetError::render(format!("Failed to parse '{}': {e}", source.display()))
        })
    }
}

impl Rasterizer for SvgRasterizer {
    fn metadata(&self, source: &Path) -> AssetResult<ImageMetadata> {
        let size = self.load_tree(source)?.size();
        Ok(ImageMetadata {
            width: size.width(),
            height: size.height(),
        })
    }

    fn render_png(&self, source: &Path, output: &Path, width: u32) -> AssetResult<RenderedImage> {
        let tree = self.load_tree(source)?;
        render_tree(&tree, output, width)
    }

    fn render_scaled(&self, source: &Path, output: &Path, multiplier: f32) -> AssetResult<RenderedImage> {
        let tree = self.load_tree(source)?;
        let width = scaled_width(tree.size().width(), multiplier);
        render_tree(&tree, output, width)
    }
}

fn render_tree(tree: &usvg::Tree, output: &Path, width: u32) -> AssetResult<RenderedImage> {
    let size = tree.size();
    let metadata = ImageMetadata {
        width: size.width(),
        height: size.height(),
    };
    let height = proportional_height(&metadata, width);
    let scale = width as f32 / metadata.width;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        AssetError::render(format!("Cannot allocate {width}×{height} pixmap"))
    })?;
    resvg::render(
        tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    pixmap.save_png(output).map_err(|e| {
        AssetError::render(format!("Failed to write '{}': {e}", output.display()))
    })?;

    debug!("Rendered '{}' at {}×{}", output.display(), width, height);

    Ok(RenderedImage {
        path: output.to_path_buf(),
        width,
        height,
    })
}
