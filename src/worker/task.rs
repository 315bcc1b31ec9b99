use std::path::PathBuf;
use serde::Serialize;
use crate::processing::{Rasterizer, RenderedImage};
use crate::utils::AssetResult;

/// One source file rendered for one platform variant.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenderTask {
    pub source: PathBuf,
    pub output: PathBuf,
    pub multiplier: f32,
}

impl RenderTask {
    /// Reads the source's natural width and renders it scaled by `multiplier`.
    ///
    /// Blocking; run it on a blocking thread.
    pub fn execute(&self, rasterizer: &dyn Rasterizer) -> AssetResult<RenderedImage> {
        rasterizer.render_scaled(&self.source, &self.output, self.multiplier)
    }
}
