mod generator;
mod rasterizer;
mod reporter;

pub use generator::{AssetGenerator, GenerationPlan, GenerationReport};
pub use rasterizer::{
    ImageMetadata, Rasterizer, RenderedImage, SvgRasterizer, proportional_height, scaled_width,
};
pub use reporter::ProgressReporter;
