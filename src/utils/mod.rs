pub mod error;
pub mod fs;

pub use error::{AssetError, AssetResult, PathError};
pub use fs::{is_svg_source, list_entries, recreate_dir};
