//! Job definition and creation.

use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::core::Platform;
use crate::utils::AssetResult;

/// One generation run: where sources live, where outputs go, and for which platform.
///
/// Built once from command-line arguments and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    input_dir: PathBuf,
    output_dir: PathBuf,
    platform: Platform,
}

impl Job {
    /// Fails with [`AssetError::UnsupportedPlatform`](crate::utils::AssetError::UnsupportedPlatform)
    /// when `platform` is not a known profile.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        platform: &str,
    ) -> AssetResult<Self> {
        Ok(Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            platform: platform.parse()?,
        })
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// `<output_dir>/iOSAssets` or `<output_dir>/AndroidAssets`
    pub fn platform_dir(&self) -> PathBuf {
        self.output_dir.join(self.platform.folder_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_dir_follows_platform() {
        let job = Job::new("in", "out", "Android").unwrap();
        assert_eq!(job.platform(), Platform::Android);
        assert_eq!(job.platform_dir(), Path::new("out").join("AndroidAssets"));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        assert!(Job::new("in", "out", "windows").is_err());
    }
}
