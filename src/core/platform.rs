//! Compiled-in platform profiles.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use serde::Serialize;
use crate::utils::AssetError;

/// One output a platform requires per source image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Variant {
    /// Subfolder below the platform folder; empty when files sit directly in it
    pub folder: &'static str,
    /// Width multiplier relative to the source's natural width
    pub multiplier: f32,
    /// Appended to the file stem before `.png`
    pub suffix: &'static str,
}

impl Variant {
    /// `<platform_dir>/<folder>/<stem><suffix>.png`
    ///
    /// `stem` need not be UTF-8.
    pub fn output_path(&self, platform_dir: &Path, stem: &OsStr) -> PathBuf {
        let mut file_name = OsString::from(stem);
        file_name.push(self.suffix);
        file_name.push(".png");

        let mut path = platform_dir.to_path_buf();
        if !self.folder.is_empty() {
            path.push(self.folder);
        }
        path.push(file_name);
        path
    }
}

const IOS_VARIANTS: [Variant; 3] = [
    Variant { folder: "", multiplier: 1.0, suffix: "" },
    Variant { folder: "", multiplier: 2.0, suffix: "@2x" },
    Variant { folder: "", multiplier: 3.0, suffix: "@3x" },
];

const ANDROID_VARIANTS: [Variant; 6] = [
    Variant { folder: "drawable-ldpi", multiplier: 0.75, suffix: "" },
    Variant { folder: "drawable-mdpi", multiplier: 1.0, suffix: "" },
    Variant { folder: "drawable-hdpi", multiplier: 1.5, suffix: "" },
    Variant { folder: "drawable-xhdpi", multiplier: 2.0, suffix: "" },
    Variant { folder: "drawable-xxhdpi", multiplier: 3.0, suffix: "" },
    Variant { folder: "drawable-xxxhdpi", multiplier: 4.0, suffix: "" },
];

/// Target platform of an asset run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    /// Name of the folder created under the output directory
    pub fn folder_name(&self) -> &'static str {
        match self {
            Self::Ios => "iOSAssets",
            Self::Android => "AndroidAssets",
        }
    }

    /// Ordered variant table for this platform
    pub fn variants(&self) -> &'static [Variant] {
        match self {
            Self::Ios => &IOS_VARIANTS,
            Self::Android => &ANDROID_VARIANTS,
        }
    }

    /// Distinct subfolders that must exist before rendering, in table order.
    pub fn subfolders(&self) -> Vec<&'static str> {
        let mut folders: Vec<&'static str> = Vec::new();
        for variant in self.variants() {
            if !variant.folder.is_empty() && !folders.contains(&variant.folder) {
                folders.push(variant.folder);
            }
        }
        folders
    }
}

impl FromStr for Platform {
    type Err = AssetError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            _ => Err(AssetError::UnsupportedPlatform(name.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ios => write!(f, "ios"),
            Self::Android => write!(f, "android"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("ANDROID".parse::<Platform>().unwrap(), Platform::Android);
    }

    #[test]
    fn rejects_unknown_platform_by_original_name() {
        let err = "Windows".parse::<Platform>().unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedPlatform(ref name) if name == "Windows"));
    }

    #[test]
    fn ios_outputs_share_one_folder() {
        let dir = Path::new("out/iOSAssets");
        let paths: Vec<_> = Platform::Ios
            .variants()
            .iter()
            .map(|v| v.output_path(dir, OsStr::new("home")))
            .collect();
        assert_eq!(
            paths,
            vec![
                dir.join("home.png"),
                dir.join("home@2x.png"),
                dir.join("home@3x.png"),
            ]
        );
        assert!(Platform::Ios.subfolders().is_empty());
    }

    #[test]
    fn android_has_one_bucket_per_density() {
        let multipliers: Vec<f32> = Platform::Android.variants().iter().map(|v| v.multiplier).collect();
        assert_eq!(multipliers, vec![0.75, 1.0, 1.5, 2.0, 3.0, 4.0]);
        assert_eq!(Platform::Android.subfolders().len(), 6);

        let dir = Path::new("out/AndroidAssets");
        let ldpi = Platform::Android.variants()[0].output_path(dir, OsStr::new("home"));
        assert_eq!(ldpi, dir.join("drawable-ldpi").join("home.png"));
    }
}
