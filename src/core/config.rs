use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable overriding the number of concurrent renders.
pub const WORKERS_ENV: &str = "ASSETGEN_WORKERS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Maximum number of renders in flight at once
    pub workers: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

impl GeneratorConfig {
    /// Defaults, with `ASSETGEN_WORKERS` applied when set.
    pub fn from_env() -> Self {
        Self::with_workers_override(std::env::var(WORKERS_ENV).ok().as_deref())
    }

    fn with_workers_override(value: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = value {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.workers = n,
                _ => warn!("Ignoring invalid {}={:?}, using {} workers", WORKERS_ENV, raw, config.workers),
            }
        }
        config
    }
}
