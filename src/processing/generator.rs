//! Asset generation for one [`Job`].
//!
//! A run has two phases. Planning scans the input directory, fixes the
//! expected total and derives one [`RenderTask`] per source × variant.
//! Execution recreates the platform folder, hands the tasks to the
//! [`WorkerPool`] and streams completions to a [`ProgressReporter`].

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::{GeneratorConfig, Job, Platform, ProgressLine};
use crate::utils::{AssetError, AssetResult, PathError, is_svg_source, list_entries, recreate_dir};
use crate::worker::{RenderTask, WorkerPool};

use super::rasterizer::Rasterizer;
use super::reporter::ProgressReporter;

/// Work derived from the input directory before anything is written.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPlan {
    /// Every directory entry times the variant count, `.svg` or not
    pub expected_total: usize,
    pub tasks: Vec<RenderTask>,
}

/// Outcome of a finished run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub platform: Platform,
    pub platform_dir: PathBuf,
    pub expected_total: usize,
    pub completed: usize,
    /// Progress lines in the order they were printed
    pub lines: Vec<ProgressLine>,
}

pub struct AssetGenerator {
    job: Job,
    pool: WorkerPool,
}

impl AssetGenerator {
    pub fn new(job: Job, rasterizer: Arc<dyn Rasterizer>, config: &GeneratorConfig) -> Self {
        Self {
            job,
            pool: WorkerPool::new(rasterizer, config.workers),
        }
    }

    /// Scans the input directory and derives the render tasks.
    ///
    /// Non-`.svg` entries get no task but still count toward the expected total.
    pub async fn plan(&self) -> AssetResult<GenerationPlan> {
        let platform = self.job.platform();
        let variants = platform.variants();
        let platform_dir = self.job.platform_dir();

        let entries = list_entries(self.job.input_dir()).await?;
        let expected_total = entries.len() * variants.len();

        let mut tasks = Vec::new();
        for source in entries.iter().filter(|p| is_svg_source(p)) {
            // An `svg` extension implies a non-empty stem
            let Some(stem) = source.file_stem() else {
                continue;
            };
            for variant in variants {
                tasks.push(RenderTask {
                    source: source.clone(),
                    output: variant.output_path(&platform_dir, stem),
                    multiplier: variant.multiplier,
                });
            }
        }

        debug!(
            "Planned {} renders for {} ({} entries, expected total {})",
            tasks.len(),
            platform,
            entries.len(),
            expected_total
        );

        Ok(GenerationPlan { expected_total, tasks })
    }

    /// Generates every output, printing a progress line to `sink` per file.
    ///
    /// Destroys and recreates the platform folder first. The first render
    /// failure aborts the remaining work and is returned.
    pub async fn generate<W: Write + Send + 'static>(&self, sink: W) -> AssetResult<GenerationReport> {
        let plan = self.plan().await?;
        let platform = self.job.platform();
        let platform_dir = recreate_dir(self.job.platform_dir()).await?;

        for folder in platform.subfolders() {
            let dir = platform_dir.join(folder);
            tokio::fs::create_dir(&dir)
                .await
                .map_err(|e| PathError::prepare(&dir, e))?;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let reporter = ProgressReporter::new(plan.expected_total, sink).spawn(rx);

        let run = self.pool.run(plan.tasks, tx).await;
        // Lines for renders that finished before a failure are still flushed.
        // A failed write outranks the worker error it causes.
        let (counter, lines) = reporter
            .await
            .map_err(|e| AssetError::worker(format!("Progress reporter failed: {}", e)))??;
        run?;

        let report = GenerationReport {
            platform,
            platform_dir,
            expected_total: counter.total(),
            completed: counter.completed(),
            lines,
        };

        let summary = serde_json::json!({
            "platform": report.platform,
            "outputDir": report.platform_dir,
            "completed": report.completed,
            "expectedTotal": report.expected_total,
        });
        info!(%summary, "Asset generation finished");

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use crate::processing::{ImageMetadata, RenderedImage};

    /// Writes an empty file instead of rendering.
    struct TouchRasterizer;

    impl Rasterizer for TouchRasterizer {
        fn metadata(&self, _source: &Path) -> AssetResult<ImageMetadata> {
            Ok(ImageMetadata { width: 24.0, height: 24.0 })
        }

        fn render_png(&self, _source: &Path, output: &Path, width: u32) -> AssetResult<RenderedImage> {
            std::fs::write(output, b"")?;
            Ok(RenderedImage { path: output.to_path_buf(), width, height: width })
        }
    }

    fn generator(input: &Path, output: &Path, platform: &str) -> AssetGenerator {
        let job = Job::new(input, output, platform).unwrap();
        AssetGenerator::new(job, Arc::new(TouchRasterizer), &GeneratorConfig { workers: 2 })
    }

    #[tokio::test]
    async fn plan_counts_every_entry_but_renders_only_svg() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("home.svg"), "").unwrap();
        std::fs::write(input.path().join("notes.txt"), "").unwrap();
        std::fs::write(input.path().join("upper.SVG"), "").unwrap();

        let plan = generator(input.path(), output.path(), "ios").plan().await.unwrap();

        assert_eq!(plan.expected_total, 9);
        assert_eq!(plan.tasks.len(), 3);
        let platform_dir = output.path().join("iOSAssets");
        assert_eq!(plan.tasks[2].output, platform_dir.join("home@3x.png"));
        assert_eq!(plan.tasks[2].multiplier, 3.0);
    }

    #[tokio::test]
    async fn android_run_fills_every_bucket() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("logo.svg"), "").unwrap();

        let report = generator(input.path(), output.path(), "Android")
            .generate(std::io::sink())
            .await
            .unwrap();

        assert_eq!(report.completed, 6);
        assert_eq!(report.expected_total, 6);
        for bucket in ["ldpi", "mdpi", "hdpi", "xhdpi", "xxhdpi", "xxxhdpi"] {
            let file = output
                .path()
                .join("AndroidAssets")
                .join(format!("drawable-{bucket}"))
                .join("logo.png");
            assert!(file.exists(), "missing {}", file.display());
        }
    }

    /// Clonable in-memory stdout.
    #[derive(Clone, Default)]
    struct SharedSink(Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Renders everything except `broken.svg`.
    struct PickyRasterizer;

    impl Rasterizer for PickyRasterizer {
        fn metadata(&self, source: &Path) -> AssetResult<ImageMetadata> {
            if source.ends_with("broken.svg") {
                return Err(AssetError::render("unparsable"));
            }
            Ok(ImageMetadata { width: 24.0, height: 24.0 })
        }

        fn render_png(&self, _source: &Path, output: &Path, width: u32) -> AssetResult<RenderedImage> {
            std::fs::write(output, b"")?;
            Ok(RenderedImage { path: output.to_path_buf(), width, height: width })
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn lines_printed_before_a_failure_stay_consistent() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("a.svg"), "").unwrap();
        std::fs::write(input.path().join("broken.svg"), "").unwrap();
        std::fs::write(input.path().join("c.svg"), "").unwrap();

        let job = Job::new(input.path(), output.path(), "ios").unwrap();
        let generator = AssetGenerator::new(job, Arc::new(PickyRasterizer), &GeneratorConfig { workers: 1 });
        let sink = SharedSink::default();

        let err = generator.generate(sink.clone()).await.unwrap_err();
        assert!(matches!(err, AssetError::Render(_)));

        let printed = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = printed.lines().collect();
        // At most the two healthy sources finish, never the broken one.
        assert!(lines.len() <= 6);
        for (i, line) in lines.iter().enumerate() {
            let (ratio, path) = line.split_once(" : ").unwrap();
            assert_eq!(ratio, format!("Done: {} / 9", i + 1));
            assert!(Path::new(path).exists(), "{path}");
            assert!(!path.contains("broken"));
        }
    }

    /// Refuses every write, like stdout with its reader gone.
    struct ClosedStdout;

    impl Write for ClosedStdout {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failed_progress_write_fails_the_run() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("logo.svg"), "").unwrap();

        let err = generator(input.path(), output.path(), "android")
            .generate(ClosedStdout)
            .await
            .unwrap_err();

        assert!(matches!(err, AssetError::IO(_)), "unexpected {err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_utf8_names_are_rendered() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join(OsStr::from_bytes(b"ic\xffon.svg")), "").unwrap();

        let report = generator(input.path(), output.path(), "ios")
            .generate(std::io::sink())
            .await
            .unwrap();

        assert_eq!(report.completed, 3);
        let dir = output.path().join("iOSAssets");
        assert!(dir.join(OsStr::from_bytes(b"ic\xffon.png")).exists());
        assert!(dir.join(OsStr::from_bytes(b"ic\xffon@2x.png")).exists());
        assert!(dir.join(OsStr::from_bytes(b"ic\xffon@3x.png")).exists());
    }

    #[tokio::test]
    async fn missing_input_leaves_previous_output_alone() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let previous = output.path().join("iOSAssets");
        std::fs::create_dir(&previous).unwrap();
        std::fs::write(previous.join("keep.png"), "").unwrap();

        let missing = input.path().join("nope");
        let result = generator(&missing, output.path(), "ios").generate(std::io::sink()).await;

        assert!(matches!(result, Err(AssetError::Path(_))));
        assert!(previous.join("keep.png").exists());
    }
}
