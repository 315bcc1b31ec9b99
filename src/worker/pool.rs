use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use crate::processing::{Rasterizer, RenderedImage};
use crate::worker::RenderTask;
use crate::utils::{AssetError, AssetResult};
use tracing::{debug, warn};

/// Runs render tasks on tokio's blocking pool with a cap on how many are in flight.
///
/// The first failure aborts every task that has not finished yet.
#[derive(Clone)]
pub struct WorkerPool {
    rasterizer: Arc<dyn Rasterizer>,
    semaphore: Arc<Semaphore>,
    worker_count: usize,
}

impl WorkerPool {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        Self {
            rasterizer,
            semaphore: Arc::new(Semaphore::new(worker_count)),
            worker_count,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Dispatches all `tasks` and waits for them.
    ///
    /// Each successful render is sent on `completions` as soon as its file is
    /// written. Returns the number of completed renders, or the first error.
    /// A task that gets its permit after a failure returns without rendering.
    pub async fn run(
        &self,
        tasks: Vec<RenderTask>,
        completions: mpsc::UnboundedSender<RenderedImage>,
    ) -> AssetResult<usize> {
        debug!("Dispatching {} render tasks on {} workers", tasks.len(), self.worker_count);

        // Set while the failing task still holds its permit, so every later
        // permit holder sees it.
        let failed = Arc::new(AtomicBool::new(false));

        let mut set = JoinSet::new();
        for task in tasks {
            let semaphore = Arc::clone(&self.semaphore);
            let rasterizer = Arc::clone(&self.rasterizer);
            let completions = completions.clone();
            let failed = Arc::clone(&failed);

            set.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| AssetError::worker(format!("Failed to acquire worker: {}", e)))?;
                if failed.load(Ordering::SeqCst) {
                    return Ok(false);
                }

                let rendered = match tokio::task::spawn_blocking(move || task.execute(rasterizer.as_ref())).await {
                    Ok(Ok(rendered)) => rendered,
                    Ok(Err(e)) => {
                        failed.store(true, Ordering::SeqCst);
                        return Err(e);
                    }
                    Err(e) => {
                        failed.store(true, Ordering::SeqCst);
                        return Err(e.into());
                    }
                };

                if completions.send(rendered).is_err() {
                    failed.store(true, Ordering::SeqCst);
                    return Err(AssetError::worker("Progress reporter stopped"));
                }
                Ok::<bool, AssetError>(true)
            });
        }
        drop(completions);

        let mut completed = 0;
        while let Some(joined) = set.join_next().await {
            let outcome = match joined {
                Ok(result) => result,
                Err(e) if e.is_cancelled() => continue,
                Err(e) => Err(e.into()),
            };

            match outcome {
                Ok(true) => completed += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!("Render failed, aborting {} remaining tasks: {}", set.len(), e);
                    set.abort_all();
                    return Err(e);
                }
            }
        }

        Ok(completed)
    }
}
