use std::io::Write;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use crate::core::{ProgressCounter, ProgressLine};
use crate::processing::RenderedImage;
use crate::utils::AssetResult;

/// Single consumer of render completions.
///
/// Owns the [`ProgressCounter`], so increments are serialized by construction.
/// Every completion becomes a `Done: ...` line on `sink`.
pub struct ProgressReporter<W> {
    counter: ProgressCounter,
    sink: W,
    lines: Vec<ProgressLine>,
}

impl<W: Write + Send + 'static> ProgressReporter<W> {
    pub fn new(expected_total: usize, sink: W) -> Self {
        Self {
            counter: ProgressCounter::new(expected_total),
            sink,
            lines: Vec::new(),
        }
    }

    /// Records one completion and writes its line.
    ///
    /// A failed write is returned; the line is still counted.
    pub fn handle_completion(&mut self, image: RenderedImage) -> AssetResult<()> {
        let line = self.counter.advance(image.path);
        let written = writeln!(self.sink, "{line}").and_then(|_| self.sink.flush());
        self.lines.push(line);
        Ok(written?)
    }

    /// Drains `completions` on a blocking thread until every sender is gone.
    ///
    /// Stops at the first failed write, which closes the channel and fails
    /// the workers' next send.
    pub fn spawn(
        mut self,
        mut completions: mpsc::UnboundedReceiver<RenderedImage>,
    ) -> JoinHandle<AssetResult<(ProgressCounter, Vec<ProgressLine>)>> {
        tokio::task::spawn_blocking(move || {
            while let Some(image) = completions.blocking_recv() {
                self.handle_completion(image)?;
            }
            Ok((self.counter, self.lines))
        })
    }
}
