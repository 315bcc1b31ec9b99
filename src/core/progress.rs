use std::fmt;
use std::path::PathBuf;
use serde::Serialize;

/// Completed/expected counter for one run.
///
/// The total is fixed at construction. Only the progress reporter owns and
/// advances it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressCounter {
    total: usize,
    completed: usize,
}

impl ProgressCounter {
    pub fn new(total: usize) -> Self {
        Self { total, completed: 0 }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Counts one finished output and returns its progress line.
    ///
    /// Saturates at `total`: extra completions repeat `total / total`.
    pub fn advance(&mut self, output_path: PathBuf) -> ProgressLine {
        self.completed = (self.completed + 1).min(self.total);
        ProgressLine {
            completed: self.completed,
            total: self.total,
            output_path,
        }
    }
}

/// `Done: <completed> / <total> : <output path>`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressLine {
    pub completed: usize,
    pub total: usize,
    pub output_path: PathBuf,
}

impl fmt::Display for ProgressLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done: {} / {} : {}",
            self.completed,
            self.total,
            self.output_path.display()
        )
    }
}
