//! Terminal outcome accounting for fetch batches.

use std::path::PathBuf;

/// Terminal state of one artifact transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The body was written to the destination path.
    Done {
        /// Bytes written.
        bytes: u64,
    },
    /// The transfer failed; the destination path was left untouched.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

impl FetchOutcome {
    /// Whether the transfer completed.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}

/// The terminal outcome of one URL within a batch.
#[derive(Debug, Clone)]
pub struct ArtifactResult {
    /// The URL that was fetched.
    pub url: String,
    /// The local destination path.
    pub dest: PathBuf,
    /// How the transfer ended.
    pub outcome: FetchOutcome,
}

/// Accounting for a fetch run.
///
/// Every URL handed to the engine appears exactly once; the batch call
/// does not return until all of them are terminal.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    results: Vec<ArtifactResult>,
}

impl FetchReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one terminal result.
    pub fn record(&mut self, result: ArtifactResult) {
        self.results.push(result);
    }

    /// Fold another report into this one.
    pub fn extend(&mut self, other: FetchReport) {
        self.results.extend(other.results);
    }

    /// All recorded results.
    pub fn results(&self) -> &[ArtifactResult] {
        &self.results
    }

    /// Total number of URLs with a terminal outcome.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of completed transfers.
    pub fn completed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_done()).count()
    }

    /// Number of failed transfers.
    pub fn failed(&self) -> usize {
        self.total() - self.completed()
    }

    /// Whether any transfer failed.
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Iterate over failed results.
    pub fn failures(&self) -> impl Iterator<Item = &ArtifactResult> {
        self.results.iter().filter(|r| !r.outcome.is_done())
    }

    /// Total bytes written by completed transfers.
    pub fn bytes_downloaded(&self) -> u64 {
        self.results
            .iter()
            .filter_map(|r| match r.outcome {
                FetchOutcome::Done { bytes } => Some(bytes),
                FetchOutcome::Failed { .. } => None,
            })
            .sum()
    }
}
