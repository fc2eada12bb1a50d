//! The bounded-concurrency fetch engine.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::{info, warn};

use crate::index::ArtifactIndex;

use super::error::{FetchError, FetchResult};
use super::http::{HttpClient, HttpError, ReqwestClient};
use super::outcome::{ArtifactResult, FetchOutcome, FetchReport};

/// Hard ceiling on simultaneous transfers within one batch.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Downloads an index's artifacts into the local cache layout.
///
/// The engine is generic over [`HttpClient`] so tests can inject a mock;
/// production code uses [`FetchEngine::new`] which wires in a
/// [`ReqwestClient`].
#[derive(Debug)]
pub struct FetchEngine<C: HttpClient> {
    client: Arc<C>,
    concurrency: usize,
}

impl FetchEngine<ReqwestClient> {
    /// Create an engine with the default HTTP client and concurrency.
    pub fn new() -> FetchResult<Self> {
        Ok(Self::with_client(ReqwestClient::new()?))
    }
}

impl<C: HttpClient + 'static> FetchEngine<C> {
    /// Create an engine around the given client.
    pub fn with_client(client: C) -> Self {
        Self {
            client: Arc::new(client),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Set the worker pool size (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// The configured worker pool size.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Create the `binary_path/package/version` layout for every index entry.
    ///
    /// Re-running against an already-populated cache is a no-op: existing
    /// directories are never an error.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::CreateDirFailed`] if a directory cannot be
    /// created; this is a process-level failure that aborts the run.
    pub fn ensure_directories(
        &self,
        binary_path: &Path,
        index: &ArtifactIndex,
    ) -> FetchResult<()> {
        for (package, version, _) in index.iter() {
            let dir = binary_path.join(package).join(version);
            fs::create_dir_all(&dir).map_err(|e| FetchError::CreateDirFailed {
                path: dir.clone(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Download one version's URLs into `dest_dir`.
    ///
    /// A fixed pool of worker threads drains the URL queue, so at most
    /// [`FetchEngine::concurrency`] transfers are in flight at once. Every
    /// worker is joined before the call returns: each URL has a terminal
    /// outcome in the report, and a failed transfer never aborts the rest
    /// of the batch.
    pub fn fetch_version(&self, dest_dir: &Path, urls: &[String]) -> FetchReport {
        let mut report = FetchReport::new();
        if urls.is_empty() {
            return report;
        }

        let queue: VecDeque<(usize, String)> = urls.iter().cloned().enumerate().collect();
        let queue = Arc::new(Mutex::new(queue));
        let slots: Arc<Mutex<Vec<Option<ArtifactResult>>>> =
            Arc::new(Mutex::new(vec![None; urls.len()]));

        let workers = self.concurrency.min(urls.len());
        let mut handles = Vec::with_capacity(workers);

        for _ in 0..workers {
            let queue = Arc::clone(&queue);
            let slots = Arc::clone(&slots);
            let client = Arc::clone(&self.client);
            let dest_dir = dest_dir.to_path_buf();

            handles.push(thread::spawn(move || loop {
                let job = queue.lock().unwrap().pop_front();
                let Some((slot, url)) = job else {
                    break;
                };

                let dest = dest_dir.join(artifact_filename(&url));
                let outcome = fetch_one(client.as_ref(), &url, &dest);
                slots.lock().unwrap()[slot] = Some(ArtifactResult { url, dest, outcome });
            }));
        }

        // Join every worker: all outcomes are terminal before returning.
        for handle in handles {
            handle.join().ok();
        }

        let mut slots = slots.lock().unwrap();
        for (i, slot) in slots.drain(..).enumerate() {
            report.record(slot.unwrap_or_else(|| ArtifactResult {
                url: urls[i].clone(),
                dest: dest_dir.join(artifact_filename(&urls[i])),
                outcome: FetchOutcome::Failed {
                    reason: "worker terminated before completion".to_string(),
                },
            }));
        }

        report
    }

    /// Materialize a whole index: ensure the layout, then fetch each
    /// package/version batch in turn.
    ///
    /// # Errors
    ///
    /// Only process-level failures (directory creation) are errors; the
    /// returned report carries every per-artifact outcome.
    pub fn fetch_all(
        &self,
        binary_path: &Path,
        index: &ArtifactIndex,
    ) -> FetchResult<FetchReport> {
        self.ensure_directories(binary_path, index)?;

        let mut report = FetchReport::new();
        for (package, version, urls) in index.iter() {
            let dest_dir = binary_path.join(package).join(version);
            report.extend(self.fetch_version(&dest_dir, urls));
        }

        Ok(report)
    }
}

/// The local filename an artifact URL maps to.
fn artifact_filename(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Fetch one URL to one destination path.
///
/// The body is written to a `.part` sibling and renamed into place, so a
/// failure mid-stream never leaves a partial file at the destination.
/// Every outcome is logged on one line.
fn fetch_one<C: HttpClient + ?Sized>(client: &C, url: &str, dest: &Path) -> FetchOutcome {
    match client.get(url) {
        Ok(body) => match write_atomic(dest, &body) {
            Ok(()) => {
                info!(url, bytes = body.len(), "downloaded artifact");
                FetchOutcome::Done {
                    bytes: body.len() as u64,
                }
            }
            Err(e) => {
                warn!(url, error = %e, "failed to store artifact");
                FetchOutcome::Failed {
                    reason: format!("failed to write {}: {}", dest.display(), e),
                }
            }
        },
        Err(HttpError::NotFound) => {
            warn!(url, "artifact not found");
            FetchOutcome::Failed {
                reason: "not found".to_string(),
            }
        }
        Err(e) => {
            warn!(url, error = %e, "artifact download failed");
            FetchOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Write `body` to `dest` via a temporary sibling and rename.
fn write_atomic(dest: &Path, body: &[u8]) -> io::Result<()> {
    let part = part_path(dest);

    if let Err(e) = fs::write(&part, body) {
        fs::remove_file(&part).ok();
        return Err(e);
    }
    if let Err(e) = fs::rename(&part, dest) {
        fs::remove_file(&part).ok();
        return Err(e);
    }
    Ok(())
}

/// The temporary sibling path used during an atomic write.
fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}
