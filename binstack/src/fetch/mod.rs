//! Bounded-concurrency artifact fetching.
//!
//! The fetch engine materializes an [`crate::index::ArtifactIndex`] onto
//! local disk. Each artifact URL moves through
//! `Pending -> InFlight -> { Done, Failed }`; there are no retries, and a
//! failed artifact never aborts the rest of its batch.
//!
//! # Architecture
//!
//! ```text
//! FetchEngine
//!     │
//!     ├── HttpClient (trait)
//!     │       └── ReqwestClient
//!     │
//!     ├── worker pool (fixed size, default 4)
//!     │
//!     └── FetchReport (terminal outcome per URL)
//! ```
//!
//! Within one batch at most `concurrency` transfers are in flight; the
//! batch call joins every worker before returning, so every outcome in the
//! report is terminal.

mod engine;
mod error;
mod http;
mod outcome;

pub use engine::{FetchEngine, DEFAULT_CONCURRENCY};
pub use error::{FetchError, FetchResult};
pub use http::{HttpClient, HttpError, ReqwestClient};
pub use outcome::{ArtifactResult, FetchOutcome, FetchReport};
