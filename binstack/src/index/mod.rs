//! Artifact index construction and serialization.
//!
//! The index is the contract between the repository side and the consumer
//! side of the tool: a JSON object mapping
//! `package -> version -> [download URL]`. It is built fresh from the
//! current directory state by [`IndexBuilder`], written as pretty-printed
//! JSON, and later read back verbatim to drive a fetch run.

mod builder;
mod error;
mod model;

pub use builder::IndexBuilder;
pub use error::{IndexError, IndexResult};
pub use model::ArtifactIndex;

/// Default index filename for a latest-per-family index.
pub const LATEST_INDEX_FILENAME: &str = "index-latest.json";

/// Default index filename for an index of every version present.
pub const FULL_INDEX_FILENAME: &str = "index-all.json";
