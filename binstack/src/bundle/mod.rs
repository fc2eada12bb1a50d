//! Distributable bundle assembly.
//!
//! A bundle is a single zip archive carrying a fully populated artifact
//! tree (under the fixed top-level name `binaries/`) together with the
//! build pack's own support directories. The pack configuration file is
//! embedded with its download base URL rewritten to a local `file://`
//! path, so the deployed pack resolves artifacts from the bundle instead
//! of the network.
//!
//! Packaging has no concurrency of its own: it consumes a directory the
//! fetch engine has already fully populated.

mod error;
mod naming;
mod packager;
mod rewrite;

pub use error::{BundleError, BundleResult};
pub use naming::{bundle_filename, local_base_url, ARTIFACT_DIR};
pub use packager::{build_bundle, BundleBuildResult, BundleLayout};
pub use rewrite::rewrite_base_url;
