//! Bundle naming conventions.
//!
//! This module is the single source of truth for bundle archive names and
//! the fixed top-level directory the artifact tree occupies inside an
//! archive. Other modules use these helpers rather than constructing names
//! directly.

use chrono::{DateTime, Utc};

/// Fixed top-level directory name for the artifact tree inside a bundle.
pub const ARTIFACT_DIR: &str = "binaries";

/// Timestamp layout for bundle filenames: two-digit year, day and month,
/// then dotted time.
const STAMP_FORMAT: &str = "%y.%d.%m-%H.%M.%S";

/// Generate the archive filename for a bundle.
///
/// # Format
///
/// `{bundle}-{YY}.{DD}.{MM}-{HH}.{MM}.{SS}.zip`
///
/// # Examples
///
/// ```
/// use binstack::bundle::bundle_filename;
/// use chrono::{TimeZone, Utc};
///
/// let stamp = Utc.with_ymd_and_hms(2014, 3, 7, 16, 5, 9).unwrap();
/// assert_eq!(bundle_filename("binstack", &stamp), "binstack-14.07.03-16.05.09.zip");
/// ```
pub fn bundle_filename(bundle: &str, stamp: &DateTime<Utc>) -> String {
    format!("{}-{}.zip", bundle, stamp.format(STAMP_FORMAT))
}

/// The file-scheme base URL addressing the bundled artifact tree.
///
/// This is the value written into the embedded pack configuration in place
/// of the remote download base.
pub fn local_base_url() -> String {
    format!("file://{}", ARTIFACT_DIR)
}
