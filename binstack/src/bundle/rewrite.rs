//! Download-URL rewriting for the embedded pack configuration.

use ini::Ini;

use super::error::{BundleError, BundleResult};

/// Section of the pack configuration holding the download base.
const REPOSITORY_SECTION: &str = "repository";

/// Key holding the download base URL.
const BASE_URL_KEY: &str = "base_url";

/// Rewrite the download base URL in INI configuration text.
///
/// The `[repository] base_url` value is replaced with `new_base`; every
/// other section and key is carried over unchanged. The rewritten text is
/// what gets embedded in a bundle, so a deployed pack resolves artifacts
/// locally.
pub fn rewrite_base_url(config_text: &str, new_base: &str) -> BundleResult<String> {
    let mut config = Ini::load_from_str(config_text)
        .map_err(|e| BundleError::ConfigRewrite(e.to_string()))?;

    config
        .with_section(Some(REPOSITORY_SECTION))
        .set(BASE_URL_KEY, new_base);

    let mut out = Vec::new();
    config
        .write_to(&mut out)
        .map_err(|e| BundleError::ConfigRewrite(e.to_string()))?;

    String::from_utf8(out).map_err(|e| BundleError::ConfigRewrite(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "\
[repository]
base_url=https://downloads.example.com/stacks
stack=linux-x86_64
";

    #[test]
    fn test_rewrite_replaces_base_url() {
        let rewritten = rewrite_base_url(CONFIG, "file://binaries").unwrap();

        let parsed = Ini::load_from_str(&rewritten).unwrap();
        let section = parsed.section(Some("repository")).unwrap();
        assert_eq!(section.get("base_url"), Some("file://binaries"));
    }

    #[test]
    fn test_rewrite_preserves_other_keys() {
        let rewritten = rewrite_base_url(CONFIG, "file://binaries").unwrap();

        let parsed = Ini::load_from_str(&rewritten).unwrap();
        let section = parsed.section(Some("repository")).unwrap();
        assert_eq!(section.get("stack"), Some("linux-x86_64"));
    }

    #[test]
    fn test_rewrite_adds_missing_section() {
        let rewritten = rewrite_base_url("", "file://binaries").unwrap();

        let parsed = Ini::load_from_str(&rewritten).unwrap();
        let section = parsed.section(Some("repository")).unwrap();
        assert_eq!(section.get("base_url"), Some("file://binaries"));
    }

    #[test]
    fn test_rewrite_rejects_malformed_input() {
        let result = rewrite_base_url("[unclosed", "file://binaries");
        assert!(matches!(result, Err(BundleError::ConfigRewrite(_))));
    }
}
