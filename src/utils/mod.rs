//! Utility functions and helpers.

pub mod http;
pub mod log;

use std::sync::LazyLock;

use regex::Regex;

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year pattern is valid"));

/// Turn a protocol-relative asset URL (`//images...`) into an absolute one.
///
/// Returns `None` for empty URLs.
pub fn absolute_asset_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        None
    } else if url.starts_with("//") {
        Some(format!("https:{url}"))
    } else {
        Some(url.to_string())
    }
}

/// Extract a model year (first standalone 19xx/20xx) from a vehicle name.
pub fn extract_year(name: &str) -> Option<u16> {
    YEAR_PATTERN
        .find(name)
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_asset_url() {
        assert_eq!(
            absolute_asset_url("//images.example/a.jpg"),
            Some("https://images.example/a.jpg".to_string())
        );
        assert_eq!(
            absolute_asset_url("https://cdn.example/b.png"),
            Some("https://cdn.example/b.png".to_string())
        );
        assert_eq!(absolute_asset_url("  "), None);
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("Mercedes-AMG G63 2024"), Some(2024));
        assert_eq!(extract_year("1998 Porsche 911"), Some(1998));
        assert_eq!(extract_year("BMW X4"), None);
        assert_eq!(extract_year("Model 20245"), None);
        assert_eq!(extract_year("Ferrari Roma 2100"), None);
    }
}
