//! Image URL value object and shared URL normalization.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// URL of an image depicting a problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates an ImageUrl, normalizing and validating the raw value.
    pub fn new(url: impl Into<String>) -> Result<Self, ValidationError> {
        let normalized = normalize_url("image", &url.into())?;
        Ok(Self(normalized))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalizes an http(s) URL: trims whitespace and lowercases the scheme
/// and host so equivalent spellings compare equal.
pub(crate) fn normalize_url(field: &str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let length = trimmed.chars().count();
    if length > 2048 {
        return Err(ValidationError::too_long(field, 2048, length));
    }
    let (scheme, remainder) = trimmed
        .split_once("://")
        .ok_or_else(|| ValidationError::invalid_format(field, "expected an http or https URL"))?;
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return Err(ValidationError::invalid_format(
            field,
            "expected an http or https URL",
        ));
    }
    let host_end = remainder
        .find(['/', '?', '#'])
        .unwrap_or(remainder.len());
    let (host, rest) = remainder.split_at(host_end);
    if host.is_empty() {
        return Err(ValidationError::invalid_format(field, "missing host"));
    }
    Ok(format!(
        "{}://{}{}",
        scheme.to_ascii_lowercase(),
        host.to_ascii_lowercase(),
        rest
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_accepts_https() {
        let url = ImageUrl::new("https://example.org/images/drought.jpg").unwrap();
        assert_eq!(url.as_str(), "https://example.org/images/drought.jpg");
    }

    #[test]
    fn image_url_lowercases_scheme_and_host() {
        let url = ImageUrl::new("HTTPS://Example.ORG/Images/Drought.JPG").unwrap();
        assert_eq!(url.as_str(), "https://example.org/Images/Drought.JPG");
    }

    #[test]
    fn image_url_trims_whitespace() {
        let url = ImageUrl::new("  http://example.org/a.png  ").unwrap();
        assert_eq!(url.as_str(), "http://example.org/a.png");
    }

    #[test]
    fn image_url_rejects_non_http_scheme() {
        assert!(ImageUrl::new("ftp://example.org/a.png").is_err());
        assert!(ImageUrl::new("example.org/a.png").is_err());
    }

    #[test]
    fn image_url_rejects_empty_value() {
        match ImageUrl::new("  ") {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "image"),
            _ => panic!("Expected EmptyField error"),
        }
    }

    #[test]
    fn normalize_url_rejects_missing_host() {
        assert!(normalize_url("definition_url", "http:///path").is_err());
    }

    #[test]
    fn normalize_url_rejects_overlong_value() {
        let raw = format!("http://example.org/{}", "x".repeat(2048));
        match normalize_url("definition_url", &raw) {
            Err(ValidationError::TooLong { field, max, .. }) => {
                assert_eq!(field, "definition_url");
                assert_eq!(max, 2048);
            }
            _ => panic!("Expected TooLong error"),
        }
    }

    #[test]
    fn normalize_url_preserves_query_string() {
        let url = normalize_url("definition_url", "http://Example.org/page?Q=1#Frag").unwrap();
        assert_eq!(url, "http://example.org/page?Q=1#Frag");
    }
}
