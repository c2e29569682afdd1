//! Long URL validation.
//!
//! Only absolute `http` and `https` URLs with a host are accepted as redirect
//! targets. The URL is stored as submitted (surrounding whitespace aside) so
//! the redirect target matches what the caller sent. Since that stored text
//! becomes a `Location` header verbatim, control characters are rejected
//! even where the URL parser would silently drop them.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates a long URL and returns the value to store.
///
/// # Security
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`, etc.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed URLs and for
/// input containing control characters.
/// Returns [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
/// Returns [`UrlValidationError::MissingHost`] when no host is present.
pub fn validate_long_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat(
            "URL contains control characters".to_string(),
        ));
    }

    let url =
        Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https() {
        assert_eq!(
            validate_long_url("https://example.com/article").unwrap(),
            "https://example.com/article"
        );
    }

    #[test]
    fn test_accepts_http_with_port_and_query() {
        assert_eq!(
            validate_long_url("http://example.com:8080/path?key=value#frag").unwrap(),
            "http://example.com:8080/path?key=value#frag"
        );
    }

    #[test]
    fn test_preserves_input_verbatim() {
        assert_eq!(
            validate_long_url("https://EXAMPLE.com").unwrap(),
            "https://EXAMPLE.com"
        );
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            validate_long_url("  https://example.com/x \n").unwrap(),
            "https://example.com/x"
        );
    }

    #[test]
    fn test_rejects_embedded_control_characters() {
        for input in [
            "https://example.com/a\nb",
            "https://example.com/a\tb",
            "https://exa\rmple.com",
            "https://example.com/\u{7f}",
        ] {
            assert!(
                matches!(
                    validate_long_url(input),
                    Err(UrlValidationError::InvalidFormat(_))
                ),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_accepts_non_ascii_path() {
        assert_eq!(
            validate_long_url("https://example.com/caf\u{e9}").unwrap(),
            "https://example.com/caf\u{e9}"
        );
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(
            validate_long_url("not-a-url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(validate_long_url("/relative/path").is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(validate_long_url("").is_err());
    }

    #[test]
    fn test_rejects_javascript_protocol() {
        assert!(matches!(
            validate_long_url("javascript:alert(1)"),
            Err(UrlValidationError::UnsupportedProtocol)
        ));
    }

    #[test]
    fn test_rejects_other_protocols() {
        for input in ["ftp://example.com", "file:///etc/passwd", "data:text/plain,hi"] {
            assert!(
                matches!(
                    validate_long_url(input),
                    Err(UrlValidationError::UnsupportedProtocol)
                ),
                "{input} should be rejected"
            );
        }
    }
}
