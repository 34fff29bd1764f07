use thiserror::Error;
use url::Url;

use crate::error::FeedError;

/// Errors that can occur when an absolute URI is required.
#[derive(Error, Debug)]
pub enum UriError {
    /// The URI string could not be parsed.
    #[error("Invalid URI: {0}")]
    InvalidUri(#[from] url::ParseError),
    /// The URI has no host component.
    #[error("URI has no host: {0}")]
    MissingHost(String),
}

impl From<UriError> for FeedError {
    fn from(err: UriError) -> Self {
        FeedError::Argument(err.to_string())
    }
}

/// Checks that a string is usable as a feed URI and returns it unchanged.
///
/// Feeds carry both absolute URIs and relative references, so both are
/// accepted:
/// - absolute URIs must parse with [`Url::parse`]
/// - relative references must be non-empty and free of whitespace
///
/// The original text is returned so that it round-trips byte for byte.
///
/// # Examples
///
/// ```
/// use syndication::util::parse_uri;
///
/// assert_eq!(parse_uri("http://example.com/"), Some("http://example.com/"));
/// assert_eq!(parse_uri("/2017/07/post.html"), Some("/2017/07/post.html"));
/// assert_eq!(parse_uri("http://[::1"), None);
/// assert_eq!(parse_uri(""), None);
/// ```
pub fn parse_uri(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    match Url::parse(trimmed) {
        Ok(_) => Some(trimmed),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            if trimmed.chars().any(char::is_whitespace) {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

/// Parses a URI that must be absolute and carry a host.
///
/// # Errors
///
/// Returns [`UriError`] if the URI cannot be parsed, is relative, or has no host.
pub fn require_absolute(value: &str) -> Result<Url, UriError> {
    let url = Url::parse(value.trim())?;
    if url.host_str().is_none() {
        return Err(UriError::MissingHost(value.to_owned()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_uris_accepted() {
        assert_eq!(parse_uri("http://example.com/"), Some("http://example.com/"));
        assert_eq!(
            parse_uri("urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6"),
            Some("urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6")
        );
        assert_eq!(parse_uri("mailto:john@example.com"), Some("mailto:john@example.com"));
    }

    #[test]
    fn test_relative_references_accepted() {
        assert_eq!(parse_uri("/feed.xml"), Some("/feed.xml"));
        assert_eq!(parse_uri("item?id=4"), Some("item?id=4"));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(parse_uri("  http://example.com/  "), Some("http://example.com/"));
    }

    #[test]
    fn test_invalid_uris_rejected() {
        assert_eq!(parse_uri(""), None);
        assert_eq!(parse_uri("   "), None);
        assert_eq!(parse_uri("not a uri"), None);
        assert_eq!(parse_uri("http://[::1"), None);
    }

    #[test]
    fn test_require_absolute() {
        let url = require_absolute("http://rpc.example.com:8080/RPC2?x=1").unwrap();
        assert_eq!(url.host_str(), Some("rpc.example.com"));
        assert_eq!(url.port(), Some(8080));

        assert!(matches!(
            require_absolute("/RPC2"),
            Err(UriError::InvalidUri(url::ParseError::RelativeUrlWithoutBase))
        ));
        assert!(matches!(
            require_absolute("mailto:john@example.com"),
            Err(UriError::MissingHost(_))
        ));
    }

    #[test]
    fn test_uri_error_converts_to_argument_error() {
        let err: FeedError = require_absolute("/relative").unwrap_err().into();
        assert!(matches!(err, FeedError::Argument(_)));
    }
}
