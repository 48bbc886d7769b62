use thiserror::Error;

/// Scheme prefix of the `Authorization` header. Case-sensitive, exactly one
/// space separator.
pub const BEARER_PREFIX: &str = "Bearer ";

// Classified bearer-extraction failures. Both are client faults and map to
// 401 at the middleware boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("auth header missing")]
    MissingHeader,
    #[error("invalid header")]
    InvalidScheme,
}

/// Extract the raw bearer token from an `Authorization` header value.
///
/// Returns the substring after `"Bearer "` unmodified: no trimming and no
/// token-syntax validation. Whether the token means anything is the
/// introspection endpoint's call, not ours.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, ExtractionError> {
    let header = header
        .filter(|v| !v.is_empty())
        .ok_or(ExtractionError::MissingHeader)?;

    header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(ExtractionError::InvalidScheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header() {
        assert_eq!(extract_bearer(None), Err(ExtractionError::MissingHeader));
    }

    #[test]
    fn empty_header() {
        assert_eq!(extract_bearer(Some("")), Err(ExtractionError::MissingHeader));
    }

    #[test]
    fn wrong_scheme() {
        assert_eq!(
            extract_bearer(Some("Basic dXNlcjpwdw==")),
            Err(ExtractionError::InvalidScheme)
        );
    }

    #[test]
    fn scheme_is_case_sensitive() {
        assert_eq!(
            extract_bearer(Some("bearer abc")),
            Err(ExtractionError::InvalidScheme)
        );
    }

    #[test]
    fn prefix_without_separator() {
        assert_eq!(
            extract_bearer(Some("Bearer")),
            Err(ExtractionError::InvalidScheme)
        );
    }

    #[test]
    fn returns_token_unmodified() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
    }

    #[test]
    fn keeps_internal_whitespace() {
        assert_eq!(extract_bearer(Some("Bearer a b  c")), Ok("a b  c"));
    }

    #[test]
    fn empty_token_after_prefix_is_extracted() {
        // An empty token is syntactically a bearer header; introspection will
        // report it inactive.
        assert_eq!(extract_bearer(Some("Bearer ")), Ok(""));
    }
}
