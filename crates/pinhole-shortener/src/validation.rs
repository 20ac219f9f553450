use pinhole_core::ShortenerError;
use url::Url;

/// Validates that the URL is absolute and has a host.
///
/// Any scheme is accepted as long as the URL names a host, which rules out
/// `javascript:`, `data:` and similar host-less forms.
pub fn validate_url(raw: &str) -> Result<Url, ShortenerError> {
    if raw.trim().is_empty() {
        return Err(ShortenerError::InvalidUrl(
            "URL cannot be empty".to_string(),
        ));
    }

    let parsed = Url::parse(raw)
        .map_err(|e| ShortenerError::InvalidUrl(format!("{}: {}", raw, e)))?;

    if !parsed.has_host() {
        return Err(ShortenerError::InvalidUrl(format!(
            "URL must have a valid scheme and host: {}",
            raw
        )));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_urls() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/a/b?c=d#e").is_ok());
        assert!(validate_url("https://localhost:8080").is_ok());
        assert!(validate_url("ftp://files.example.com/pub").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            validate_url("  "),
            Err(ShortenerError::InvalidUrl(_))
        ));
    }

    #[test]
    fn rejects_relative_and_hostless() {
        for raw in [
            "not-a-valid-url",
            "/relative/path",
            "example.com",
            "javascript:alert(1)",
            "mailto:someone@example.com",
            "http://",
        ] {
            assert!(
                matches!(validate_url(raw), Err(ShortenerError::InvalidUrl(_))),
                "{raw} should be rejected"
            );
        }
    }
}
