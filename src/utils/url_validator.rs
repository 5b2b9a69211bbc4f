//! Validation of target URLs before a short code is allocated.

use url::Url;

/// Reasons a candidate target URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must have a host")]
    MissingHost,
}

/// Checks that `input` is an absolute `http`/`https` URL with a non-empty host.
///
/// The input is not rewritten: the caller stores exactly the string it
/// passed in, so resolving later yields the same bytes back.
///
/// The authority is checked on the raw text as well as on the parsed form,
/// because the WHATWG parser quietly repairs inputs like `http:///host` or
/// `http:host` into `http://host/`.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for unparseable input or
/// input containing whitespace or control characters,
/// [`UrlValidationError::UnsupportedProtocol`] for any scheme other than
/// `http`/`https`, and [`UrlValidationError::MissingHost`] when the authority
/// is empty.
///
/// # Examples
///
/// ```
/// use url_shortener::utils::url_validator::validate_target_url;
///
/// assert!(validate_target_url("https://example.com/path").is_ok());
/// assert!(validate_target_url("ftp://host/x").is_err());
/// assert!(validate_target_url("http:///nohost").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<(), UrlValidationError> {
    // The parser strips tabs and newlines; the stored text must still be a
    // valid `Location` header value.
    if input.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(UrlValidationError::InvalidFormat(
            "URL must not contain whitespace or control characters".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlValidationError::UnsupportedProtocol);
    }

    if !has_raw_authority(input) {
        return Err(UrlValidationError::MissingHost);
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// Returns true if the text after `scheme:` is `//` followed by a non-empty authority.
fn has_raw_authority(input: &str) -> bool {
    let Some((_, rest)) = input.trim().split_once(':') else {
        return false;
    };
    let Some(authority) = rest.strip_prefix("//") else {
        return false;
    };

    let end = authority.find(['/', '?', '#']).unwrap_or(authority.len());
    let host_port = &authority[..end];
    let host = host_port.rsplit_once('@').map_or(host_port, |(_, h)| h);

    !host.is_empty() && !host.starts_with(':')
}
