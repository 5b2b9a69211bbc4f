//! Public origin derivation from HTTP request headers.

use axum::http::{HeaderMap, header};

/// Host used when a request carries no usable host header.
const FALLBACK_HOST: &str = "localhost";

/// Derives the public origin (`scheme://host`) a request was addressed to.
///
/// Reverse proxy headers take priority:
/// - scheme: `X-Forwarded-Proto`, otherwise `http`
/// - host: `X-Forwarded-Host`, otherwise `Host`
///
/// Only the first value of a comma-separated forwarded header is used.
/// The port, if any, is kept.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "example.com:8080".parse().unwrap());
///
/// assert_eq!(request_origin(&headers), "http://example.com:8080");
/// ```
pub fn request_origin(headers: &HeaderMap) -> String {
    let scheme = first_header_value(headers, "x-forwarded-proto")
        .filter(|s| s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https"))
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_else(|| "http".to_string());

    let host = first_header_value(headers, "x-forwarded-host")
        .or_else(|| first_header_value(headers, header::HOST.as_str()))
        .unwrap_or_else(|| FALLBACK_HOST.to_string());

    format!("{scheme}://{host}")
}

/// Returns the trimmed first entry of a header, if present and non-empty.
fn first_header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_origin_from_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("example.com"));

        assert_eq!(request_origin(&headers), "http://example.com");
    }

    #[test]
    fn test_origin_keeps_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:8080"));

        assert_eq!(request_origin(&headers), "http://localhost:8080");
    }

    #[test]
    fn test_origin_forwarded_headers_win() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("10.0.0.5:8080"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("s.example.com"));

        assert_eq!(request_origin(&headers), "https://s.example.com");
    }

    #[test]
    fn test_origin_uses_first_forwarded_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-proto",
            HeaderValue::from_static("https, http"),
        );
        headers.insert(
            "x-forwarded-host",
            HeaderValue::from_static("a.example.com, b.example.com"),
        );

        assert_eq!(request_origin(&headers), "https://a.example.com");
    }

    #[test]
    fn test_origin_ignores_unknown_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("example.com"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("javascript"));

        assert_eq!(request_origin(&headers), "http://example.com");
    }

    #[test]
    fn test_origin_without_host() {
        let headers = HeaderMap::new();

        assert_eq!(request_origin(&headers), "http://localhost");
    }

    #[test]
    fn test_origin_invalid_utf8_host() {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_bytes(&[0xFF, 0xFE]) {
            headers.insert(header::HOST, value);
            assert_eq!(request_origin(&headers), "http://localhost");
        }
    }
}
