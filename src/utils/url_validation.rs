//! URL validation for the text-to-speech API base URL
//!
//! The base URL is configurable so the generator can be pointed at a proxy or a
//! local mock server. This module ensures the configured value:
//! - Is properly formatted and has a host
//! - Uses HTTPS, unless the host is a loopback address
//! - Carries no query string or fragment (paths are appended to it)

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Errors that can occur during URL validation
#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be HTTPS, got: {0}")]
    HttpsRequired(String),

    #[error("URL must have a host")]
    MissingHost,

    #[error("URL must not contain a query string or fragment")]
    UnexpectedQuery,
}

/// Checks if an IP address refers to the local machine
///
/// Loopback addresses include:
/// - IPv4 loopback (127.0.0.0/8)
/// - IPv6 loopback (::1)
/// - IPv4-mapped IPv6 loopback (::ffff:127.0.0.1)
pub fn is_loopback_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => is_loopback_ipv4(ipv4),
        IpAddr::V6(ipv6) => is_loopback_ipv6(ipv6),
    }
}

fn is_loopback_ipv4(ip: &Ipv4Addr) -> bool {
    ip.is_loopback()
}

fn is_loopback_ipv6(ip: &Ipv6Addr) -> bool {
    if ip.is_loopback() {
        return true;
    }
    ip.to_ipv4_mapped()
        .is_some_and(|ipv4| is_loopback_ipv4(&ipv4))
}

/// Returns true if the parsed URL points at the local machine
fn is_loopback_host(parsed: &Url) -> bool {
    match parsed.host() {
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => is_loopback_ipv4(&ip),
        Some(url::Host::Ipv6(ip)) => is_loopback_ipv6(&ip),
        None => false,
    }
}

/// Validates the API base URL and returns it with any trailing slash removed
///
/// This function performs the following checks:
/// 1. URL must be valid and parseable
/// 2. URL must have a hostname
/// 3. URL scheme must be HTTPS, or HTTP for loopback hosts
/// 4. URL must not carry a query string or fragment
///
/// # Example
/// ```rust
/// use voicegen::utils::url_validation::validate_api_base_url;
///
/// assert!(validate_api_base_url("https://api.elevenlabs.io/v1").is_ok());
/// assert!(validate_api_base_url("http://127.0.0.1:8080").is_ok());
/// assert!(validate_api_base_url("http://api.elevenlabs.io/v1").is_err());
/// ```
pub fn validate_api_base_url(url: &str) -> Result<String, UrlValidationError> {
    let parsed = Url::parse(url.trim())?;

    if parsed.host().is_none() {
        return Err(UrlValidationError::MissingHost);
    }

    match parsed.scheme() {
        "https" => {}
        "http" if is_loopback_host(&parsed) => {}
        scheme => {
            warn!(url = %parsed, "API base URL must use HTTPS for non-local hosts");
            return Err(UrlValidationError::HttpsRequired(scheme.to_string()));
        }
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(UrlValidationError::UnexpectedQuery);
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
