//! Utility helpers used across the crate.
//!
//! Input validation for the run configuration and construction of the shared
//! HTTP client.
use crate::part::TEMP_PREFIX;
use anyhow::Result;
use sanitize_filename::{OptionsForCheck, is_sanitized_with_options};
use std::time::Duration;
use url::Url;

/// User agent sent when the settings do not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("multi-get/", env!("CARGO_PKG_VERSION"));

/// Parses `url` and accepts it only when it is an absolute http(s) url with a host.
///
/// The scheme comparison is case-insensitive (`HTTP://` is fine).
pub fn parse_http_url(url: &str) -> Option<Url> {
    Url::parse(url)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .filter(|u| u.host_str().is_some_and(|h| !h.is_empty()))
}

pub fn is_valid_url(url: &str) -> bool {
    parse_http_url(url).is_some()
}

pub fn is_valid_count(count: i64) -> bool {
    count > 0 && u32::try_from(count).is_ok()
}

/// Checks that `name` is a plain filename usable in the working directory.
///
/// Rejects empty names, path separators, reserved characters and device names,
/// `.` and `..`, and anything longer than 255 bytes. Names made only of dots
/// (`...`) are otherwise fine. Names in the temporary part namespace are
/// rejected, assembly would read from and delete the destination itself.
pub fn is_valid_destination(name: &str) -> bool {
    match name {
        "" | "." | ".." => false,
        _ if name.starts_with(TEMP_PREFIX) => false,
        _ if name.bytes().all(|b| b == b'.') => name.len() <= 255,
        _ => is_sanitized_with_options(
            name,
            OptionsForCheck {
                windows: true,
                truncate: true,
            },
        ),
    }
}

/// Builds the client shared by every part of a run.
///
/// No timeout is applied unless one is given.
pub fn build_client(user_agent: &str, timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(user_agent);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(is_valid_url("http://something.com/file.zip"));
        assert!(is_valid_url("HTTP://something.com/file.zip"));
        assert!(is_valid_url("HttP://something.com/file.zip"));
        assert!(is_valid_url("https://something.com/file.zip"));
        assert!(is_valid_url("http://127.0.0.1:8080/"));
    }

    #[test]
    fn test_invalid_urls() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("://something.com/file.zip"));
        assert!(!is_valid_url("ftp://something.com/file.zip"));
        assert!(!is_valid_url("something.com/file.zip"));
        assert!(!is_valid_url("mailto:someone@something.com"));
    }

    #[test]
    fn test_counts() {
        assert!(is_valid_count(4));
        assert!(is_valid_count(1));
        assert!(!is_valid_count(0));
        assert!(!is_valid_count(-1));
        assert!(!is_valid_count(i64::from(u32::MAX) + 1));
    }

    #[test]
    fn test_destinations() {
        assert!(is_valid_destination("dest.out"));
        assert!(is_valid_destination("..."));
        assert!(is_valid_destination("multi-get.dest"));

        assert!(!is_valid_destination(""));
        assert!(!is_valid_destination("."));
        assert!(!is_valid_destination(".."));
        assert!(!is_valid_destination("dir/dest.out"));
        assert!(!is_valid_destination("./dest.out"));
        assert!(!is_valid_destination("dir\\dest.out"));
        assert!(!is_valid_destination("con"));
        assert!(!is_valid_destination(".tmp.multi-get.part.0"));
        assert!(!is_valid_destination(".tmp.multi-get.part.17"));
        assert!(is_valid_destination("tmp.multi-get.part.0"));

        let too_long = format!("{}.out", "a".repeat(255));
        assert!(!is_valid_destination(&too_long));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(DEFAULT_USER_AGENT, None).is_ok());
        assert!(build_client("custom/1.0", Some(Duration::from_secs(5))).is_ok());
    }
}
