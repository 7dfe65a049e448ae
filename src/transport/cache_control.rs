//! `Cache-Control` parsing.

use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, HeaderMap};

/// Extract the `max-age` directive from a `Cache-Control` value.
///
/// Directive names are case-insensitive; a quoted value is accepted.
/// Returns `None` when the directive is absent or not a whole number of
/// seconds.
///
/// ```rust
/// # use huginn::transport::cache_control::max_age;
/// # use std::time::Duration;
/// assert_eq!(max_age("public, max-age=900"), Some(Duration::from_secs(900)));
/// assert_eq!(max_age("no-cache"), None);
/// ```
pub fn max_age(value: &str) -> Option<Duration> {
    value.split(',').find_map(|directive| {
        let (name, seconds) = directive.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("max-age") {
            return None;
        }
        seconds
            .trim()
            .trim_matches('"')
            .parse::<u64>()
            .ok()
            .map(Duration::from_secs)
    })
}

/// `max-age` from the first `Cache-Control` header that carries one.
pub fn max_age_from_headers(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get_all(CACHE_CONTROL)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(max_age)
}
