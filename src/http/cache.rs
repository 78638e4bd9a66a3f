//! HTTP cache control module
//!
//! Cache-busting response headers and `Last-Modified` / `If-Modified-Since`
//! handling.

use chrono::{DateTime, NaiveDateTime, Utc};
use hyper::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use std::time::SystemTime;

/// Headers appended to every response, in wire order
pub static NO_CACHE_HEADERS: [(HeaderName, &str); 3] = [
    (CACHE_CONTROL, "no-store, no-cache, must-revalidate, max-age=0"),
    (PRAGMA, "no-cache"),
    (EXPIRES, "0"),
];

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Strip any caching headers from `headers` and append the no-cache set last.
///
/// The map is rebuilt so the three headers always come after every other
/// header and in table order.
pub fn apply_no_cache_headers(headers: &mut HeaderMap) {
    let previous = std::mem::take(headers);
    headers.reserve(previous.len() + NO_CACHE_HEADERS.len());

    let mut current: Option<HeaderName> = None;
    for (name, value) in previous {
        // `None` means "same name as the previous entry"
        if let Some(name) = name {
            current = Some(name);
        }
        let Some(name) = current.as_ref() else {
            continue;
        };
        if NO_CACHE_HEADERS.iter().any(|(n, _)| n == name) {
            continue;
        }
        headers.append(name.clone(), value);
    }

    for (name, value) in &NO_CACHE_HEADERS {
        headers.append(name.clone(), HeaderValue::from_static(*value));
    }
}

/// Format a modification time as an HTTP date
pub fn format_http_date(time: SystemTime) -> String {
    let time: DateTime<Utc> = time.into();
    time.format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an HTTP date (IMF-fixdate or RFC 2822 form)
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, HTTP_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc2822(value).map(|dt| dt.with_timezone(&Utc)))
        .ok()
}

/// Whether a file modified at `modified` is unchanged since the client's copy.
/// HTTP dates have one-second resolution, so sub-second precision is dropped.
pub fn not_modified_since(if_modified_since: Option<&str>, modified: SystemTime) -> bool {
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    let modified: DateTime<Utc> = modified.into();
    modified.timestamp() <= since.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
    use std::time::Duration;

    #[test]
    fn test_no_cache_headers_appended_in_order() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/css"));
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("12"));
        apply_no_cache_headers(&mut headers);

        let names: Vec<&str> = headers.keys().map(HeaderName::as_str).collect();
        assert_eq!(
            names,
            ["content-type", "content-length", "cache-control", "pragma", "expires"]
        );
        assert_eq!(
            headers[CACHE_CONTROL],
            "no-store, no-cache, must-revalidate, max-age=0"
        );
        assert_eq!(headers[PRAGMA], "no-cache");
        assert_eq!(headers[EXPIRES], "0");
    }

    #[test]
    fn test_existing_cache_headers_overridden() {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=31536000"));
        headers.append(CACHE_CONTROL, HeaderValue::from_static("immutable"));
        headers.insert(EXPIRES, HeaderValue::from_static("Thu, 01 Dec 2094 16:00:00 GMT"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("image/png"));
        apply_no_cache_headers(&mut headers);

        assert_eq!(headers.get_all(CACHE_CONTROL).iter().count(), 1);
        assert_eq!(
            headers[CACHE_CONTROL],
            "no-store, no-cache, must-revalidate, max-age=0"
        );
        assert_eq!(headers[EXPIRES], "0");
        assert_eq!(headers[CONTENT_TYPE], "image/png");
    }

    #[test]
    fn test_multi_valued_headers_survive() {
        let mut headers = HeaderMap::new();
        headers.insert("vary", HeaderValue::from_static("accept"));
        headers.append("vary", HeaderValue::from_static("origin"));
        apply_no_cache_headers(&mut headers);
        assert_eq!(headers.get_all("vary").iter().count(), 2);
    }

    #[test]
    fn test_http_date_round_trip() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
        let formatted = format_http_date(time);
        assert_eq!(formatted, "Sun, 06 Nov 1994 08:49:37 GMT");
        assert_eq!(parse_http_date(&formatted).map(|d| d.timestamp()), Some(784_111_777));
    }

    #[test]
    fn test_not_modified_since() {
        let modified = SystemTime::UNIX_EPOCH + Duration::from_millis(784_111_777_400);
        assert!(not_modified_since(Some("Sun, 06 Nov 1994 08:49:37 GMT"), modified));
        assert!(not_modified_since(Some("Mon, 07 Nov 1994 08:49:37 GMT"), modified));
        assert!(!not_modified_since(Some("Sat, 05 Nov 1994 08:49:37 GMT"), modified));
        assert!(!not_modified_since(Some("garbage"), modified));
        assert!(!not_modified_since(None, modified));
    }
}
