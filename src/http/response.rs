//! HTTP response building module
//!
//! Builders for every status the server emits. Cache-busting headers are
//! not added here; the router applies them to whatever comes back.

use super::body::{full, Body, FileBody};
use http_body_util::BodyExt;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED, LOCATION};
use hyper::{Response, StatusCode};
use tokio::fs::File;

const HTML: &str = "text/html; charset=utf-8";

/// Build 200 OK for generated content. HEAD keeps `Content-Length` but drops the body.
pub fn build_ok_response(
    data: Bytes,
    content_type: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> Response<Body> {
    let content_length = data.len() as u64;
    let body = if is_head { Bytes::new() } else { data };
    build_200(full(body), content_type, content_length, last_modified)
}

/// Build 200 OK streaming `len` bytes of an open file. HEAD sends no body
/// and the file is dropped unread.
pub fn build_file_response(
    file: File,
    len: u64,
    content_type: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> Response<Body> {
    let body = if is_head {
        full(Bytes::new())
    } else {
        FileBody::new(file, len).boxed()
    };
    build_200(body, content_type, len, last_modified)
}

fn build_200(
    body: Body,
    content_type: &str,
    content_length: u64,
    last_modified: Option<&str>,
) -> Response<Body> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content_length);
    if let Some(last_modified) = last_modified {
        builder = builder.header(LAST_MODIFIED, last_modified);
    }

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        build_error_response(StatusCode::INTERNAL_SERVER_ERROR, false)
    })
}

/// Build 301 redirect, used to add the trailing slash to directory paths
pub fn build_redirect_response(location: &str) -> Response<Body> {
    let mut response = build_error_response(StatusCode::MOVED_PERMANENTLY, false);
    match location.parse::<hyper::header::HeaderValue>() {
        Ok(value) => {
            response.headers_mut().insert(LOCATION, value);
            response
        }
        Err(e) => {
            crate::logger::log_error(&format!("Invalid redirect location '{location}': {e}"));
            build_error_response(StatusCode::INTERNAL_SERVER_ERROR, false)
        }
    }
}

/// Build 304 Not Modified response
pub fn build_304_response(last_modified: &str) -> Response<Body> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(LAST_MODIFIED, last_modified)
        .body(full(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(full(Bytes::new()))
        })
}

/// Build 501 for anything but GET and HEAD
pub fn build_501_response(is_head: bool) -> Response<Body> {
    let mut response = build_error_response(StatusCode::NOT_IMPLEMENTED, is_head);
    response
        .headers_mut()
        .insert(ALLOW, hyper::header::HeaderValue::from_static("GET, HEAD"));
    response
}

/// Build an error response with a small HTML page
pub fn build_error_response(status: StatusCode, is_head: bool) -> Response<Body> {
    let page = error_page(status);
    let content_length = page.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(page)
    };

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, HTML)
        .header(CONTENT_LENGTH, content_length)
        .body(full(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut fallback = Response::new(full(Bytes::new()));
            *fallback.status_mut() = status;
            fallback
        })
}

fn error_page(status: StatusCode) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{code} {reason}</title>\n</head>\n<body>\n<h1>{code} {reason}</h1>\n</body>\n</html>\n"
    )
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_bytes(response: Response<Body>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_ok_response() {
        let resp = build_ok_response(Bytes::from_static(b"body{}"), "text/css", None, false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/css");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "6");
        assert_eq!(body_bytes(resp).await, Bytes::from_static(b"body{}"));
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let resp = build_ok_response(
            Bytes::from_static(b"0123456789"),
            "text/plain",
            Some("Sun, 06 Nov 1994 08:49:37 GMT"),
            true,
        );
        assert_eq!(resp.headers()[CONTENT_LENGTH], "10");
        assert_eq!(resp.headers()[LAST_MODIFIED], "Sun, 06 Nov 1994 08:49:37 GMT");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_file_response_streams_or_heads() {
        let site = crate::testutil::TempSite::new("file-response");
        let path = site.write("app.js", b"let x = 1;");

        let file = File::open(&path).await.unwrap();
        let resp = build_file_response(file, 10, "text/javascript", None, false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_LENGTH], "10");
        assert_eq!(body_bytes(resp).await, Bytes::from_static(b"let x = 1;"));

        let file = File::open(&path).await.unwrap();
        let resp = build_file_response(file, 10, "text/javascript", None, true);
        assert_eq!(resp.headers()[CONTENT_LENGTH], "10");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_error_response_page() {
        let resp = build_error_response(StatusCode::NOT_FOUND, false);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()[CONTENT_TYPE], HTML);
        let body = body_bytes(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("<h1>404 Not Found</h1>"));
    }

    #[test]
    fn test_redirect_and_501() {
        let resp = build_redirect_response("/docs/");
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[LOCATION], "/docs/");

        let resp = build_501_response(false);
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(resp.headers()[ALLOW], "GET, HEAD");
    }
}
