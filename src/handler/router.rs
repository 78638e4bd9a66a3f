//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, dispatch to
//! static file serving, and cache-busting headers on the way out.

use crate::config::ServerConfig;
use crate::handler::static_files;
use crate::http::{self, Body};
use crate::logger;
use hyper::header::IF_MODIFIED_SINCE;
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw, still percent-encoded path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<&'a str>,
}

/// Main entry point for HTTP request handling.
///
/// Never fails: every outcome, including errors, is a response carrying the
/// no-cache headers.
pub async fn handle_request<B>(
    req: Request<B>,
    config: Arc<ServerConfig>,
) -> Result<Response<Body>, Infallible> {
    // GET and HEAD bodies are ignored
    let (parts, _) = req.into_parts();
    let mut response = route_request(&parts, &config).await;
    http::apply_no_cache_headers(response.headers_mut());
    Ok(response)
}

async fn route_request(req: &Parts, config: &ServerConfig) -> Response<Body> {
    let method = &req.method;
    let uri = &req.uri;
    let is_head = *method == Method::HEAD;

    logger::log_debug(&format!("{method} {uri} {:?}", req.version));

    if !matches!(*method, Method::GET | Method::HEAD) {
        logger::log_debug(&format!("Method not implemented: {method}"));
        return http::build_501_response(false);
    }

    let ctx = RequestContext {
        path: uri.path(),
        query: uri.query(),
        is_head,
        if_modified_since: req
            .headers
            .get(IF_MODIFIED_SINCE)
            .and_then(|v| v.to_str().ok()),
    };

    static_files::serve_path(&ctx, config).await
}
