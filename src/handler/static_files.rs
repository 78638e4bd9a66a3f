//! Static file serving module
//!
//! Serves regular files, directory index files and generated listings
//! from beneath the root directory.

use crate::config::ServerConfig;
use crate::handler::listing;
use crate::handler::resolve::{self, Confined, PathError};
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, Body};
use crate::logger;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Tried in order when a directory is requested
const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Serve whatever the request path names under the root
pub async fn serve_path(ctx: &RequestContext<'_>, config: &ServerConfig) -> Response<Body> {
    let candidate = match resolve::map_request_path(&config.root, ctx.path) {
        Ok(p) => p,
        Err(e) => {
            match e {
                PathError::InvalidEncoding => {
                    logger::log_debug(&format!("Undecodable request path: {}", ctx.path));
                }
                PathError::InvalidSegment(segment) => {
                    logger::log_debug(&format!("Rejected path segment {segment:?}"));
                }
            }
            return http::build_error_response(StatusCode::BAD_REQUEST, ctx.is_head);
        }
    };

    let (path, metadata) = match locate(config, &candidate, ctx.path).await {
        Ok(found) => found,
        Err(status) => return http::build_error_response(status, ctx.is_head),
    };

    if metadata.is_dir() {
        return serve_directory(ctx, config, &path).await;
    }

    // `/page.html/` names a directory that does not exist
    if ctx.path.ends_with('/') {
        return http::build_error_response(StatusCode::NOT_FOUND, ctx.is_head);
    }

    serve_file(ctx, &candidate, &path, &metadata).await
}

/// Canonicalize, confine and stat a candidate path, mapping failures to a status
async fn locate(
    config: &ServerConfig,
    candidate: &Path,
    request_path: &str,
) -> Result<(PathBuf, Metadata), StatusCode> {
    let path = match resolve::confine(&config.root, candidate).await {
        Ok(Confined::Inside(p)) => p,
        Ok(Confined::Outside(p)) => {
            logger::log_traversal_blocked(request_path, &p);
            return Err(StatusCode::FORBIDDEN);
        }
        Err(e) => return Err(status_for_io_error(&e, candidate)),
    };

    match fs::metadata(&path).await {
        Ok(metadata) => Ok((path, metadata)),
        Err(e) => Err(status_for_io_error(&e, &path)),
    }
}

async fn serve_directory(
    ctx: &RequestContext<'_>,
    config: &ServerConfig,
    dir: &Path,
) -> Response<Body> {
    // Relative links in the page only resolve against a trailing slash
    if !ctx.path.ends_with('/') {
        // A leading `//` would make the Location protocol-relative
        let path = format!("/{}", ctx.path.trim_start_matches('/'));
        let location = match ctx.query {
            Some(query) => format!("{path}/?{query}"),
            None => format!("{path}/"),
        };
        return http::build_redirect_response(&location);
    }

    for index in INDEX_FILES {
        let candidate = dir.join(index);
        if let Ok((path, metadata)) = locate(config, &candidate, ctx.path).await {
            if metadata.is_file() {
                return serve_file(ctx, &candidate, &path, &metadata).await;
            }
        }
    }

    let entries = match listing::read_entries(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            logger::log_warning(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            return http::build_error_response(StatusCode::NOT_FOUND, ctx.is_head);
        }
    };

    let display_path = resolve::decode_path(ctx.path).unwrap_or_else(|_| ctx.path.to_string());
    let page = listing::render_listing(&display_path, &entries);
    http::build_ok_response(
        Bytes::from(page),
        "text/html; charset=utf-8",
        None,
        ctx.is_head,
    )
}

/// Serve a regular file, streamed from disk. `requested` names the file as the client asked for
/// it and picks the Content-Type; `path` is its canonical location.
async fn serve_file(
    ctx: &RequestContext<'_>,
    requested: &Path,
    path: &Path,
    metadata: &Metadata,
) -> Response<Body> {
    let last_modified = metadata.modified().ok();

    if let Some(modified) = last_modified {
        if cache::not_modified_since(ctx.if_modified_since, modified) {
            return http::build_304_response(&cache::format_http_date(modified));
        }
    }

    let file = match fs::File::open(path).await {
        Ok(f) => f,
        Err(e) => {
            return http::build_error_response(status_for_io_error(&e, path), ctx.is_head);
        }
    };

    let last_modified = last_modified.map(cache::format_http_date);
    http::build_file_response(
        file,
        metadata.len(),
        mime::content_type_for(requested),
        last_modified.as_deref(),
        ctx.is_head,
    )
}

/// Missing files are routine; anything else is worth a log line.
/// Unreadable files look missing to the client.
fn status_for_io_error(err: &io::Error, path: &Path) -> StatusCode {
    match err.kind() {
        io::ErrorKind::NotFound => StatusCode::NOT_FOUND,
        // `/style.css/x` or a segment longer than the filesystem allows
        io::ErrorKind::NotADirectory | io::ErrorKind::InvalidFilename => {
            logger::log_debug(&format!("No such path '{}': {err}", path.display()));
            StatusCode::NOT_FOUND
        }
        io::ErrorKind::PermissionDenied => {
            logger::log_warning(&format!("Permission denied: '{}'", path.display()));
            StatusCode::NOT_FOUND
        }
        _ => {
            logger::log_error(&format!("Failed to read '{}': {err}", path.display()));
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_io_error() {
        let path = Path::new("/srv/site/x");
        assert_eq!(
            status_for_io_error(&io::Error::from(io::ErrorKind::NotFound), path),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for_io_error(&io::Error::from(io::ErrorKind::PermissionDenied), path),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for_io_error(&io::Error::from(io::ErrorKind::NotADirectory), path),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for_io_error(&io::Error::from(io::ErrorKind::InvalidFilename), path),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for_io_error(&io::Error::from(io::ErrorKind::UnexpectedEof), path),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
