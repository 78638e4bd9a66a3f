//! Request path resolution module
//!
//! Maps a URL path onto a filesystem path beneath the root. Two layers
//! keep requests inside the root: `..` segments are resolved lexically
//! and clamped at the root, and the final path is canonicalized so that
//! symlinks pointing elsewhere are caught too.

use std::io;
use std::path::{Path, PathBuf};

/// Why a URL path could not be mapped
#[derive(Debug, PartialEq, Eq)]
pub enum PathError {
    /// Percent-decoding produced invalid UTF-8
    InvalidEncoding,
    /// A segment contains a NUL byte or a backslash
    InvalidSegment(String),
}

/// Result of checking a path against the root
#[derive(Debug, PartialEq, Eq)]
pub enum Confined {
    /// Canonical path, inside the root
    Inside(PathBuf),
    /// Canonical path, outside the root
    Outside(PathBuf),
}

/// Percent-decode a URL path
pub fn decode_path(raw_path: &str) -> Result<String, PathError> {
    urlencoding::decode(raw_path)
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| PathError::InvalidEncoding)
}

/// Normalized path segments: empty and `.` dropped, `..` pops (never above the root)
pub fn normalize_segments(decoded_path: &str) -> Result<Vec<&str>, PathError> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains('\0') || s.contains('\\') => {
                return Err(PathError::InvalidSegment(s.to_string()));
            }
            s => segments.push(s),
        }
    }
    Ok(segments)
}

/// Map a raw (still percent-encoded) URL path onto a path under `root`
pub fn map_request_path(root: &Path, raw_path: &str) -> Result<PathBuf, PathError> {
    let decoded = decode_path(raw_path)?;
    let segments = normalize_segments(&decoded)?;
    Ok(segments
        .into_iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment)))
}

/// Canonicalize `candidate` and check it against the canonical `root`.
///
/// Fails with the underlying I/O error, `NotFound` when nothing exists there.
pub async fn confine(root: &Path, candidate: &Path) -> io::Result<Confined> {
    let canonical = tokio::fs::canonicalize(candidate).await?;
    if canonical.starts_with(root) {
        Ok(Confined::Inside(canonical))
    } else {
        Ok(Confined::Outside(canonical))
    }
}
