//! HTTP protocol layer module
//!
//! Content types, cache headers, response bodies and builders, independent of
//! how requests are mapped onto the filesystem.

pub mod body;
pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use cache::apply_no_cache_headers;
pub use body::Body;
pub use response::{
    build_304_response, build_501_response, build_error_response, build_file_response,
    build_ok_response, build_redirect_response,
};
