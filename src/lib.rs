//! Browser Safe Header Multimap
//!
//! [`HeaderMultiMap`] is an ordered, case-insensitive, multi-valued header container. It can be
//! built from native header objects, plain maps, JSON objects, other instances, or a raw
//! `"Name: value\r\n"` blob, and exported back to a native header type.
//!
//! ```rust
//! use browser_headers::{HeaderMultiMap, HeaderOptions};
//!
//! let raw = "Content-Type: text/plain\r\nX-Custom: a, b";
//! let headers = HeaderMultiMap::from_init(raw, HeaderOptions::new());
//!
//! assert_eq!(headers.get("content-type"), ["text/plain"]);
//! assert_eq!(headers.get("X-CUSTOM"), ["a, b"]);
//! ```
#![warn(missing_debug_implementations)]

mod log;
mod matches;

pub mod headers;

pub use headers::{
    ExportError, HeaderInit, HeaderMultiMap, HeaderName, HeaderOptions, HeaderPlatform,
    HeaderValue, NativeHeaders, Values,
};
