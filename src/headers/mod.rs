//! HTTP Header Multimap.
mod name;
mod value;
mod field;
mod map;
mod iter;
mod init;
mod native;
mod error;

#[cfg(feature = "serde")]
mod serialize;

pub use name::{HeaderName, AsHeaderName};
pub use value::{HeaderValue, IntoHeaderValues};
pub use field::{HeaderField, GetAll};
pub use map::HeaderMultiMap;
pub use iter::{Iter, Fields};
pub use init::{HeaderInit, HeaderOptions, Values};
pub use native::{HeaderPlatform, NativeHeaders, Unsupported};
#[cfg(feature = "http")]
pub use native::HttpPlatform;
pub use error::ExportError;

#[cfg(test)]
mod test;
