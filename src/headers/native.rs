//! Interoperability with native header types.
//!
//! Whether a native header type exists is a capability of the environment. It is injected as a
//! [`HeaderPlatform`] at export time instead of being probed globally.
use std::convert::Infallible;

use super::{ExportError, HeaderMultiMap, HeaderName, HeaderValue};
use crate::log::warning;

/// Native multi-value header object.
///
/// Implemented for [`http::HeaderMap`] when the `http` feature is enabled.
pub trait NativeHeaders {
    /// Returns every distinct header name.
    fn names(&self) -> Vec<String>;

    /// Returns all values of the given header name, empty if absent.
    fn values(&self, name: &str) -> Vec<String>;

    /// Append a value, keeping existing values of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Rejected`] if the native type cannot represent the header.
    fn append(&mut self, name: &HeaderName, value: &HeaderValue) -> Result<(), ExportError>;
}

/// Environment capability to construct a native header object.
pub trait HeaderPlatform {
    /// Native header type of this platform.
    type Headers: NativeHeaders;

    /// Create an empty native header object, or [`None`] if the environment does not have one.
    fn new_headers(&self) -> Option<Self::Headers>;
}

/// Platform without native header type.
///
/// Exporting to this platform always fails with [`ExportError::UnsupportedEnvironment`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Unsupported;

impl HeaderPlatform for Unsupported {
    type Headers = Infallible;

    #[inline]
    fn new_headers(&self) -> Option<Self::Headers> {
        None
    }
}

impl NativeHeaders for Infallible {
    fn names(&self) -> Vec<String> {
        match *self { }
    }

    fn values(&self, _: &str) -> Vec<String> {
        match *self { }
    }

    fn append(&mut self, _: &HeaderName, _: &HeaderValue) -> Result<(), ExportError> {
        match *self { }
    }
}

impl HeaderMultiMap {
    /// Export to a native header object of the given platform.
    ///
    /// Every value of every header is appended, preserving value order per name.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedEnvironment`] if the platform has no native header type,
    /// or the error returned by [`NativeHeaders::append`].
    pub fn to_native<P: HeaderPlatform>(&self, platform: &P) -> Result<P::Headers, ExportError> {
        let Some(mut headers) = platform.new_headers() else {
            warning!("native header type is not available");
            return Err(ExportError::UnsupportedEnvironment);
        };

        for (name, values) in self.fields() {
            for value in values {
                headers.append(name, value)?;
            }
        }

        Ok(headers)
    }

    /// Export to [`http::HeaderMap`].
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Rejected`] if [`http`] refuse a header.
    #[cfg(feature = "http")]
    #[inline]
    pub fn to_http(&self) -> Result<http::HeaderMap, ExportError> {
        self.to_native(&HttpPlatform)
    }
}

// ===== http =====

/// Platform that use [`http::HeaderMap`] as its native header type.
#[cfg(feature = "http")]
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpPlatform;

#[cfg(feature = "http")]
impl HeaderPlatform for HttpPlatform {
    type Headers = http::HeaderMap;

    #[inline]
    fn new_headers(&self) -> Option<Self::Headers> {
        Some(http::HeaderMap::new())
    }
}

#[cfg(feature = "http")]
impl NativeHeaders for http::HeaderMap {
    fn names(&self) -> Vec<String> {
        self.keys().map(|name| name.as_str().to_owned()).collect()
    }

    /// Values are decoded as ISO-8859-1, one char per byte, as browser `Headers` do.
    fn values(&self, name: &str) -> Vec<String> {
        self.get_all(name)
            .iter()
            .map(|value| value.as_bytes().iter().map(|&byte| char::from(byte)).collect::<String>())
            .collect()
    }

    /// Values with only chars up to U+00FF are encoded back as ISO-8859-1, any other value is
    /// written as UTF-8.
    fn append(&mut self, name: &HeaderName, value: &HeaderValue) -> Result<(), ExportError> {
        let rejected = || ExportError::Rejected {
            name: name.as_str().to_owned(),
        };
        let name = http::HeaderName::from_bytes(name.as_bytes()).map_err(|_| rejected())?;
        let value = match latin1(value.as_str()) {
            Some(bytes) => http::HeaderValue::from_bytes(&bytes),
            None => http::HeaderValue::from_bytes(value.as_bytes()),
        }
        .map_err(|_| rejected())?;
        http::HeaderMap::append(self, name, value);
        Ok(())
    }
}

#[cfg(feature = "http")]
fn latin1(value: &str) -> Option<Vec<u8>> {
    value.chars().map(|ch| u8::try_from(ch).ok()).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    /// Records appended pairs, standing in for a browser `Headers` object.
    #[derive(Default)]
    struct Recorder {
        pairs: Vec<(String, String)>,
    }

    impl NativeHeaders for Recorder {
        fn names(&self) -> Vec<String> {
            let mut names = Vec::<String>::new();
            for (name, _) in &self.pairs {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            names
        }

        fn values(&self, name: &str) -> Vec<String> {
            self.pairs.iter().filter(|(n, _)| n == name).map(|(_, v)| v.clone()).collect()
        }

        fn append(&mut self, name: &HeaderName, value: &HeaderValue) -> Result<(), ExportError> {
            self.pairs.push((name.to_string(), value.to_string()));
            Ok(())
        }
    }

    struct Browser;

    impl HeaderPlatform for Browser {
        type Headers = Recorder;

        fn new_headers(&self) -> Option<Recorder> {
            Some(Recorder::default())
        }
    }

    #[test]
    fn export_unsupported() {
        let mut map = HeaderMultiMap::new();
        map.append("x-grpc-web", "1");
        assert_eq!(map.to_native(&Unsupported).unwrap_err(), ExportError::UnsupportedEnvironment);
        assert_eq!(HeaderMultiMap::new().to_native(&Unsupported).unwrap_err(), ExportError::UnsupportedEnvironment);
    }

    #[test]
    fn export_preserves_order() {
        let mut map = HeaderMultiMap::new();
        map.append("Accept", ["b", "a"]);
        map.append("x-user-agent", "grpc-web-javascript/0.1");
        map.append("accept", "c");

        let native = map.to_native(&Browser).unwrap();
        assert_eq!(native.names(), ["accept", "x-user-agent"]);
        assert_eq!(native.values("accept"), ["b", "a", "c"]);
        assert_eq!(native.values("x-user-agent"), ["grpc-web-javascript/0.1"]);
    }

    #[cfg(feature = "http")]
    #[test]
    fn export_http() {
        let mut map = HeaderMultiMap::new();
        map.append("Content-Type", "application/grpc-web+proto");
        map.append("set-cookie", ["a=1", "b=2"]);
        map.append("x-name", "wörld");

        let headers = map.to_http().unwrap();
        assert_eq!(headers.len(), 4);
        assert_eq!(headers["content-type"], "application/grpc-web+proto");

        let cookies = headers.get_all("set-cookie").iter().collect::<Vec<_>>();
        assert_eq!(cookies, ["a=1", "b=2"]);
        assert_eq!(headers["x-name"].as_bytes(), b"w\xf6rld");
    }

    #[cfg(feature = "http")]
    #[test]
    fn read_http() {
        let mut headers = http::HeaderMap::new();
        headers.append("accept", http::HeaderValue::from_static("a"));
        headers.append("accept", http::HeaderValue::from_static("b"));

        assert_eq!(NativeHeaders::names(&headers), ["accept"]);
        assert_eq!(NativeHeaders::values(&headers, "accept"), ["a", "b"]);
        assert!(NativeHeaders::values(&headers, "missing").is_empty());
    }

    #[cfg(feature = "http")]
    #[test]
    fn http_obs_text_round_trip() {
        use crate::HeaderOptions;

        let mut headers = http::HeaderMap::new();
        headers.append("x-latin", http::HeaderValue::from_bytes(b"caf\xe9").unwrap());
        headers.append("x-utf8", http::HeaderValue::from_bytes("ünï".as_bytes()).unwrap());

        let map = HeaderMultiMap::from_init(&headers, HeaderOptions::new());
        assert_eq!(map.get("x-latin"), ["café"]);

        let back = map.to_http().unwrap();
        assert_eq!(back["x-latin"].as_bytes(), b"caf\xe9");
        assert_eq!(back["x-utf8"].as_bytes(), "ünï".as_bytes());

        // chars past U+00FF are written as UTF-8
        let mut map = HeaderMultiMap::new();
        map.append("x-name", "日本");
        assert_eq!(map.to_http().unwrap()["x-name"].as_bytes(), "日本".as_bytes());
    }
}
