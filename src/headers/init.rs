use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use super::{
    HeaderMultiMap, NativeHeaders,
    value::{IntoHeaderValues, Sealed, split_value},
};
use crate::log::debug;

/// Options used when constructing [`HeaderMultiMap`] from a [`HeaderInit`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderOptions {
    split_values: bool,
}

impl HeaderOptions {
    /// Create default options.
    #[inline]
    pub const fn new() -> Self {
        Self {
            split_values: false,
        }
    }

    /// Split comma separated values of a native header object into separate values.
    ///
    /// Fragments are trimmed and empty fragments are dropped. Only applies to
    /// [`HeaderInit::Native`], every other source keeps its values as given, and later
    /// [`append`][HeaderMultiMap::append] or [`set`][HeaderMultiMap::set] never split.
    #[inline]
    pub const fn split_values(mut self, enabled: bool) -> Self {
        self.split_values = enabled;
        self
    }

    /// Returns `true` if comma separated values are split.
    #[inline]
    pub const fn splits_values(&self) -> bool {
        self.split_values
    }
}

/// Single or multiple header values of a map-like initializer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Values {
    /// Single value.
    One(String),
    /// Multiple values.
    Many(Vec<String>),
}

impl From<&str> for Values {
    #[inline]
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<String> for Values {
    #[inline]
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for Values {
    #[inline]
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

impl From<Vec<&str>> for Values {
    #[inline]
    fn from(value: Vec<&str>) -> Self {
        Self::Many(value.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Values {
    #[inline]
    fn from(value: [&str; N]) -> Self {
        Self::Many(value.into_iter().map(str::to_owned).collect())
    }
}

impl IntoHeaderValues for &Values { }
impl Sealed for &Values {
    #[inline]
    fn each_value<F: FnMut(&str)>(self, mut f: F) {
        match self {
            Values::One(value) => f(value),
            Values::Many(values) => values.each_value(f),
        }
    }
}

impl IntoHeaderValues for Values { }
impl Sealed for Values {
    #[inline]
    fn each_value<F: FnMut(&str)>(self, f: F) {
        (&self).each_value(f)
    }
}

/// Source of a [`HeaderMultiMap`].
///
/// Usually created via [`From`], so any supported source can be passed directly to
/// [`HeaderMultiMap::from_init`].
pub enum HeaderInit<'a> {
    /// Empty map.
    Empty,
    /// Native multi-value header object.
    Native(&'a dyn NativeHeaders),
    /// Another [`HeaderMultiMap`].
    Headers(&'a HeaderMultiMap),
    /// Map-like source with single or multiple values per name.
    Entries(Box<dyn Iterator<Item = (&'a str, &'a Values)> + 'a>),
    /// Plain JSON object, with string or array of string values.
    #[cfg(feature = "json")]
    Object(&'a serde_json::Map<String, serde_json::Value>),
    /// Raw `"Name: value"` lines separated by CRLF.
    Raw(&'a str),
}

impl std::fmt::Debug for HeaderInit<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Native(_) => f.write_str("Native"),
            Self::Headers(map) => f.debug_tuple("Headers").field(map).finish(),
            Self::Entries(_) => f.write_str("Entries"),
            #[cfg(feature = "json")]
            Self::Object(object) => f.debug_tuple("Object").field(object).finish(),
            Self::Raw(raw) => f.debug_tuple("Raw").field(raw).finish(),
        }
    }
}

impl Default for HeaderInit<'_> {
    #[inline]
    fn default() -> Self {
        Self::Empty
    }
}

impl<'a> From<&'a str> for HeaderInit<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        Self::Raw(value)
    }
}

impl<'a> From<&'a String> for HeaderInit<'a> {
    #[inline]
    fn from(value: &'a String) -> Self {
        Self::Raw(value)
    }
}

impl<'a> From<&'a HeaderMultiMap> for HeaderInit<'a> {
    #[inline]
    fn from(value: &'a HeaderMultiMap) -> Self {
        Self::Headers(value)
    }
}

impl<'a> From<&'a BTreeMap<String, Values>> for HeaderInit<'a> {
    #[inline]
    fn from(value: &'a BTreeMap<String, Values>) -> Self {
        Self::Entries(Box::new(value.iter().map(|(k, v)| (k.as_str(), v))))
    }
}

impl<'a, S> From<&'a HashMap<String, Values, S>> for HeaderInit<'a> {
    #[inline]
    fn from(value: &'a HashMap<String, Values, S>) -> Self {
        Self::Entries(Box::new(value.iter().map(|(k, v)| (k.as_str(), v))))
    }
}

impl<'a, K: AsRef<str>> From<&'a [(K, Values)]> for HeaderInit<'a> {
    #[inline]
    fn from(value: &'a [(K, Values)]) -> Self {
        Self::Entries(Box::new(value.iter().map(|(k, v)| (k.as_ref(), v))))
    }
}

impl<'a, T: Into<HeaderInit<'a>>> From<Option<T>> for HeaderInit<'a> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

#[cfg(feature = "http")]
impl<'a> From<&'a http::HeaderMap> for HeaderInit<'a> {
    #[inline]
    fn from(value: &'a http::HeaderMap) -> Self {
        Self::Native(value)
    }
}

// ===== Construction =====

impl HeaderMultiMap {
    /// Create [`HeaderMultiMap`] from any supported source.
    ///
    /// All sources are normalized the same way as [`append`][HeaderMultiMap::append].
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use browser_headers::{HeaderMultiMap, HeaderOptions, Values};
    ///
    /// let mut source = BTreeMap::new();
    /// source.insert("A".to_owned(), Values::from(["1", "2"]));
    /// source.insert("B".to_owned(), Values::from("3, 4"));
    ///
    /// let map = HeaderMultiMap::from_init(&source, HeaderOptions::new().split_values(true));
    /// assert_eq!(map.get("a"), ["1", "2"]);
    /// assert_eq!(map.get("b"), ["3, 4"]);
    /// ```
    pub fn from_init<'a, I: Into<HeaderInit<'a>>>(init: I, options: HeaderOptions) -> Self {
        let mut map = Self::new();
        map.ingest(init.into(), options);
        map
    }

    fn ingest(&mut self, init: HeaderInit<'_>, options: HeaderOptions) {
        match init {
            HeaderInit::Empty => {}
            HeaderInit::Native(native) => {
                for name in native.names() {
                    for value in native.values(&name) {
                        if options.split_values {
                            self.append(name.as_str(), split_value(&value).collect::<Vec<_>>());
                        } else {
                            self.append(name.as_str(), value);
                        }
                    }
                }
            }
            HeaderInit::Headers(other) => {
                for (name, values) in other.fields() {
                    self.append(name, values);
                }
            }
            HeaderInit::Entries(entries) => {
                for (name, values) in entries {
                    self.append(name, values);
                }
            }
            #[cfg(feature = "json")]
            HeaderInit::Object(object) => super::serialize::ingest_object(self, object),
            HeaderInit::Raw(raw) => self.append_from_str(raw),
        }
    }

    /// Append headers from raw `"Name: value"` lines separated by CRLF.
    ///
    /// Each line is split at the first `": "`. Lines without separator, or with the separator at
    /// the start of the line, are skipped.
    pub fn append_from_str(&mut self, raw: &str) {
        for line in raw.split("\r\n") {
            match line.find(": ") {
                Some(index) if index > 0 => {
                    self.append(&line[..index], &line[index + 2..]);
                }
                _ => {
                    if !line.is_empty() {
                        debug!("skipping malformed header line {line:?}");
                    }
                }
            }
        }
    }
}

/// Parse raw `"Name: value"` lines separated by CRLF, see
/// [`HeaderMultiMap::append_from_str`].
impl FromStr for HeaderMultiMap {
    type Err = std::convert::Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_init(s, HeaderOptions::new()))
    }
}
