use bytes::Bytes;

use crate::log::debug;
use crate::matches;

/// HTTP Header Value.
///
/// Value never contains control characters other than HTAB, and never starts or ends with SP or
/// HTAB. Non-ASCII text is kept as is.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HeaderValue {
    /// is valid UTF-8
    bytes: Bytes,
}

impl HeaderValue {
    /// Create header value from static string.
    ///
    /// # Panics
    ///
    /// Panics if the input is not already normalized.
    #[inline]
    pub const fn from_static(value: &'static str) -> Self {
        let bytes = value.as_bytes();
        if let [b' ' | b'\t', ..] | [.., b' ' | b'\t'] = bytes {
            panic!("static header value cannot have leading or trailing SP or HTAB");
        }
        let mut i = 0;
        while i < bytes.len() {
            if !matches::is_field_byte(bytes[i]) {
                panic!("static header value contains invalid byte");
            }
            i += 1;
        }
        Self {
            bytes: Bytes::from_static(bytes),
        }
    }

    /// Normalize arbitrary input into a header value.
    ///
    /// Any ASCII control character other than HTAB is stripped, then leading and trailing SP and
    /// HTAB are trimmed. Stripping CR and LF prevents header injection when the value is written
    /// to the wire. Other whitespace, such as U+00A0, is kept.
    pub fn normalize(value: &str) -> Self {
        if value.bytes().all(matches::is_field_byte) {
            return Self::copy_trimmed(value);
        }

        let sanitized = value
            .chars()
            .filter(|&ch| !ch.is_ascii() || matches::is_field_byte(ch as u8))
            .collect::<String>();
        debug!("header value {value:?} stripped to {sanitized:?}");

        Self::copy_trimmed(&sanitized)
    }

    fn copy_trimmed(value: &str) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(value.trim_matches([' ', '\t']).as_bytes()),
        }
    }

    /// Returns header value as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns header value as `str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: `bytes` is copied from a `str`, only ASCII bytes are removed
        unsafe { std::str::from_utf8_unchecked(&self.bytes) }
    }

    /// Returns `true` if header value is an empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Split a comma separated header value into its non empty elements, trimmed of SP and HTAB.
pub(crate) fn split_value(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .map(|e| e.trim_matches([' ', '\t']))
        .filter(|e| !e.is_empty())
}

// ===== Traits =====

impl std::fmt::Display for HeaderValue {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HeaderValue").field(&self.as_str()).finish()
    }
}

impl std::str::FromStr for HeaderValue {
    type Err = std::convert::Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::normalize(s))
    }
}

impl AsRef<str> for HeaderValue {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for HeaderValue {
    #[inline]
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other
    }
}

impl From<HeaderValue> for Bytes {
    #[inline]
    fn from(value: HeaderValue) -> Self {
        value.bytes
    }
}

impl From<HeaderValue> for String {
    #[inline]
    fn from(value: HeaderValue) -> Self {
        value.as_str().to_owned()
    }
}

// ===== Owned Traits =====

/// A single value or a sequence of values that can be stored in [`HeaderMultiMap`].
///
/// Every value is normalized before it is stored or compared.
///
/// [`HeaderMultiMap`]: super::HeaderMultiMap
#[allow(private_bounds)]
pub trait IntoHeaderValues: Sealed { }
pub(crate) trait Sealed: Sized {
    fn each_value<F: FnMut(&str)>(self, f: F);
}

impl IntoHeaderValues for &str { }
impl Sealed for &str {
    #[inline]
    fn each_value<F: FnMut(&str)>(self, mut f: F) {
        f(self)
    }
}

impl IntoHeaderValues for String { }
impl Sealed for String {
    #[inline]
    fn each_value<F: FnMut(&str)>(self, mut f: F) {
        f(&self)
    }
}

impl IntoHeaderValues for &String { }
impl Sealed for &String {
    #[inline]
    fn each_value<F: FnMut(&str)>(self, mut f: F) {
        f(self)
    }
}

impl IntoHeaderValues for HeaderValue { }
impl Sealed for HeaderValue {
    #[inline]
    fn each_value<F: FnMut(&str)>(self, mut f: F) {
        f(self.as_str())
    }
}

impl IntoHeaderValues for &HeaderValue { }
impl Sealed for &HeaderValue {
    #[inline]
    fn each_value<F: FnMut(&str)>(self, mut f: F) {
        f(self.as_str())
    }
}

impl<S: AsRef<str>> IntoHeaderValues for &[S] { }
impl<S: AsRef<str>> Sealed for &[S] {
    #[inline]
    fn each_value<F: FnMut(&str)>(self, mut f: F) {
        for value in self {
            f(value.as_ref())
        }
    }
}

impl<S: AsRef<str>> IntoHeaderValues for Vec<S> { }
impl<S: AsRef<str>> Sealed for Vec<S> {
    #[inline]
    fn each_value<F: FnMut(&str)>(self, f: F) {
        self.as_slice().each_value(f)
    }
}

impl<S: AsRef<str>> IntoHeaderValues for &Vec<S> { }
impl<S: AsRef<str>> Sealed for &Vec<S> {
    #[inline]
    fn each_value<F: FnMut(&str)>(self, f: F) {
        self.as_slice().each_value(f)
    }
}

impl<S: AsRef<str>, const N: usize> IntoHeaderValues for [S; N] { }
impl<S: AsRef<str>, const N: usize> Sealed for [S; N] {
    #[inline]
    fn each_value<F: FnMut(&str)>(self, f: F) {
        self.as_slice().each_value(f)
    }
}

/// Normalize every value into a new vector.
pub(crate) fn normalize_all<V: IntoHeaderValues>(values: V) -> Vec<HeaderValue> {
    let mut output = Vec::new();
    values.each_value(|value| output.push(HeaderValue::normalize(value)));
    output
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_value() {
        assert_eq!(HeaderValue::normalize("  text/plain\t"), "text/plain");
        assert_eq!(HeaderValue::normalize("a\r\nb"), "ab");
        assert_eq!(HeaderValue::normalize("a\r\n"), "a");
        assert_eq!(HeaderValue::normalize("evil\r\nset-cookie: x"), "evilset-cookie: x");
        assert_eq!(HeaderValue::normalize("a, b"), "a, b");
        assert_eq!(HeaderValue::normalize("a\tb"), "a\tb");
        assert_eq!(HeaderValue::normalize("\0 nul \x7f"), "nul");
        assert_eq!(HeaderValue::normalize("héllo wörld"), "héllo wörld");
        assert!(HeaderValue::normalize(" \r\n ").is_empty());

        // only SP and HTAB are trimmed
        assert_eq!(HeaderValue::normalize("\u{a0}x\u{a0} "), "\u{a0}x\u{a0}");
        assert_eq!(HeaderValue::normalize("\u{3000}x"), "\u{3000}x");
    }

    #[test]
    fn static_value() {
        const GRPC_WEB: HeaderValue = HeaderValue::from_static("application/grpc-web+proto");
        assert_eq!(GRPC_WEB, HeaderValue::normalize(" application/grpc-web+proto "));
    }

    #[test]
    fn split() {
        let values = split_value(" a, b ,,c,").collect::<Vec<_>>();
        assert_eq!(values, ["a", "b", "c"]);
        assert_eq!(split_value("").count(), 0);
    }

    #[test]
    fn into_values() {
        assert_eq!(normalize_all("a "), ["a"]);
        assert_eq!(normalize_all(vec!["a", " b"]), ["a", "b"]);
        assert_eq!(normalize_all(["a", "b"]), ["a", "b"]);
        assert_eq!(normalize_all(&vec![String::from("x")][..]), ["x"]);
        assert!(normalize_all(Vec::<String>::new()).is_empty());
    }
}
