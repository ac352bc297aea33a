use bytes::Bytes;
use std::borrow::Cow;

use crate::log::debug;
use crate::matches;

/// HTTP Header name.
///
/// # Case Normalization
///
/// Input is normalized to lowercase at construction time, and any byte that is not a `tchar` is
/// stripped. [`from_static`][HeaderName::from_static] will panic at compile time when the name is
/// not already in its normalized form.
//
// Name is always non empty, lowercase, valid ASCII token
#[derive(Clone)]
pub struct HeaderName {
    bytes: Bytes,
}

impl HeaderName {
    /// Create header name from static string.
    ///
    /// # Panics
    ///
    /// Panics if the input is empty, contains ASCII uppercase characters, or contains non token
    /// characters.
    #[inline]
    pub const fn from_static(name: &'static str) -> Self {
        let bytes = name.as_bytes();
        if bytes.is_empty() {
            panic!("header name cannot be empty");
        }
        let mut i = 0;
        while i < bytes.len() {
            if matches::HEADER_NAME[bytes[i] as usize] != bytes[i] {
                panic!("static header name must be a lowercase token");
            }
            i += 1;
        }
        Self {
            bytes: Bytes::from_static(bytes),
        }
    }

    /// Normalize arbitrary input into a header name.
    ///
    /// Input is lowercased and stripped of every byte that is not a `tchar`, such as whitespace or
    /// `:`. Returns [`None`] if nothing remains.
    pub fn normalize<A: AsRef<[u8]>>(name: A) -> Option<Self> {
        let input = name.as_ref();
        let mut name = Vec::with_capacity(input.len());

        for byte in input {
            let byte = matches::HEADER_NAME[*byte as usize];

            // Any invalid character will have it MSB set
            if byte & 128 == 0 {
                name.push(byte);
            }
        }

        if name.len() != input.len() {
            debug!("header name {:?} stripped to {:?}", String::from_utf8_lossy(input), String::from_utf8_lossy(&name));
        }

        if name.is_empty() {
            return None;
        }

        Some(Self {
            bytes: Bytes::from(name),
        })
    }

    /// Extracts a string slice of the header name.
    ///
    /// The returned string will always in ASCII lowercase.
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: bytes only contains ASCII token characters
        unsafe { std::str::from_utf8_unchecked(&self.bytes) }
    }

    /// Returns header name as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn hash(&self) -> u32 {
        matches::hash_32(&self.bytes)
    }
}

// ===== Traits =====

impl std::fmt::Display for HeaderName {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for HeaderName {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HeaderName").field(&self.as_str()).finish()
    }
}

impl std::hash::Hash for HeaderName {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(HeaderName::hash(self));
    }
}

impl PartialEq for HeaderName {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // HeaderName is guaranteed to have ascii lowercase value,
        // therefore it is correct for case-insensitive eq
        self.bytes == other.bytes
    }
}

impl Eq for HeaderName { }

impl PartialEq<str> for HeaderName {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for HeaderName {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str().eq_ignore_ascii_case(other)
    }
}

impl AsRef<str> for HeaderName {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<HeaderName> for Bytes {
    #[inline]
    fn from(value: HeaderName) -> Self {
        value.bytes
    }
}

// ===== Ref Traits =====

/// A type that can be used as header name in [`HeaderMultiMap`] operation.
///
/// Strings are normalized on every call, while [`HeaderName`] is used as is.
///
/// [`HeaderMultiMap`]: super::HeaderMultiMap
#[allow(private_bounds)]
pub trait AsHeaderName: Sealed { }
trait Sealed {
    /// Returns [`None`] if name is empty after normalization.
    fn to_header_name(&self) -> Option<Cow<'_, HeaderName>>;
}

impl AsHeaderName for str { }
impl Sealed for str {
    #[inline]
    fn to_header_name(&self) -> Option<Cow<'_, HeaderName>> {
        HeaderName::normalize(self).map(Cow::Owned)
    }
}

impl AsHeaderName for String { }
impl Sealed for String {
    #[inline]
    fn to_header_name(&self) -> Option<Cow<'_, HeaderName>> {
        HeaderName::normalize(self).map(Cow::Owned)
    }
}

impl AsHeaderName for HeaderName { }
impl Sealed for HeaderName {
    #[inline]
    fn to_header_name(&self) -> Option<Cow<'_, HeaderName>> {
        Some(Cow::Borrowed(self))
    }
}

// blanket implementation
impl<K: AsHeaderName + ?Sized> AsHeaderName for &K { }
impl<S: Sealed + ?Sized> Sealed for &S {
    #[inline]
    fn to_header_name(&self) -> Option<Cow<'_, HeaderName>> {
        S::to_header_name(self)
    }
}

pub(crate) fn to_header_name<K: AsHeaderName + ?Sized>(name: &K) -> Option<Cow<'_, HeaderName>> {
    name.to_header_name()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_name() {
        let name = HeaderName::normalize("Content-Type").unwrap();
        assert_eq!(name.as_str(), "content-type");

        let name = HeaderName::normalize(" X Custom: ").unwrap();
        assert_eq!(name.as_str(), "xcustom");

        let name = HeaderName::normalize("grpc-status\r\n").unwrap();
        assert_eq!(name.as_str(), "grpc-status");

        assert!(HeaderName::normalize("").is_none());
        assert!(HeaderName::normalize(" : \r\n").is_none());
        assert!(HeaderName::normalize("ñ").is_none());
    }

    #[test]
    fn static_name() {
        const CONTENT_TYPE: HeaderName = HeaderName::from_static("content-type");
        assert_eq!(CONTENT_TYPE, HeaderName::normalize("CONTENT-TYPE").unwrap());
        assert_eq!(CONTENT_TYPE, "Content-Type");
    }

    #[test]
    #[should_panic]
    fn static_name_uppercase() {
        let _ = HeaderName::from_static("Content-Type");
    }

    #[test]
    fn case_insensitive_hash() {
        let a = HeaderName::normalize("X-Grpc-Web").unwrap();
        let b = HeaderName::normalize("x-grpc-web").unwrap();
        assert_eq!(a.hash(), b.hash());
    }
}
