use super::{HeaderName, HeaderValue};

type Size = u32;

/// Header Field.
///
/// Contains [`HeaderName`] and one or more [`HeaderValue`] in insertion order.
#[derive(Clone)]
pub struct HeaderField {
    hash: Size,
    name: HeaderName,
    /// never empty
    values: Vec<HeaderValue>,
}

impl HeaderField {
    /// `values` must not be empty.
    pub(crate) fn new(name: HeaderName, values: Vec<HeaderValue>) -> Self {
        debug_assert!(!values.is_empty());
        Self {
            hash: name.hash(),
            name,
            values,
        }
    }

    /// Returns cached hash.
    #[inline]
    pub(crate) const fn cached_hash(&self) -> Size {
        self.hash
    }

    /// Returns reference to [`HeaderName`].
    #[inline]
    pub const fn name(&self) -> &HeaderName {
        &self.name
    }

    /// Returns all [`HeaderValue`] in insertion order.
    ///
    /// This function will returns at least one value.
    #[inline]
    pub fn values(&self) -> &[HeaderValue] {
        &self.values
    }

    /// Returns the number of [`HeaderValue`].
    ///
    /// This function will returns at least `1`.
    #[inline]
    #[allow(
        clippy::len_without_is_empty,
        reason = "Field always have at least 1 value"
    )]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over [`HeaderValue`].
    #[inline]
    pub fn iter(&self) -> GetAll<'_> {
        GetAll::new(self)
    }

    /// Returns `true` if field contains the given value.
    #[inline]
    pub fn contains(&self, value: &HeaderValue) -> bool {
        self.values.contains(value)
    }

    pub(crate) fn extend(&mut self, values: Vec<HeaderValue>) {
        self.values.extend(values);
    }

    /// `values` must not be empty.
    pub(crate) fn replace(&mut self, values: Vec<HeaderValue>) {
        debug_assert!(!values.is_empty());
        self.values = values;
    }

    /// Remove the first occurrence of `value`.
    ///
    /// Returns `true` if the field become empty, in which case it must be removed from the map.
    pub(crate) fn remove_value(&mut self, value: &HeaderValue) -> bool {
        if let Some(index) = self.values.iter().position(|e| e == value) {
            self.values.remove(index);
        }
        self.values.is_empty()
    }

    /// Consume [`HeaderField`] into [`HeaderName`] and all of its [`HeaderValue`].
    #[inline]
    pub fn into_parts(self) -> (HeaderName, Vec<HeaderValue>) {
        (self.name, self.values)
    }
}

impl std::fmt::Debug for HeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderField")
            .field("name", &self.name)
            .field("values", &self.values)
            .finish()
    }
}

// ===== Iterator =====

impl<'a> IntoIterator for &'a HeaderField {
    type Item = &'a HeaderValue;

    type IntoIter = GetAll<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        GetAll::new(self)
    }
}

/// Iterator returned from [`HeaderMultiMap::get_all`][super::HeaderMultiMap::get_all].
#[derive(Clone)]
pub struct GetAll<'a> {
    iter: std::slice::Iter<'a, HeaderValue>,
}

impl<'a> GetAll<'a> {
    pub(crate) fn new(field: &'a HeaderField) -> Self {
        Self {
            iter: field.values.iter(),
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            iter: <&[HeaderValue]>::default().iter(),
        }
    }

    /// Returns `true` if there is still remaining value.
    #[inline]
    pub fn has_remaining(&self) -> bool {
        !self.iter.as_slice().is_empty()
    }
}

impl<'a> Iterator for GetAll<'a> {
    type Item = &'a HeaderValue;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for GetAll<'_> { }

impl DoubleEndedIterator for GetAll<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl std::fmt::Debug for GetAll<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.iter.as_slice()).finish()
    }
}
