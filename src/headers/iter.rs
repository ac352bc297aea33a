use super::{HeaderMultiMap, HeaderName, HeaderValue, field::{GetAll, HeaderField}};

impl<'a> IntoIterator for &'a HeaderMultiMap {
    type Item = <Iter<'a> as Iterator>::Item;

    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned from [`HeaderMultiMap::iter`].
#[derive(Debug)]
pub struct Iter<'a> {
    iter: std::slice::Iter<'a, HeaderField>,
    current: Option<(&'a HeaderName, GetAll<'a>)>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(fields: &'a [HeaderField]) -> Self {
        let mut iter = fields.iter();
        Self {
            current: iter.next().map(|e| (e.name(), e.iter())),
            iter,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a HeaderName, &'a HeaderValue);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((name, values)) = &mut self.current
                && let Some(value) = values.next()
            {
                return Some((*name, value));
            }

            let field = self.iter.next()?;
            self.current = Some((field.name(), field.iter()));
        }
    }
}

/// Iterator returned from [`HeaderMultiMap::fields`].
#[derive(Debug)]
pub struct Fields<'a> {
    iter: std::slice::Iter<'a, HeaderField>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(fields: &'a [HeaderField]) -> Self {
        Self {
            iter: fields.iter(),
        }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = (&'a HeaderName, &'a [HeaderValue]);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|e| (e.name(), e.values()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Fields<'_> { }
