use super::{
    HeaderName, HeaderValue,
    field::{GetAll, HeaderField},
    iter::{Fields, Iter},
    name::{AsHeaderName, to_header_name},
    value::{IntoHeaderValues, normalize_all},
};

type Size = u32;

/// Browser safe HTTP Headers Multimap.
///
/// Header names are case-insensitive and every name maps to one or more values. Names and values
/// are normalized on the way in, see [`HeaderName::normalize`] and [`HeaderValue::normalize`].
///
/// Names are kept in first insertion order, values are kept in insertion order per name.
///
/// ```rust
/// use browser_headers::HeaderMultiMap;
///
/// let mut map = HeaderMultiMap::new();
/// map.append("Accept", "text/plain");
/// map.append("ACCEPT", ["text/html", "application/json"]);
///
/// assert_eq!(map.get("accept"), ["text/plain", "text/html", "application/json"]);
///
/// map.delete_value("accept", "text/html");
/// assert!(!map.has_value("accept", "text/html"));
/// ```
#[derive(Clone, Default)]
pub struct HeaderMultiMap {
    /// in first insertion order
    fields: Vec<HeaderField>,
    /// open addressing index into `fields`, length is zero or power of two
    slots: Vec<Slot>,
}

#[derive(Clone, Copy)]
enum Slot {
    Vacant,
    Occupied { hash: Size, index: usize },
}

const fn mask_capacity(cap: usize, value: usize) -> usize {
    // capacity is always a power of two
    // any power of two - 1 will have all the appropriate bit set to mask the value
    // the result is always equal to to `value % capacity`
    value & (cap - 1)
}

impl HeaderMultiMap {
    /// Create new empty [`HeaderMultiMap`].
    ///
    /// This function does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fields: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Create new empty [`HeaderMultiMap`] with at least the specified capacity of header names.
    pub fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            return Self::new();
        }
        let mut me = Self {
            fields: Vec::with_capacity(capacity),
            slots: Vec::new(),
        };
        me.rehash(slots_for(capacity));
        me
    }

    /// Returns the number of header names.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the total number of header names the map can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len() * LOAD_FACTOR_NUM / LOAD_FACTOR_DEN
    }

    /// Returns `true` if map has no header.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ===== Lookup =====

impl HeaderMultiMap {
    /// Returns `true` if the map contains a value for the given header name.
    #[inline]
    pub fn has<K: AsHeaderName>(&self, name: K) -> bool {
        self.field(&name).is_some()
    }

    /// Returns `true` if the map contains the given value for the given header name.
    ///
    /// The value is normalized before comparison.
    pub fn has_value<K: AsHeaderName, V: AsRef<str>>(&self, name: K, value: V) -> bool {
        match self.field(&name) {
            Some(field) => field.contains(&HeaderValue::normalize(value.as_ref())),
            None => false,
        }
    }

    /// Returns a copy of all values for the given header name.
    ///
    /// Returns an empty vector if the header is absent. Mutating the returned vector does not
    /// affect the map.
    ///
    /// Use [`get_all`][HeaderMultiMap::get_all] to iterate the values without copying.
    pub fn get<K: AsHeaderName>(&self, name: K) -> Vec<HeaderValue> {
        match self.field(&name) {
            Some(field) => field.values().to_vec(),
            None => Vec::new(),
        }
    }

    /// Returns an iterator to all header values corresponding to the given header name.
    #[inline]
    pub fn get_all<K: AsHeaderName>(&self, name: K) -> GetAll<'_> {
        match self.field(&name) {
            Some(field) => field.iter(),
            None => GetAll::empty(),
        }
    }

    /// Returns a reference to the first header value corresponding to the given header name.
    #[inline]
    pub fn first<K: AsHeaderName>(&self, name: K) -> Option<&HeaderValue> {
        self.field(&name).and_then(|field| field.values().first())
    }

    /// Calls `f` once per header name with all of its values.
    ///
    /// The value slice is borrowed from the map and cannot be mutated.
    pub fn for_each<F: FnMut(&HeaderName, &[HeaderValue])>(&self, mut f: F) {
        for field in &self.fields {
            f(field.name(), field.values())
        }
    }

    /// Returns an iterator over headers as name and value pair.
    ///
    /// Header with multiple values yields one pair per value.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.fields)
    }

    /// Returns an iterator over headers as name and all of its values.
    #[inline]
    pub fn fields(&self) -> Fields<'_> {
        Fields::new(&self.fields)
    }

    fn field<K: AsHeaderName + ?Sized>(&self, name: &K) -> Option<&HeaderField> {
        let name = to_header_name(name)?;
        let (_, index) = self.find(&name)?;
        Some(&self.fields[index])
    }

    /// Returns slot index and field index.
    fn find(&self, name: &HeaderName) -> Option<(usize, usize)> {
        if self.slots.is_empty() {
            return None;
        }

        let cap = self.slots.len();
        let hash = name.hash();
        let mut index = mask_capacity(cap, hash as usize);

        loop {
            match self.slots[index] {
                Slot::Occupied { hash: cached, index: field } => {
                    if cached == hash && self.fields[field].name() == name {
                        return Some((index, field));
                    }
                }
                // this is the base case of the loop, there is always `Vacant`
                // because the load factor is limited
                Slot::Vacant => return None,
            }

            // hash collision, open address linear probing
            index = mask_capacity(cap, index + 1);
        }
    }
}

// ===== Mutation =====

impl HeaderMultiMap {
    /// Append values to a header name.
    ///
    /// Existing values are kept, new values are pushed after them.
    pub fn append<K: AsHeaderName, V: IntoHeaderValues>(&mut self, name: K, values: V) {
        let Some(name) = to_header_name(&name) else {
            return;
        };
        let values = normalize_all(values);
        if values.is_empty() {
            return;
        }

        match self.find(&name) {
            Some((_, index)) => self.fields[index].extend(values),
            None => self.insert_field(HeaderField::new(name.into_owned(), values)),
        }
    }

    /// Replace all values of a header name.
    ///
    /// Setting an empty sequence removes the header.
    pub fn set<K: AsHeaderName, V: IntoHeaderValues>(&mut self, name: K, values: V) {
        let Some(name) = to_header_name(&name) else {
            return;
        };
        let values = normalize_all(values);

        match (self.find(&name), values.is_empty()) {
            (Some((slot, index)), true) => {
                self.remove_field(slot, index);
            }
            (Some((_, index)), false) => self.fields[index].replace(values),
            (None, true) => {}
            (None, false) => self.insert_field(HeaderField::new(name.into_owned(), values)),
        }
    }

    /// Removes a header name and all of its values.
    ///
    /// Returns the removed values, which is empty if the header was absent.
    pub fn delete<K: AsHeaderName>(&mut self, name: K) -> Vec<HeaderValue> {
        let Some(name) = to_header_name(&name) else {
            return Vec::new();
        };
        match self.find(&name) {
            Some((slot, index)) => self.remove_field(slot, index).into_parts().1,
            None => Vec::new(),
        }
    }

    /// Removes the first occurrence of a value from a header name.
    ///
    /// If that was the last value, the header name is removed as well.
    pub fn delete_value<K: AsHeaderName, V: AsRef<str>>(&mut self, name: K, value: V) {
        let Some(name) = to_header_name(&name) else {
            return;
        };
        let Some((slot, index)) = self.find(&name) else {
            return;
        };
        if self.fields[index].remove_value(&HeaderValue::normalize(value.as_ref())) {
            // The last value was removed
            self.remove_field(slot, index);
        }
    }

    /// Clear headers map, removing all the value.
    ///
    /// Keeps the allocated memory for reuse.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.slots.fill(Slot::Vacant);
    }

    /// Reserves capacity for at least `additional` more header names.
    pub fn reserve(&mut self, additional: usize) {
        let required = slots_for(self.fields.len() + additional);
        if required > self.slots.len() {
            self.fields.reserve(additional);
            self.rehash(required);
        }
    }

    fn insert_field(&mut self, field: HeaderField) {
        self.reserve_one();
        let index = self.fields.len();
        self.place(field.cached_hash(), index);
        self.fields.push(field);
    }

    /// Put an index into the first vacant slot of the probe sequence.
    fn place(&mut self, hash: Size, index: usize) {
        let cap = self.slots.len();
        let mut slot = mask_capacity(cap, hash as usize);

        while let Slot::Occupied { .. } = self.slots[slot] {
            // hash collision, open address linear probing
            slot = mask_capacity(cap, slot + 1);
        }

        self.slots[slot] = Slot::Occupied { hash, index };
    }

    fn remove_field(&mut self, slot: usize, index: usize) -> HeaderField {
        let cap = self.slots.len();

        // backward shifting
        let mut hole = slot;
        let mut next = mask_capacity(cap, hole + 1);
        self.slots[hole] = Slot::Vacant;

        while let Slot::Occupied { hash, .. } = self.slots[next] {
            let ideal = mask_capacity(cap, hash as usize);

            // only shift entry whose probe sequence passes through the hole
            if mask_capacity(cap, next.wrapping_sub(ideal)) >= mask_capacity(cap, next.wrapping_sub(hole)) {
                self.slots[hole] = self.slots[next];
                self.slots[next] = Slot::Vacant;
                hole = next;
            }

            next = mask_capacity(cap, next + 1);
        }

        // keep insertion order, shift down every index after the removed field
        for slot in &mut self.slots {
            if let Slot::Occupied { index: i, .. } = slot
                && *i > index
            {
                *i -= 1;
            }
        }

        self.fields.remove(index)
    }

    fn reserve_one(&mut self) {
        let required = slots_for(self.fields.len() + 1);
        if required > self.slots.len() {
            self.rehash(required);
        }
    }

    fn rehash(&mut self, cap: usize) {
        debug_assert!(cap.is_power_of_two());

        self.slots.clear();
        self.slots.resize(cap, Slot::Vacant);

        for index in 0..self.fields.len() {
            let hash = self.fields[index].cached_hash();
            self.place(hash, index);
        }
    }
}

const LOAD_FACTOR_NUM: usize = 7;
const LOAD_FACTOR_DEN: usize = 10;

/// Minimum slot count to hold `len` names under the load factor.
fn slots_for(len: usize) -> usize {
    let mut cap = 2;
    while len * LOAD_FACTOR_DEN > cap * LOAD_FACTOR_NUM {
        cap <<= 1;
    }
    cap
}

// ===== Traits =====

impl std::fmt::Debug for HeaderMultiMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.fields()).finish()
    }
}

/// Render as raw header lines, `"name: value"` separated by CRLF.
///
/// The output can be parsed back with [`HeaderMultiMap::append_from_str`].
impl std::fmt::Display for HeaderMultiMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, value) in self {
            if !first {
                f.write_str("\r\n")?;
            }
            first = false;
            write!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

/// Two maps are equal when they contain the same names with the same values in the same order.
///
/// The order between different names is ignored.
impl PartialEq for HeaderMultiMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.fields.iter().all(|field| match other.find(field.name()) {
                Some((_, index)) => other.fields[index].values() == field.values(),
                None => false,
            })
    }
}

impl Eq for HeaderMultiMap { }

impl<K: AsHeaderName, V: IntoHeaderValues> Extend<(K, V)> for HeaderMultiMap {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (name, values) in iter {
            self.append(name, values);
        }
    }
}

impl<K: AsHeaderName, V: IntoHeaderValues> FromIterator<(K, V)> for HeaderMultiMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn probe_len(map: &HeaderMultiMap) -> usize {
        map.slots.iter().filter(|e| matches!(e, Slot::Occupied { .. })).count()
    }

    #[test]
    fn slot_sizing() {
        assert_eq!(slots_for(0), 2);
        assert_eq!(slots_for(1), 2);
        assert_eq!(slots_for(2), 4);
        assert_eq!(slots_for(3), 8);
        assert_eq!(slots_for(5), 8);
        assert_eq!(slots_for(6), 16);
    }

    #[test]
    fn slots_follow_fields() {
        let mut map = HeaderMultiMap::new();
        assert!(map.slots.is_empty());

        for i in 0..64 {
            map.append(format!("x-header-{i}"), "v");
        }
        assert_eq!(map.len(), 64);
        assert_eq!(probe_len(&map), 64);
        assert!(map.slots.len().is_power_of_two());

        for i in (0..64).step_by(3) {
            map.delete(format!("x-header-{i}"));
        }
        assert_eq!(probe_len(&map), map.len());

        for i in 0..64 {
            assert_eq!(map.has(format!("x-header-{i}")), i % 3 != 0, "x-header-{i}");
        }

        // indices in slots still point at the right field
        for (slot_index, slot) in map.slots.iter().enumerate() {
            if let Slot::Occupied { hash, index } = slot {
                assert_eq!(map.fields[*index].cached_hash(), *hash, "slot {slot_index}");
            }
        }
    }

    #[test]
    fn clear_keeps_slots() {
        let mut map = HeaderMultiMap::with_capacity(10);
        let cap = map.slots.len();
        map.append("a", "1");
        map.append("b", "2");
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.slots.len(), cap);
        assert_eq!(probe_len(&map), 0);
        assert!(!map.has("a"));
        assert!(map.capacity() >= 10);
    }
}
