use std::collections::HashSet;

/// Immutable set of account handles
///
/// All set operations return a fresh set; operands are never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandleSet {
    inner: HashSet<String>,
}

impl HandleSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn has(&self, handle: &str) -> bool {
        self.inner.contains(handle)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(String::as_str)
    }

    pub fn union(&self, other: &HandleSet) -> HandleSet {
        let (small, large) = self.by_size(other);
        let mut inner = large.inner.clone();
        inner.extend(small.inner.iter().cloned());
        HandleSet { inner }
    }

    /// Walks the smaller operand and looks each handle up in the larger one
    pub fn intersect(&self, other: &HandleSet) -> HandleSet {
        let (small, large) = self.by_size(other);
        small
            .inner
            .iter()
            .filter(|h| large.inner.contains(*h))
            .cloned()
            .collect()
    }

    pub fn difference(&self, other: &HandleSet) -> HandleSet {
        self.inner
            .iter()
            .filter(|h| !other.inner.contains(*h))
            .cloned()
            .collect()
    }

    /// Size of the intersection without allocating it
    pub fn intersection_size(&self, other: &HandleSet) -> usize {
        let (small, large) = self.by_size(other);
        small.inner.iter().filter(|h| large.inner.contains(*h)).count()
    }

    /// Copy of this set with `handle` removed
    pub fn without(&self, handle: &str) -> HandleSet {
        if !self.has(handle) {
            return self.clone();
        }
        self.inner
            .iter()
            .filter(|h| h.as_str() != handle)
            .cloned()
            .collect()
    }

    /// Intersection of every set in `sets`; empty input yields an empty set
    pub fn intersect_all(sets: &[&HandleSet]) -> HandleSet {
        let Some(smallest) = sets.iter().min_by_key(|s| s.size()) else {
            return HandleSet::new();
        };

        smallest
            .inner
            .iter()
            .filter(|h| sets.iter().all(|s| s.inner.contains(*h)))
            .cloned()
            .collect()
    }

    fn by_size<'a>(&'a self, other: &'a HandleSet) -> (&'a HandleSet, &'a HandleSet) {
        if self.size() <= other.size() {
            (self, other)
        } else {
            (other, self)
        }
    }
}

impl FromIterator<String> for HandleSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for HandleSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(String::from).collect(),
        }
    }
}
