/// Zero-crossing indices believed to have flipped sign within a step.
///
/// Built by the sign tracker, narrowed by the root finder, and cleared once
/// the event is applied. Indices are kept in insertion order and never
/// repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCandidateSet {
    indices: Vec<usize>,
}

impl EventCandidateSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an index, returning false if it was already present.
    pub fn insert(&mut self, index: usize) -> bool {
        if self.contains(index) {
            return false;
        }
        self.indices.push(index);
        true
    }

    /// Returns true if the set holds `index`.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Returns the number of indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if there is no candidate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the most recently added index.
    #[must_use]
    pub fn last(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Iterates over the indices in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Removes every index.
    pub fn clear(&mut self) {
        self.indices.clear();
    }
}

impl FromIterator<usize> for EventCandidateSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

impl Extend<usize> for EventCandidateSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for index in iter {
            self.insert(index);
        }
    }
}
