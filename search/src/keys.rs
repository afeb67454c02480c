//! Key tables and collected-key sets.
//!
//! A [`KeyTable`] fixes the index of every key cell for one run. A [`KeySet`]
//! is a bitmask over those indices, so extending a set produces a fresh
//! value and never touches the parent's copy.

use trikey_kernel::grid::StateKey;

use crate::error::SearchError;

/// Number of keys a well-formed problem requires.
pub const REQUIRED_KEYS: usize = 3;

/// The distinct key cells of a problem, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTable<P> {
    keys: Vec<P>,
}

impl<P: StateKey> KeyTable<P> {
    /// Build a table from caller-supplied key cells.
    ///
    /// Duplicates are collapsed. Fewer than [`REQUIRED_KEYS`] distinct cells
    /// is accepted (the goal becomes "every distinct key collected"); more is
    /// rejected because the set representation is fixed-width.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedProblem`] if more than
    /// [`REQUIRED_KEYS`] distinct cells are supplied.
    pub fn new(mut keys: Vec<P>) -> Result<Self, SearchError> {
        keys.sort();
        keys.dedup();
        if keys.len() > REQUIRED_KEYS {
            return Err(SearchError::MalformedProblem {
                detail: format!(
                    "expected at most {REQUIRED_KEYS} distinct key positions, got {}",
                    keys.len()
                ),
            });
        }
        Ok(Self { keys })
    }

    /// Table index of `position`, if it is a key cell.
    #[must_use]
    pub fn index_of(&self, position: &P) -> Option<usize> {
        self.keys.binary_search(position).ok()
    }

    /// Key cells in table order.
    #[must_use]
    pub fn keys(&self) -> &[P] {
        &self.keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key cells not yet in `collected`.
    pub fn uncollected(&self, collected: KeySet) -> impl Iterator<Item = &P> + '_ {
        self.keys
            .iter()
            .enumerate()
            .filter(move |(i, _)| !collected.contains(*i))
            .map(|(_, k)| k)
    }

    /// The set obtained by arriving at `position` with `inherited` keys.
    #[must_use]
    pub fn collect_at(&self, position: &P, inherited: KeySet) -> KeySet {
        match self.index_of(position) {
            Some(i) => inherited.with(i),
            None => inherited,
        }
    }

    /// `true` if `collected` holds every key in this table.
    #[must_use]
    pub fn is_complete(&self, collected: KeySet) -> bool {
        collected.len() == self.keys.len()
    }
}

/// The keys collected along a path, as a bitmask over [`KeyTable`] indices.
///
/// Two sets are equal iff they hold the same keys; insertion order is not
/// representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeySet(u8);

impl KeySet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// A copy of this set with key `index` added.
    #[must_use]
    pub fn with(self, index: usize) -> Self {
        debug_assert!(index < REQUIRED_KEYS, "key index out of range: {index}");
        Self(self.0 | (1 << index))
    }

    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        index < REQUIRED_KEYS && self.0 & (1 << index) != 0
    }

    /// Number of keys collected.
    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` if every key in `self` is also in `other`.
    #[must_use]
    pub fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Raw mask byte, used in state fingerprints.
    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trikey_kernel::grid::Cell;

    fn table() -> KeyTable<Cell> {
        KeyTable::new(vec![Cell::new(0, 3), Cell::new(0, 1), Cell::new(0, 2)]).unwrap()
    }

    #[test]
    fn table_sorts_and_dedups() {
        let t = KeyTable::new(vec![Cell::new(2, 2), Cell::new(1, 1), Cell::new(2, 2)]).unwrap();
        assert_eq!(t.keys(), &[Cell::new(1, 1), Cell::new(2, 2)]);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn table_rejects_four_distinct_keys() {
        let err = KeyTable::new(vec![
            Cell::new(0, 0),
            Cell::new(0, 1),
            Cell::new(0, 2),
            Cell::new(0, 3),
        ])
        .unwrap_err();
        assert!(matches!(err, SearchError::MalformedProblem { .. }));
    }

    #[test]
    fn extending_does_not_mutate_parent() {
        let parent = KeySet::EMPTY.with(0);
        let child = parent.with(2);
        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
        assert!(parent.is_subset(child));
        assert!(!child.is_subset(parent));
    }

    #[test]
    fn equality_ignores_collection_order() {
        let a = KeySet::EMPTY.with(0).with(1);
        let b = KeySet::EMPTY.with(1).with(0);
        assert_eq!(a, b);
    }

    #[test]
    fn collect_at_adds_only_key_cells() {
        let t = table();
        let s = t.collect_at(&Cell::new(0, 2), KeySet::EMPTY);
        assert!(s.contains(1));
        assert_eq!(s.len(), 1);
        assert_eq!(t.collect_at(&Cell::new(5, 5), s), s);
        // Re-visiting a key is idempotent.
        assert_eq!(t.collect_at(&Cell::new(0, 2), s), s);
    }

    #[test]
    fn completeness_tracks_table_size() {
        let t = table();
        let full = KeySet::EMPTY.with(0).with(1).with(2);
        assert!(t.is_complete(full));
        assert!(!t.is_complete(KeySet::EMPTY.with(0)));
        assert_eq!(t.uncollected(KeySet::EMPTY.with(1)).count(), 2);

        let empty = KeyTable::<Cell>::new(Vec::new()).unwrap();
        assert!(empty.is_complete(KeySet::EMPTY));
    }
}
