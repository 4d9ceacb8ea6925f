use rand::{Rng, seq::IndexedRandom};

/// An indexed set of undirected edge ids with O(1) insert/remove/contains and
/// O(1) uniform sampling.
///
/// Representation:
/// - `edges` stores the ids currently in the set, in no particular order
/// - `loc[e] = Some(i)` means edge `e` is stored at `edges[i]`
///
/// Removal is swap-remove, so order is not preserved.
#[derive(Debug, Clone)]
pub(crate) struct BoundarySet {
    edges: Vec<usize>,
    loc: Vec<Option<u32>>,
}

impl BoundarySet {
    /// Create an empty set over a universe of `num_edges` edge ids.
    pub(crate) fn new(num_edges: usize) -> Self {
        Self { edges: Vec::with_capacity(num_edges.isqrt() + 1), loc: vec![None; num_edges] }
    }

    /// Size of the edge id universe.
    #[inline] pub(crate) fn num_edges(&self) -> usize { self.loc.len() }

    /// Number of edges currently in the set.
    #[inline] pub(crate) fn len(&self) -> usize { self.edges.len() }

    #[inline]
    pub(crate) fn contains(&self, edge: usize) -> bool {
        debug_assert!(edge < self.loc.len(), "edge id out of range");
        self.loc[edge].is_some()
    }

    /// Read-only view of the edges in the set.
    #[inline] pub(crate) fn as_slice(&self) -> &[usize] { &self.edges }

    /// Pick an edge uniformly at random, or `None` if the set is empty.
    #[inline]
    pub(crate) fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        self.edges.choose(rng).copied()
    }

    /// Rebuild from an iterator of edge ids. Edges not mentioned end up absent.
    pub(crate) fn rebuild_from<I>(&mut self, iter: I) where I: IntoIterator<Item = usize> {
        self.edges.clear();
        self.loc.fill(None);
        for edge in iter { self.insert(edge) }
    }

    /// Insert `edge` (no-op if already present).
    pub(crate) fn insert(&mut self, edge: usize) {
        debug_assert!(edge < self.loc.len(), "edge id out of range");
        if self.loc[edge].is_none() {
            self.loc[edge] = Some(self.edges.len() as u32);
            self.edges.push(edge);
        }
    }

    /// Remove `edge` (no-op if absent).
    pub(crate) fn remove(&mut self, edge: usize) {
        debug_assert!(edge < self.loc.len(), "edge id out of range");
        if let Some(pos) = self.loc[edge].take() {
            let pos = pos as usize;
            self.edges.swap_remove(pos);
            if let Some(&moved) = self.edges.get(pos) {
                self.loc[moved] = Some(pos as u32);
            }
        }
    }

    /// Insert or remove `edge` according to `present`.
    #[inline]
    pub(crate) fn set(&mut self, edge: usize, present: bool) {
        if present { self.insert(edge) } else { self.remove(edge) }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn new_is_empty() {
        let set = BoundarySet::new(10);
        assert_eq!(set.len(), 0);
        assert_eq!(set.num_edges(), 10);
        assert!(!set.contains(3));
        assert_eq!(set.choose(&mut ChaCha8Rng::seed_from_u64(1)), None);
    }

    #[test]
    fn insert_is_idempotent() {
        let mut set = BoundarySet::new(5);
        set.insert(2);
        set.insert(2);
        assert_eq!(set.len(), 1);
        assert!(set.contains(2));
    }

    #[test]
    fn remove_works() {
        let mut set = BoundarySet::new(5);
        set.insert(0);
        set.insert(2);
        set.insert(4);

        set.remove(2);
        assert!(!set.contains(2));
        assert_eq!(set.len(), 2);

        // Removing an absent edge is a no-op
        set.remove(2);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn swap_remove_maintains_consistency() {
        let mut set = BoundarySet::new(10);
        for edge in [0, 2, 4, 6] { set.insert(edge) }

        set.remove(2);

        assert_eq!(set.len(), 3);
        for &edge in set.as_slice() {
            assert!(set.contains(edge));
            assert_eq!(set.as_slice()[set.loc[edge].unwrap() as usize], edge);
        }
    }

    #[test]
    fn rebuild_replaces_contents() {
        let mut set = BoundarySet::new(8);
        set.insert(1);
        set.rebuild_from([3, 5, 7]);

        assert!(!set.contains(1));
        assert_eq!(set.as_slice().iter().copied().collect::<HashSet<_>>(), HashSet::from([3, 5, 7]));
    }

    #[test]
    fn set_toggles_membership() {
        let mut set = BoundarySet::new(4);
        set.set(1, true);
        assert!(set.contains(1));
        set.set(1, false);
        assert!(!set.contains(1));
    }

    #[test]
    fn choose_covers_all_members() {
        let mut set = BoundarySet::new(6);
        for edge in [1, 3, 5] { set.insert(edge) }

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let seen = (0..200).filter_map(|_| set.choose(&mut rng)).collect::<HashSet<_>>();
        assert_eq!(seen, HashSet::from([1, 3, 5]));
    }
}
