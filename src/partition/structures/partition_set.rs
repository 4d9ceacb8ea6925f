/// PartitionSet maintains a total assignment of elements to sets, with O(1) move/find.
#[derive(Debug, Clone)]
pub(crate) struct PartitionSet {
    sets: Vec<Vec<usize>>,  // sets[s] = elements currently in set s
    index: Vec<u32>,        // index[e] = s when e is in sets[s]
    position: Vec<usize>,   // position[e] = i when sets[s][i] is e
}

impl PartitionSet {
    /// Build from a complete slice of assignments over `num_sets` sets.
    pub(crate) fn from_assignments(num_sets: usize, assignments: &[u32]) -> Self {
        assert!(num_sets > 0, "must have at least one set");

        let mut sets = vec![Vec::new(); num_sets];
        let mut position = Vec::with_capacity(assignments.len());
        for (elem, &set) in assignments.iter().enumerate() {
            assert!((set as usize) < num_sets, "set out of range");
            position.push(sets[set as usize].len());
            sets[set as usize].push(elem);
        }

        Self { sets, index: assignments.to_vec(), position }
    }

    /// Number of sets.
    #[inline] pub(crate) fn num_sets(&self) -> usize { self.sets.len() }

    /// Universe size (number of elements addressable by index).
    #[inline] pub(crate) fn num_elems(&self) -> usize { self.index.len() }

    /// Return the set that `elem` is currently in.
    #[inline]
    pub(crate) fn find(&self, elem: usize) -> u32 {
        debug_assert!(elem < self.index.len(), "element out of range");
        self.index[elem]
    }

    /// Returns a reference to the elements currently in `set`.
    #[inline]
    pub(crate) fn get(&self, set: u32) -> &[usize] {
        debug_assert!((set as usize) < self.sets.len(), "set out of range");
        &self.sets[set as usize]
    }

    /// Number of elements currently in `set`.
    #[inline] pub(crate) fn len_of(&self, set: u32) -> usize { self.get(set).len() }

    /// Get a complete slice of assignments for each element.
    #[inline] pub(crate) fn assignments(&self) -> &[u32] { &self.index }

    /// Move `elem` to `set`. Panics in debug if out of range.
    pub(crate) fn move_to(&mut self, elem: usize, set: u32) {
        debug_assert!(elem < self.index.len(), "element out of range");
        debug_assert!((set as usize) < self.sets.len(), "set out of range");

        let (prev, pos) = (self.index[elem] as usize, self.position[elem]);
        if prev == set as usize { return }

        // Remove from previous set by swapping with last element.
        self.sets[prev].swap_remove(pos);
        if let Some(&moved) = self.sets[prev].get(pos) {
            self.position[moved] = pos;
        }

        // Add to new set.
        self.index[elem] = set;
        self.position[elem] = self.sets[set as usize].len();
        self.sets[set as usize].push(elem);
    }
}
