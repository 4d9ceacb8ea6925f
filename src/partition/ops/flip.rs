use crate::{graph::Graph, partition::{DistrictTotals, Partition}};

impl Partition {
    /// Move a single node to a different district, updating caches in O(degree).
    ///
    /// The caller must rule out moves that would empty the source district
    /// (see [`Partition::would_empty_district`]); such a move panics.
    pub fn move_node(&mut self, graph: &Graph, node: usize, district: u32) {
        assert!(node < self.num_nodes(), "node {} out of range", node);
        assert!((district as usize) < self.num_districts(),
            "district {} out of range [0, {})", district, self.num_districts());

        let prev = self.district_of(node);
        if prev == district { return }

        assert!(!self.would_empty_district(node), "moving node {} would empty district {}", node, prev);

        // Commit assignment.
        self.members.move_to(node, district);

        // Only edges incident to `node` can change boundary status.
        for (v, edge) in graph.incident_edges(node) {
            self.boundary.set(edge, self.district_of(v) != district);
        }

        // Update aggregated totals (subtract from old, add to new).
        self.totals.apply_move(graph, node, prev, district);
    }

    /// Return a copy of this partition with `node` moved to `district`.
    pub fn with_move(&self, graph: &Graph, node: usize, district: u32) -> Partition {
        let mut next = self.clone();
        next.move_node(graph, node, district);
        next
    }

    /// Number of boundary edges there would be after moving `node` to
    /// `district`, without committing the move.
    pub fn boundary_count_after(&self, graph: &Graph, node: usize, district: u32) -> usize {
        let prev = self.district_of(node);
        if prev == district { return self.boundary_edge_count() }

        let (mut gained, mut lost) = (0, 0);
        for v in graph.neighbors(node) {
            let label = self.district_of(v);
            match (label != prev, label != district) {
                (false, true) => gained += 1,
                (true, false) => lost += 1,
                _ => {}
            }
        }

        self.boundary_edge_count() + gained - lost
    }

    /// District totals after moving `node` to `district`, without committing the move.
    pub fn totals_after(&self, graph: &Graph, node: usize, district: u32) -> DistrictTotals {
        let mut totals = self.totals.clone();
        let prev = self.district_of(node);
        if prev != district { totals.apply_move(graph, node, prev, district) }
        totals
    }
}

#[cfg(test)]
mod tests {
    use crate::{graph::{Graph, node}, partition::{DistrictTotals, Partition, boundary_edges}};

    /// 3x3 grid, node id = 3 * row + col.
    fn grid() -> Graph {
        let mut edges = Vec::new();
        for r in 0..3u64 {
            for c in 0..3u64 {
                let id = 3 * r + c;
                if c < 2 { edges.push((id, id + 1)) }
                if r < 2 { edges.push((id, id + 3)) }
            }
        }
        Graph::new((0..9).map(|i| node(i, 10 * (i + 1), i as i64 - 4)).collect(), &edges).unwrap()
    }

    fn assert_caches_consistent(graph: &Graph, partition: &Partition) {
        let mut cached = partition.boundary_edges().to_vec();
        cached.sort_unstable();
        assert_eq!(cached, boundary_edges(graph, partition.assignments()));
        assert_eq!(
            partition.totals(),
            &DistrictTotals::from_assignments(graph, partition.num_districts(), partition.assignments()),
        );
        for d in 0..partition.num_districts() as u32 {
            for &u in partition.district_nodes(d) {
                assert_eq!(partition.district_of(u), d);
            }
        }
    }

    #[test]
    fn move_node_updates_boundary_and_totals() {
        let graph = grid();
        let mut partition = Partition::initial(&graph, 3).unwrap(); // rows
        assert_eq!(partition.boundary_edge_count(), 6);

        // Move the center of the grid into the top row.
        partition.move_node(&graph, 4, 0);
        assert_eq!(partition.district_of(4), 0);
        assert_eq!(partition.district_size(0), 4);
        assert_eq!(partition.district_size(1), 2);
        assert_eq!(partition.district_population(0), 10 + 20 + 30 + 50);
        assert_caches_consistent(&graph, &partition);
    }

    #[test]
    fn boundary_count_after_matches_commit() {
        let graph = grid();
        let partition = Partition::initial(&graph, 3).unwrap();

        for node in 0..9 {
            for district in 0..3 {
                if partition.district_of(node) != district && partition.would_empty_district(node) { continue }
                let predicted = partition.boundary_count_after(&graph, node, district);
                let moved = partition.with_move(&graph, node, district);
                assert_eq!(predicted, moved.boundary_edge_count(), "node {node} -> {district}");
                assert_eq!(partition.totals_after(&graph, node, district), *moved.totals());
                assert_caches_consistent(&graph, &moved);
            }
        }
    }

    #[test]
    fn with_move_leaves_original_untouched() {
        let graph = grid();
        let partition = Partition::initial(&graph, 3).unwrap();
        let before = partition.clone();

        let moved = partition.with_move(&graph, 3, 0);
        assert_ne!(moved, partition);
        assert_eq!(partition, before);
    }

    #[test]
    fn moving_back_restores_equality() {
        let graph = grid();
        let mut partition = Partition::initial(&graph, 3).unwrap();
        let before = partition.clone();

        partition.move_node(&graph, 5, 2);
        partition.move_node(&graph, 5, 1);

        assert_eq!(partition, before);
        assert_caches_consistent(&graph, &partition);
    }

    #[test]
    fn move_to_same_district_is_noop() {
        let graph = grid();
        let mut partition = Partition::initial(&graph, 3).unwrap();
        let before = partition.clone();
        partition.move_node(&graph, 0, 0);
        assert_eq!(partition, before);
        assert_eq!(partition.boundary_count_after(&graph, 0, 0), partition.boundary_edge_count());
    }

    #[test]
    #[should_panic(expected = "would empty district")]
    fn move_node_panics_when_emptying_district() {
        let graph = grid();
        let mut partition = Partition::from_assignments(&graph, 2, vec![0, 1, 1, 1, 1, 1, 1, 1, 1]).unwrap();
        partition.move_node(&graph, 0, 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn move_node_panics_for_unknown_district() {
        let graph = grid();
        let mut partition = Partition::initial(&graph, 3).unwrap();
        partition.move_node(&graph, 0, 3);
    }
}
