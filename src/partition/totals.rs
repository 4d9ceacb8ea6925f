use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/// Per-district aggregates the scorer needs: population, partisan index sum
/// and node count, indexed by district label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictTotals {
    pub populations: Vec<u64>,
    pub partisan_sums: Vec<i64>,
    pub sizes: Vec<usize>,
}

impl DistrictTotals {
    /// Aggregate node attributes per district from a complete label vector.
    pub fn from_assignments(graph: &Graph, num_districts: usize, assignments: &[u32]) -> Self {
        assert!(assignments.len() == graph.node_count(), "assignments.len() must equal number of nodes");

        let mut totals = Self {
            populations: vec![0; num_districts],
            partisan_sums: vec![0; num_districts],
            sizes: vec![0; num_districts],
        };

        for (node, &district) in assignments.iter().enumerate() {
            let d = district as usize;
            totals.populations[d] += graph.population(node);
            totals.partisan_sums[d] += graph.partisan_index(node);
            totals.sizes[d] += 1;
        }

        totals
    }

    #[inline] pub fn num_districts(&self) -> usize { self.sizes.len() }

    /// Mean partisan index of a district's nodes (0 for an empty district).
    #[inline]
    pub fn mean_partisan_index(&self, district: u32) -> f64 {
        let d = district as usize;
        if self.sizes[d] == 0 { 0.0 } else { self.partisan_sums[d] as f64 / self.sizes[d] as f64 }
    }

    /// Shift a single node's attributes from `prev` to `next`.
    pub(crate) fn apply_move(&mut self, graph: &Graph, node: usize, prev: u32, next: u32) {
        let (prev, next) = (prev as usize, next as usize);

        self.populations[prev] -= graph.population(node);
        self.populations[next] += graph.population(node);
        self.partisan_sums[prev] -= graph.partisan_index(node);
        self.partisan_sums[next] += graph.partisan_index(node);
        self.sizes[prev] -= 1;
        self.sizes[next] += 1;
    }
}
