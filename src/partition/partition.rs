use rand::Rng;

use crate::{
    Result,
    error::ensure_arg,
    graph::Graph,
    partition::{BoundarySet, DistrictTotals, PartitionSet},
};

/// A total assignment of graph nodes to `k` district labels `0..k`, with
/// caches for fast incremental updates.
///
/// Every node carries exactly one label and every district is non-empty.
/// Equality is equality of the label vectors.
#[derive(Clone, Debug)]
pub struct Partition {
    pub(super) members: PartitionSet,   // Sets of nodes in each district
    pub(super) boundary: BoundarySet,   // Edges whose endpoints differ in label
    pub(super) totals: DistrictTotals,  // Aggregated node attributes per district
}

impl Partition {
    /// Deterministic starting partition: split node indices into `num_districts`
    /// consecutive blocks of `n / num_districts` nodes, the last block taking
    /// the remainder.
    ///
    /// Blocks follow load order, so districts need not be geographically
    /// contiguous.
    pub fn initial(graph: &Graph, num_districts: usize) -> Result<Self> {
        let n = graph.node_count();
        ensure_arg!((1..=n).contains(&num_districts),
            "number of districts must be in [1, {n}], got {num_districts}");

        let base = n / num_districts;
        let assignments = (0..n)
            .map(|node| (node / base).min(num_districts - 1) as u32)
            .collect::<Vec<_>>();

        Ok(Self::build(graph, num_districts, assignments))
    }

    /// Construct a partition from an explicit label vector.
    pub fn from_assignments(graph: &Graph, num_districts: usize, assignments: Vec<u32>) -> Result<Self> {
        let n = graph.node_count();
        ensure_arg!((1..=n).contains(&num_districts),
            "number of districts must be in [1, {n}], got {num_districts}");
        ensure_arg!(assignments.len() == n,
            "expected {n} assignments, got {}", assignments.len());
        if let Some(node) = assignments.iter().position(|&d| d as usize >= num_districts) {
            return Err(crate::Error::InvalidArgument(format!(
                "node {} assigned to district {} outside [0, {num_districts})",
                graph.node_id(node), assignments[node],
            )));
        }

        let partition = Self::build(graph, num_districts, assignments);
        if let Some(empty) = (0..num_districts as u32).find(|&d| partition.district_size(d) == 0) {
            return Err(crate::Error::InvalidArgument(format!("district {empty} has no nodes")));
        }

        Ok(partition)
    }

    fn build(graph: &Graph, num_districts: usize, assignments: Vec<u32>) -> Self {
        let mut boundary = BoundarySet::new(graph.edge_count());
        boundary.rebuild_from(boundary_edges(graph, &assignments));

        Self {
            totals: DistrictTotals::from_assignments(graph, num_districts, &assignments),
            members: PartitionSet::from_assignments(num_districts, &assignments),
            boundary,
        }
    }

    /// Get the number of districts in this partition.
    #[inline] pub fn num_districts(&self) -> usize { self.members.num_sets() }

    /// Get the number of nodes in the underlying graph.
    #[inline] pub fn num_nodes(&self) -> usize { self.members.num_elems() }

    /// Get the district label of a given node.
    #[inline] pub fn district_of(&self, node: usize) -> u32 { self.members.find(node) }

    /// Get the complete vector of labels, indexed by node.
    #[inline] pub fn assignments(&self) -> &[u32] { self.members.assignments() }

    /// Get the nodes currently in a district, in no particular order.
    #[inline] pub fn district_nodes(&self, district: u32) -> &[usize] { self.members.get(district) }

    #[inline] pub fn district_size(&self, district: u32) -> usize { self.members.len_of(district) }

    #[inline] pub fn district_population(&self, district: u32) -> u64 { self.totals.populations[district as usize] }

    #[inline] pub fn district_partisan_sum(&self, district: u32) -> i64 { self.totals.partisan_sums[district as usize] }

    /// Get the per-district aggregates of the current state.
    #[inline] pub fn totals(&self) -> &DistrictTotals { &self.totals }

    /// Get the ids of all boundary edges, in no particular order.
    #[inline] pub fn boundary_edges(&self) -> &[usize] { self.boundary.as_slice() }

    #[inline] pub fn boundary_edge_count(&self) -> usize { self.boundary.len() }

    #[inline] pub fn is_boundary_edge(&self, edge: usize) -> bool { self.boundary.contains(edge) }

    /// Pick a boundary edge uniformly at random.
    #[inline]
    pub(crate) fn random_boundary_edge<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        self.boundary.choose(rng)
    }

    /// Reorder the cached boundary edges to `order`, which must list exactly
    /// the current boundary edges. Proposal sampling indexes into this order,
    /// so restoring it is what makes a resumed chain replay identically.
    pub fn with_boundary_order(mut self, order: &[usize]) -> Result<Self> {
        let num_edges = self.boundary.num_edges();
        ensure_arg!(order.len() == self.boundary.len()
            && order.iter().all(|&edge| edge < num_edges && self.boundary.contains(edge)),
            "boundary order does not match the partition's {} boundary edges", self.boundary.len());
        self.boundary.rebuild_from(order.iter().copied());
        ensure_arg!(self.boundary.len() == order.len(), "boundary order lists an edge twice");
        Ok(self)
    }

    /// Check whether relabeling `node` would leave its district empty.
    #[inline]
    pub fn would_empty_district(&self, node: usize) -> bool {
        self.district_size(self.district_of(node)) <= 1
    }
}

impl PartialEq for Partition {
    fn eq(&self, other: &Self) -> bool {
        self.num_districts() == other.num_districts() && self.assignments() == other.assignments()
    }
}

impl Eq for Partition {}

/// Ids of all edges whose endpoints carry different labels, by a full O(|E|) scan.
pub fn boundary_edges(graph: &Graph, assignments: &[u32]) -> Vec<usize> {
    assert!(assignments.len() == graph.node_count(), "assignments.len() must equal number of nodes");
    graph.edges().enumerate()
        .filter_map(|(edge, (u, v))| (assignments[u] != assignments[v]).then_some(edge))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, graph::node};

    /// Path graph 0-1-2-...-(n-1) with unit populations.
    fn path_graph(n: u64) -> Graph {
        Graph::new(
            (0..n).map(|i| node(i, 1, 0)).collect(),
            &(1..n).map(|i| (i - 1, i)).collect::<Vec<_>>(),
        ).unwrap()
    }

    #[test]
    fn initial_puts_remainder_in_last_district() {
        let graph = path_graph(10);
        for k in 1..=10 {
            let partition = Partition::initial(&graph, k).unwrap();
            let sizes = (0..k as u32).map(|d| partition.district_size(d)).collect::<Vec<_>>();
            let base = 10 / k;
            assert!(sizes[..k - 1].iter().all(|&size| size == base), "k={k}: sizes {sizes:?}");
            assert_eq!(sizes[k - 1], base + 10 % k, "k={k}: sizes {sizes:?}");
        }
    }

    #[test]
    fn initial_is_deterministic_and_contiguous_in_index_order() {
        let graph = path_graph(7);
        let a = Partition::initial(&graph, 3).unwrap();
        let b = Partition::initial(&graph, 3).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.assignments(), &[0, 0, 1, 1, 2, 2, 2]);
        assert!(a.assignments().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn initial_rejects_out_of_range_district_count() {
        let graph = path_graph(3);
        assert!(matches!(Partition::initial(&graph, 0), Err(Error::InvalidArgument(_))));
        assert!(matches!(Partition::initial(&graph, 4), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn initial_boundary_matches_scan() {
        let graph = path_graph(9);
        let partition = Partition::initial(&graph, 3).unwrap();

        // Path split into three blocks: cut edges are (2,3) and (5,6).
        let mut cut = partition.boundary_edges().to_vec();
        cut.sort_unstable();
        assert_eq!(cut, vec![2, 5]);
        assert_eq!(cut, boundary_edges(&graph, partition.assignments()));
    }

    #[test]
    fn single_district_has_no_boundary() {
        let graph = path_graph(4);
        let partition = Partition::initial(&graph, 1).unwrap();
        assert_eq!(partition.boundary_edge_count(), 0);
        assert_eq!(partition.district_size(0), 4);
    }

    #[test]
    fn from_assignments_validates_labels() {
        let graph = path_graph(4);

        let ok = Partition::from_assignments(&graph, 2, vec![1, 0, 1, 0]).unwrap();
        assert_eq!(ok.boundary_edge_count(), 3);
        assert_eq!(ok.district_population(0), 2);

        assert!(matches!(Partition::from_assignments(&graph, 2, vec![0, 1, 2, 0]), Err(Error::InvalidArgument(_))));
        assert!(matches!(Partition::from_assignments(&graph, 2, vec![0, 1, 0]), Err(Error::InvalidArgument(_))));
        match Partition::from_assignments(&graph, 3, vec![0, 1, 1, 0]) {
            Err(Error::InvalidArgument(message)) => assert!(message.contains("district 2 has no nodes")),
            other => panic!("expected empty district error, got {other:?}"),
        }
    }

    #[test]
    fn would_empty_district_detects_singletons() {
        let graph = path_graph(3);
        let partition = Partition::from_assignments(&graph, 2, vec![0, 0, 1]).unwrap();
        assert!(!partition.would_empty_district(0));
        assert!(partition.would_empty_district(2));
    }

    #[test]
    fn boundary_order_is_restorable() {
        let graph = path_graph(5);
        let partition = Partition::from_assignments(&graph, 3, vec![0, 1, 1, 2, 0]).unwrap();
        assert_eq!(partition.boundary_edges(), &[0, 2, 3]);

        let reordered = partition.clone().with_boundary_order(&[3, 0, 2]).unwrap();
        assert_eq!(reordered.boundary_edges(), &[3, 0, 2]);
        assert_eq!(reordered, partition);

        assert!(partition.clone().with_boundary_order(&[0, 2]).is_err());
        assert!(partition.clone().with_boundary_order(&[0, 1, 2]).is_err());
        assert!(partition.with_boundary_order(&[0, 0, 2]).is_err());
    }

    #[test]
    fn boundary_order_rejects_unknown_edges() {
        let graph = path_graph(4);
        let partition = Partition::from_assignments(&graph, 2, vec![0, 0, 1, 1]).unwrap();
        assert!(partition.is_boundary_edge(1));
        assert!(!partition.is_boundary_edge(0));

        match partition.with_boundary_order(&[99]) {
            Err(Error::InvalidArgument(message)) => assert!(message.contains("boundary order")),
            other => panic!("expected invalid argument, got {other:?}"),
        }
    }
}
