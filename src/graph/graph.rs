use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::{Result, error::ensure_graph};

/// A geographic unit (county, precinct, block) with its sampling attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: u64,
    pub name: String,
    pub population: u64,
    pub partisan_index: i64,
}

/// An immutable, connected, simple undirected adjacency graph in compressed
/// sparse row format.
///
/// Nodes are addressed by their dense index `0..node_count()` (load order),
/// undirected edges by their dense id `0..edge_count()`. Every undirected
/// edge is stored as two half-edges, each tagged with the id of its edge.
#[derive(Debug)]
pub struct Graph {
    nodes: Vec<Node>,
    index: AHashMap<u64, usize>,  // external id -> node index
    offsets: Vec<u32>,            // half-edge range per node, len = n + 1
    neighbors: Vec<u32>,          // target node per half-edge
    edge_ids: Vec<u32>,           // undirected edge id per half-edge
    endpoints: Vec<(u32, u32)>,   // endpoints per undirected edge, (low, high)
    total_population: u64,
}

impl Graph {
    /// Construct a graph from its nodes and an edge list of external node ids.
    ///
    /// Repeated pairs, in either orientation, collapse into a single edge.
    /// Fails if the graph is empty or disconnected, if node ids repeat, or if an
    /// edge is a self loop or names an unknown node.
    pub fn new(nodes: Vec<Node>, edges: &[(u64, u64)]) -> Result<Self> {
        ensure_graph!(!nodes.is_empty(), "graph has no nodes");

        let mut index = AHashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            ensure_graph!(index.insert(node.id, i).is_none(), "duplicate node id {}", node.id);
        }

        let mut seen = AHashSet::with_capacity(edges.len());
        let mut endpoints = Vec::with_capacity(edges.len());
        for &(a, b) in edges {
            let u = *index.get(&a).ok_or_else(|| unknown_endpoint(a, b, a))?;
            let v = *index.get(&b).ok_or_else(|| unknown_endpoint(a, b, b))?;
            ensure_graph!(u != v, "self loop on node {a}");

            let pair = (u.min(v) as u32, u.max(v) as u32);
            if seen.insert(pair) { endpoints.push(pair) }
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for (edge, &(u, v)) in endpoints.iter().enumerate() {
            adjacency[u as usize].push((v, edge as u32));
            adjacency[v as usize].push((u, edge as u32));
        }

        // Bounding the totals over all nodes bounds every district aggregate.
        let total_population = nodes.iter()
            .try_fold(0u64, |acc, node| acc.checked_add(node.population))
            .ok_or_else(|| crate::Error::InvalidGraph("total population overflows u64".into()))?;
        let partisan_magnitude = nodes.iter()
            .try_fold(0u64, |acc, node| acc.checked_add(node.partisan_index.unsigned_abs()))
            .filter(|&sum| sum <= i64::MAX as u64);
        ensure_graph!(partisan_magnitude.is_some(), "sum of partisan index magnitudes overflows i64");

        let graph = Self {
            total_population,
            offsets: std::iter::once(0u32).chain(
                adjacency.iter()
                    .map(|v| v.len() as u32)
                    .scan(0u32, |acc, len| {*acc += len; Some(*acc)})
            ).collect(),
            neighbors: adjacency.iter().flatten().map(|&(v, _)| v).collect(),
            edge_ids: adjacency.iter().flatten().map(|&(_, e)| e).collect(),
            endpoints,
            index,
            nodes,
        };

        let reached = graph.reachable_from(0);
        ensure_graph!(reached == graph.node_count(),
            "graph is disconnected: {} of {} nodes reachable from node {}",
            reached, graph.node_count(), graph.nodes[0].id);

        Ok(graph)
    }

    /// Get the number of nodes in the graph.
    #[inline] pub fn node_count(&self) -> usize { self.nodes.len() }

    /// Get the number of undirected edges in the graph.
    #[inline] pub fn edge_count(&self) -> usize { self.endpoints.len() }

    /// Get the total population over all nodes.
    #[inline] pub fn total_population(&self) -> u64 { self.total_population }

    /// Get the attribute record for all nodes, in index order.
    #[inline] pub fn nodes(&self) -> &[Node] { &self.nodes }

    #[inline] pub fn node(&self, node: usize) -> &Node { &self.nodes[node] }

    #[inline] pub fn population(&self, node: usize) -> u64 { self.nodes[node].population }

    #[inline] pub fn partisan_index(&self, node: usize) -> i64 { self.nodes[node].partisan_index }

    #[inline] pub fn name(&self, node: usize) -> &str { &self.nodes[node].name }

    /// Get the external id of a node.
    #[inline] pub fn node_id(&self, node: usize) -> u64 { self.nodes[node].id }

    /// Look up the index of a node by its external id.
    #[inline] pub fn index_of(&self, id: u64) -> Option<usize> { self.index.get(&id).copied() }

    /// Get the half-edge range for a given node.
    #[inline]
    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize .. self.offsets[node + 1] as usize
    }

    /// Get the degree (number of neighbors) of a given node.
    #[inline] pub fn degree(&self, node: usize) -> usize { self.range(node).len() }

    /// Get an iterator over the neighbors of a given node.
    #[inline]
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.range(node).map(move |i| self.neighbors[i] as usize)
    }

    /// Get an iterator over `(neighbor, edge id)` pairs for a given node.
    #[inline]
    pub fn incident_edges(&self, node: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.range(node).map(move |i| (self.neighbors[i] as usize, self.edge_ids[i] as usize))
    }

    /// Get the endpoints of an undirected edge, lower index first.
    #[inline]
    pub fn endpoints(&self, edge: usize) -> (usize, usize) {
        let (u, v) = self.endpoints[edge];
        (u as usize, v as usize)
    }

    /// Get an iterator over all undirected edges as `(u, v)` with `u < v`.
    #[inline]
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.endpoints.iter().map(|&(u, v)| (u as usize, v as usize))
    }

    /// Check whether every node is reachable from every other node.
    pub fn is_connected(&self) -> bool { self.reachable_from(0) == self.node_count() }

    /// Count the nodes reachable from `start` by breadth-first search.
    fn reachable_from(&self, start: usize) -> usize {
        let mut visited = vec![false; self.node_count()];
        visited[start] = true;

        let mut count = 1;
        let mut queue = VecDeque::from([start]);
        while let Some(u) = queue.pop_front() {
            for v in self.neighbors(u) {
                if !visited[v] { visited[v] = true; count += 1; queue.push_back(v) }
            }
        }

        count
    }
}

fn unknown_endpoint(a: u64, b: u64, missing: u64) -> crate::Error {
    crate::Error::InvalidGraph(format!("edge ({a}, {b}) references unknown node {missing}"))
}
