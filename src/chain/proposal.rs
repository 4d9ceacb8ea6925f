use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{graph::Graph, partition::Partition};

/// A candidate single-node relabeling: move `node` from district `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub node: usize,
    pub from: u32,
    pub to: u32,
}

/// Propose a move across a uniformly chosen boundary edge.
///
/// One endpoint of the edge is picked uniformly as the node to move; it is
/// relabeled to the district of the other endpoint. Returns `None` when the
/// partition has no boundary edges.
pub fn propose_move<R: Rng + ?Sized>(graph: &Graph, partition: &Partition, rng: &mut R) -> Option<Proposal> {
    let edge = partition.random_boundary_edge(rng)?;
    let (u, v) = graph.endpoints(edge);
    let (node, other) = if rng.random_bool(0.5) { (u, v) } else { (v, u) };

    Some(Proposal { node, from: partition.district_of(node), to: partition.district_of(other) })
}
