mod graph;
mod io;

pub use graph::{Graph, Node};
pub use io::GraphDocument;

#[cfg(test)]
pub(crate) use graph::tests::node;
