pub mod sample;
pub mod score;

use std::path::Path;

use anyhow::{Context, Result};
use districtor::Graph;

/// Load an adjacency graph document, naming the file in any error.
pub(crate) fn read_graph(path: &Path) -> Result<Graph> {
    let graph = Graph::read_from_json(path)
        .with_context(|| format!("Failed to load graph from {}", path.display()))?;
    tracing::info!(nodes = graph.node_count(), edges = graph.edge_count(), "loaded {}", path.display());
    Ok(graph)
}
