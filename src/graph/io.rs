use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, graph::{Graph, Node}};

/// On-disk form of an adjacency graph: node records plus an edge list of
/// node id pairs.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<(u64, u64)>,
}

impl Graph {
    /// Parse and validate a graph from a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let document: GraphDocument = serde_json::from_str(text)
            .map_err(|err| Error::InvalidGraph(format!("malformed graph document: {err}")))?;
        Graph::new(document.nodes, &document.edges)
    }

    /// Read and validate a graph from a JSON file.
    pub fn read_from_json(path: &Path) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Convert this graph back into its document form.
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self.nodes().to_vec(),
            edges: self.edges().map(|(u, v)| (self.node_id(u), self.node_id(v))).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const PATH_GRAPH: &str = r#"{
        "nodes": [
            {"id": 8001, "name": "Adams",    "population": 519572, "partisan_index": 3},
            {"id": 8005, "name": "Arapahoe", "population": 655070, "partisan_index": 9},
            {"id": 8031, "name": "Denver",   "population": 715522, "partisan_index": 30}
        ],
        "edges": [[8001, 8005], [8005, 8031], [8031, 8005]]
    }"#;

    #[test]
    fn parses_nodes_and_edges() {
        let graph = Graph::from_json_str(PATH_GRAPH).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.name(2), "Denver");
        assert_eq!(graph.index_of(8005), Some(1));
        assert_eq!(graph.total_population(), 519572 + 655070 + 715522);
    }

    #[test]
    fn missing_attribute_is_invalid_graph() {
        let text = r#"{"nodes": [{"id": 1, "name": "A", "population": 10}], "edges": []}"#;
        match Graph::from_json_str(text) {
            Err(Error::InvalidGraph(message)) => assert!(message.contains("partisan_index")),
            other => panic!("expected invalid graph, got {other:?}"),
        }
    }

    #[test]
    fn negative_population_is_invalid_graph() {
        let text = r#"{"nodes": [{"id": 1, "name": "A", "population": -5, "partisan_index": 0}], "edges": []}"#;
        assert!(matches!(Graph::from_json_str(text), Err(Error::InvalidGraph(_))));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PATH_GRAPH.as_bytes()).unwrap();

        let graph = Graph::read_from_json(file.path()).unwrap();
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Graph::read_from_json(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn document_round_trip_preserves_structure() {
        let graph = Graph::from_json_str(PATH_GRAPH).unwrap();
        let text = serde_json::to_string(&graph.to_document()).unwrap();
        let again = Graph::from_json_str(&text).unwrap();

        assert_eq!(again.nodes(), graph.nodes());
        assert_eq!(again.edges().collect::<Vec<_>>(), graph.edges().collect::<Vec<_>>());
    }
}
