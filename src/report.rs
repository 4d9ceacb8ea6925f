use std::{collections::BTreeMap, fs::File, io::{BufWriter, Write}, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    chain::ChainStats,
    graph::Graph,
    objective::{Objective, ScoreBreakdown},
    partition::Partition,
};

/// Aggregates of a single district in a finished chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistrictSummary {
    pub district: u32,
    /// Node ids in the district, ascending.
    pub nodes: Vec<u64>,
    pub population: u64,
    pub mean_partisan_index: f64,
}

/// Serializable summary of a chain's current state, keyed by node id so it
/// can be joined back onto the input graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainReport {
    pub iterations: usize,
    pub stats: ChainStats,
    pub acceptance_rate: f64,
    pub score: ScoreBreakdown,
    pub boundary_edges: usize,
    pub assignments: BTreeMap<u64, u32>,
    pub districts: Vec<DistrictSummary>,
}

impl ChainReport {
    pub fn new(graph: &Graph, partition: &Partition, objective: &Objective, stats: ChainStats) -> Self {
        let totals = partition.totals();
        let districts = (0..partition.num_districts() as u32)
            .map(|district| {
                let mut nodes = partition.district_nodes(district).iter()
                    .map(|&node| graph.node_id(node))
                    .collect::<Vec<_>>();
                nodes.sort_unstable();

                DistrictSummary {
                    district,
                    nodes,
                    population: partition.district_population(district),
                    mean_partisan_index: totals.mean_partisan_index(district),
                }
            })
            .collect();

        Self {
            iterations: stats.iterations(),
            stats,
            acceptance_rate: stats.acceptance_rate(),
            score: objective.breakdown(graph, totals),
            boundary_edges: partition.boundary_edge_count(),
            assignments: partition.assignments().iter().enumerate()
                .map(|(node, &district)| (graph.node_id(node), district))
                .collect(),
            districts,
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_to_json(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self).map_err(std::io::Error::from)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node;

    fn star() -> Graph {
        Graph::new(
            vec![node(10, 5, 2), node(20, 7, -4), node(30, 1, 0), node(40, 3, 8)],
            &[(10, 20), (10, 30), (10, 40)],
        ).unwrap()
    }

    #[test]
    fn summarizes_districts_by_node_id() {
        let graph = star();
        let partition = Partition::from_assignments(&graph, 2, vec![0, 1, 0, 1]).unwrap();
        let objective = Objective::new(1.0, 0.0, 0.5).unwrap();
        let stats = ChainStats { accepted: 3, rejected: 1, stuck: 0 };

        let report = ChainReport::new(&graph, &partition, &objective, stats);
        assert_eq!(report.iterations, 4);
        assert_eq!(report.acceptance_rate, 0.75);
        assert_eq!(report.boundary_edges, 2);
        assert_eq!(report.assignments, BTreeMap::from([(10, 0), (20, 1), (30, 0), (40, 1)]));

        assert_eq!(report.districts[0].nodes, vec![10, 30]);
        assert_eq!(report.districts[0].population, 6);
        assert_eq!(report.districts[0].mean_partisan_index, 1.0);
        assert_eq!(report.districts[1].nodes, vec![20, 40]);
        assert_eq!(report.districts[1].population, 10);
        assert_eq!(report.districts[1].mean_partisan_index, 2.0);

        assert_eq!(report.score.total, objective.compute(&graph, &partition));
    }

    #[test]
    fn writes_json() {
        let graph = star();
        let partition = Partition::initial(&graph, 2).unwrap();
        let report = ChainReport::new(&graph, &partition, &Objective::new(0.3, 0.0, 1.0).unwrap(), ChainStats::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.write_to_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(serde_json::from_str::<ChainReport>(&text).unwrap(), report);
    }
}
