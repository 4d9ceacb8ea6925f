use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result, anyhow, ensure};
use districtor::{Graph, Objective, Partition};

use crate::cli::{Cli, ScoreArgs};

/// Read a node id -> district map, either bare or under a report's `assignments` key.
fn read_assignments(path: &Path) -> Result<BTreeMap<u64, u32>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read assignments from {}", path.display()))?;
    let mut value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Malformed JSON in {}", path.display()))?;

    if let Some(inner) = value.get_mut("assignments") { value = inner.take() }
    serde_json::from_value(value)
        .with_context(|| format!("Expected an object from node id to district in {}", path.display()))
}

/// Turn an id-keyed assignment into a partition over the graph's node order.
fn to_partition(graph: &Graph, by_id: &BTreeMap<u64, u32>, districts: Option<usize>) -> Result<Partition> {
    ensure!(by_id.len() == graph.node_count(),
        "assignment covers {} nodes, graph has {}", by_id.len(), graph.node_count());

    let mut assignments = vec![0; graph.node_count()];
    for (&id, &district) in by_id {
        let node = graph.index_of(id).ok_or_else(|| anyhow!("node {id} is not in the graph"))?;
        assignments[node] = district;
    }

    let districts = districts.unwrap_or_else(|| assignments.iter().max().map_or(1, |&d| d as usize + 1));
    Ok(Partition::from_assignments(graph, districts, assignments)?)
}

pub fn run(_cli: &Cli, args: &ScoreArgs) -> Result<()> {
    let graph = super::read_graph(&args.graph)?;

    let partition = match &args.assignments {
        Some(path) => to_partition(&graph, &read_assignments(path)?, args.districts)?,
        None => Partition::initial(&graph, args.districts.unwrap_or(2))?,
    };

    let objective = Objective::new(args.population_weight, args.partisan_target, args.lambda)?;
    let breakdown = objective.breakdown(&graph, partition.totals());
    tracing::debug!("{objective}");

    println!("{}", serde_json::to_string_pretty(&breakdown)?);
    Ok(())
}
