use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    error::ensure_arg,
    graph::Graph,
    objective::{DEFAULT_POPULATION_WEIGHT, Objective},
};

/// Parameters of a single sampling run.
///
/// Every field has a default so that a partial JSON document (or the CLI)
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplerConfig {
    /// Number of districts `k`.
    pub districts: usize,
    /// Number of chain iterations (stuck and rejected steps count).
    pub iterations: usize,
    /// Inverse temperature of the Boltzmann factor, must be > 0.
    pub beta: f64,
    /// Mixing weight of the population term, in `[0, 1]`.
    pub lambda: f64,
    /// Scale of the population imbalance term.
    pub population_weight: f64,
    /// Mean partisan index each district is pulled toward.
    pub partisan_target: f64,
    /// Seed of the chain's random source.
    pub seed: u64,
    /// Emit a progress record every this many iterations (0 disables).
    pub log_every: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            districts: 2,
            iterations: 1_000,
            beta: 0.002,
            lambda: 1.0,
            population_weight: DEFAULT_POPULATION_WEIGHT,
            partisan_target: 0.0,
            seed: 46,
            log_every: 1_000,
        }
    }
}

impl SamplerConfig {
    /// Read a (possibly partial) configuration from a JSON file.
    pub fn read_from_json(path: &Path) -> Result<Self> {
        serde_json::from_str(&fs::read_to_string(path)?)
            .map_err(|err| Error::InvalidArgument(format!("malformed sampler config: {err}")))
    }

    /// Check the parameters against each other and against the graph.
    pub fn validate(&self, graph: &Graph) -> Result<()> {
        let n = graph.node_count();
        ensure_arg!((1..=n).contains(&self.districts),
            "number of districts must be in [1, {n}], got {}", self.districts);
        ensure_arg!(self.beta.is_finite() && self.beta > 0.0, "beta must be finite and > 0, got {}", self.beta);
        self.objective().map(|_| ())
    }

    /// Build the score function these parameters describe.
    pub fn objective(&self) -> Result<Objective> {
        Objective::new(self.population_weight, self.partisan_target, self.lambda)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node;

    fn triangle() -> Graph {
        Graph::new(
            vec![node(1, 1, 0), node(2, 1, 0), node(3, 1, 0)],
            &[(1, 2), (2, 3), (3, 1)],
        ).unwrap()
    }

    #[test]
    fn default_is_valid() {
        assert!(SamplerConfig::default().validate(&triangle()).is_ok());
    }

    #[test]
    fn rejects_bad_parameters() {
        let graph = triangle();
        let bad = [
            SamplerConfig { districts: 0, ..Default::default() },
            SamplerConfig { districts: 4, ..Default::default() },
            SamplerConfig { beta: 0.0, ..Default::default() },
            SamplerConfig { beta: -1.0, ..Default::default() },
            SamplerConfig { beta: f64::NAN, ..Default::default() },
            SamplerConfig { lambda: 1.01, ..Default::default() },
            SamplerConfig { population_weight: -0.5, ..Default::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(&graph), Err(Error::InvalidArgument(_))), "{config:?}");
        }
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SamplerConfig = serde_json::from_str(r#"{"districts": 3, "seed": 7}"#).unwrap();
        assert_eq!(config.districts, 3);
        assert_eq!(config.seed, 7);
        assert_eq!(config.beta, SamplerConfig::default().beta);
    }

    #[test]
    fn negative_iterations_are_unrepresentable() {
        assert!(serde_json::from_str::<SamplerConfig>(r#"{"iterations": -1}"#).is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"lambda": 0.5, "beta": 0.1}"#).unwrap();

        let config = SamplerConfig::read_from_json(&path).unwrap();
        assert_eq!(config.lambda, 0.5);
        assert_eq!(config.beta, 0.1);

        fs::write(&path, r#"{"temperature": 3}"#).unwrap();
        assert!(matches!(SamplerConfig::read_from_json(&path), Err(Error::InvalidArgument(_))));
    }
}
