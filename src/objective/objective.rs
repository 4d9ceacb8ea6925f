//! Score mixing: a population-balance term and a partisan-skew term blended
//! by `lambda`.
//!
//! Lower is better. Scores depend only on per-district totals, so the same
//! code evaluates the current state and a candidate move's delta.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::ensure_arg,
    graph::Graph,
    objective::Metric,
    partition::{DistrictTotals, Partition},
};

/// Population weight used when none is configured.
pub const DEFAULT_POPULATION_WEIGHT: f64 = 0.3;

/// Per-term breakdown of a total score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub population: f64,
    pub partisan: f64,
    pub total: f64,
}

/// The sampler's energy function:
///
/// ```text
/// total = lambda * population_score + (1 - lambda) * partisan_score
/// ```
#[derive(Clone, PartialEq)]
pub struct Objective {
    population: Metric,
    partisan: Metric,
    lambda: f64,
}

impl Objective {
    /// Construct an objective; `lambda` must lie in `[0, 1]`.
    pub fn new(population_weight: f64, partisan_target: f64, lambda: f64) -> Result<Self> {
        ensure_arg!((0.0..=1.0).contains(&lambda), "lambda must be in [0, 1], got {lambda}");
        ensure_arg!(population_weight.is_finite() && population_weight >= 0.0,
            "population weight must be finite and non-negative, got {population_weight}");
        ensure_arg!(partisan_target.is_finite(), "partisan target must be finite, got {partisan_target}");

        Ok(Self {
            population: Metric::population_imbalance(population_weight),
            partisan: Metric::partisan_skew(partisan_target),
            lambda,
        })
    }

    /// Mixing weight of the population term.
    #[inline] pub fn lambda(&self) -> f64 { self.lambda }

    /// The two score terms, population first.
    #[inline] pub fn metrics(&self) -> [&Metric; 2] { [&self.population, &self.partisan] }

    /// Score a set of district totals.
    pub fn score(&self, graph: &Graph, totals: &DistrictTotals) -> f64 {
        self.breakdown(graph, totals).total
    }

    /// Score a set of district totals, keeping both terms.
    pub fn breakdown(&self, graph: &Graph, totals: &DistrictTotals) -> ScoreBreakdown {
        let population = self.population.compute_score(totals, graph.total_population());
        let partisan = self.partisan.compute_score(totals, graph.total_population());
        ScoreBreakdown {
            population,
            partisan,
            total: self.lambda * population + (1.0 - self.lambda) * partisan,
        }
    }

    /// Evaluate this objective for a partition.
    pub fn compute(&self, graph: &Graph, partition: &Partition) -> f64 {
        self.score(graph, partition.totals())
    }
}

/// Population-imbalance score of a partition: `weight * Σ (pop_d - P/k)^2`.
pub fn population_score(graph: &Graph, partition: &Partition, weight: f64) -> f64 {
    Metric::population_imbalance(weight).compute_score(partition.totals(), graph.total_population())
}

/// Partisan-skew score of a partition around a neutral target of 0.
pub fn partisan_score(graph: &Graph, partition: &Partition) -> f64 {
    Metric::partisan_skew(0.0).compute_score(partition.totals(), graph.total_population())
}

/// Total score with the default population weight and a neutral partisan target.
pub fn total_score(graph: &Graph, partition: &Partition, lambda: f64) -> Result<f64> {
    Ok(Objective::new(DEFAULT_POPULATION_WEIGHT, 0.0, lambda)?.compute(graph, partition))
}

use std::fmt;

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objective {{")?;
        writeln!(f, "  {} * lambda={}", self.population, self.lambda)?;
        writeln!(f, "  {} * (1 - lambda)={}", self.partisan, 1.0 - self.lambda)?;
        write!(f, "}}")
    }
}

impl fmt::Debug for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
