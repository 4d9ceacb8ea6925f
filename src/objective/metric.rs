use crate::partition::DistrictTotals;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum MetricKind {
    /// `weight * (population - ideal)^2` per district, ideal = total / k.
    PopulationImbalance { weight: f64 },

    /// `(mean partisan index - target)^2` per district.
    PartisanSkew { target: f64 },
}

/// A single score term evaluated over district totals.
/// This does *not* carry the mixing weight; that lives in `Objective`.
#[derive(Clone, PartialEq)]
pub struct Metric {
    kind: MetricKind,
}

impl Metric {
    /// Squared deviation of district populations from the ideal, scaled by `weight`.
    pub fn population_imbalance(weight: f64) -> Self {
        Self { kind: MetricKind::PopulationImbalance { weight } }
    }

    /// Squared deviation of each district's mean partisan index from `target`.
    /// With `target = 0`, a score of 0 means every district is neutral.
    pub fn partisan_skew(target: f64) -> Self {
        Self { kind: MetricKind::PartisanSkew { target } }
    }

    /// Get a short name for this metric (for display purposes).
    pub fn short_name(&self) -> &str {
        match &self.kind {
            MetricKind::PopulationImbalance { .. } => "pop",
            MetricKind::PartisanSkew { .. } => "pvi",
        }
    }

    /// Evaluate this metric for the given totals, returning per-district terms.
    pub fn compute(&self, totals: &DistrictTotals, total_population: u64) -> Vec<f64> {
        let districts = 0..totals.num_districts() as u32;
        match &self.kind {
            MetricKind::PopulationImbalance { weight } => {
                let ideal = total_population as f64 / totals.num_districts() as f64;
                districts
                    .map(|d| weight * (totals.populations[d as usize] as f64 - ideal).powi(2))
                    .collect()
            }
            MetricKind::PartisanSkew { target } => {
                districts.map(|d| (totals.mean_partisan_index(d) - target).powi(2)).collect()
            }
        }
    }

    /// Aggregate the per-district terms into a single score (their sum).
    pub fn compute_score(&self, totals: &DistrictTotals, total_population: u64) -> f64 {
        self.compute(totals, total_population).iter().sum()
    }
}

use std::fmt;

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            MetricKind::PopulationImbalance { weight } =>
                write!(f, "PopulationImbalance(weight={})", weight),
            MetricKind::PartisanSkew { target } =>
                write!(f, "PartisanSkew(target={})", target),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Metric({})", self.kind)
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
