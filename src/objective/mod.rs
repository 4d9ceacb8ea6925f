mod metric;
mod objective;

pub use metric::Metric;
pub use objective::{
    DEFAULT_POPULATION_WEIGHT, Objective, ScoreBreakdown, partisan_score, population_score, total_score,
};
