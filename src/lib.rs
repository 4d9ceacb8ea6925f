#![doc = "Markov chain Monte Carlo sampling of district partitions over a precinct adjacency graph"]
mod chain;
mod config;
mod error;
mod graph;
mod objective;
mod partition;
mod report;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use graph::{Graph, GraphDocument, Node};

#[doc(inline)]
pub use partition::{DistrictTotals, Partition, boundary_edges};

#[doc(inline)]
pub use objective::{
    DEFAULT_POPULATION_WEIGHT, Metric, Objective, ScoreBreakdown, partisan_score, population_score, total_score,
};

#[doc(inline)]
pub use chain::{
    Chain, ChainRng, ChainStats, Outcome, Proposal, Rejection, Snapshot, Step, Trace,
    accept, acceptance_probability, boltzmann_factor, propose_move, run,
};

#[doc(inline)]
pub use config::SamplerConfig;

#[doc(inline)]
pub use report::{ChainReport, DistrictSummary};
