mod acceptance;
mod chain;
mod proposal;
mod trace;

pub use acceptance::{Outcome, Rejection, accept, acceptance_probability, boltzmann_factor};
pub use chain::{Chain, ChainRng, ChainStats, Step, run};
pub use proposal::{Proposal, propose_move};
pub use trace::{Snapshot, Trace};
