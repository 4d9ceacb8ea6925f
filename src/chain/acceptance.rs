use rand::Rng;
use serde::{Deserialize, Serialize};

/// Why a proposed move was not committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// The moved node was the last one in its district.
    EmptiesDistrict,
    /// The move would leave no boundary edges to propose from.
    NoBoundaryAfter,
    /// The Metropolis-Hastings draw failed.
    Metropolis,
}

/// Terminal state of a single chain step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// No boundary edge existed, so nothing was proposed.
    Stuck,
    Accepted,
    Rejected(Rejection),
}

/// Boltzmann factor `exp(-beta * delta)`, with NaN clamped to 0.
#[inline]
pub fn boltzmann_factor(delta: f64, beta: f64) -> f64 {
    let factor = (-beta * delta).exp();
    if factor.is_nan() { 0.0 } else { factor }
}

/// Metropolis-Hastings acceptance probability for a boundary-edge proposal:
///
/// ```text
/// min(1, B_old / B_new, exp(-beta * delta))
/// ```
///
/// The ratio `B_old / B_new` corrects for the proposal density changing with
/// the number of boundary edges. A move leaving `B_new = 0` is never accepted.
/// The result always lies in `[0, 1]`.
pub fn acceptance_probability(delta: f64, beta: f64, boundary_before: usize, boundary_after: usize) -> f64 {
    if boundary_after == 0 { return 0.0 }
    let combinatorial = boundary_before as f64 / boundary_after as f64;
    1.0f64.min(combinatorial).min(boltzmann_factor(delta, beta))
}

/// Draw `u ~ U[0, 1)` and accept iff `u < probability`.
#[inline]
pub fn accept<R: Rng + ?Sized>(probability: f64, rng: &mut R) -> bool {
    rng.random::<f64>() < probability
}
