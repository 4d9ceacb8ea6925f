use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use crate::chain::{Chain, Outcome};

/// A committed chain state, sufficient to resume the chain exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of steps taken when the state was captured.
    pub iteration: usize,
    /// District label per node index.
    pub assignments: Vec<u32>,
    pub score: f64,
    /// Boundary edge ids in the order proposals index into.
    pub boundary: Vec<usize>,
    pub seed: u64,
    /// Word position of the chain's random stream.
    pub rng_position: u128,
}

/// Lazy iterator over the accepted states of a bounded run.
///
/// Each call to `next` advances the chain until a move is accepted or the
/// iteration budget is spent. Rejected and stuck steps still consume budget.
pub struct Trace<'c, 'g> {
    chain: &'c mut Chain<'g>,
    remaining: usize,
}

impl<'g> Chain<'g> {
    /// Step the chain at most `iterations` times, yielding each accepted state.
    pub fn trace(&mut self, iterations: usize) -> Trace<'_, 'g> {
        Trace { chain: self, remaining: iterations }
    }
}

impl<'c, 'g> Trace<'c, 'g> {
    /// Steps left in the budget.
    #[inline] pub fn remaining(&self) -> usize { self.remaining }

    /// The chain being traced.
    #[inline] pub fn chain(&self) -> &Chain<'g> { &*self.chain }
}

impl Iterator for Trace<'_, '_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        while self.remaining > 0 {
            self.remaining -= 1;
            if self.chain.step().outcome == Outcome::Accepted {
                return Some(self.chain.snapshot())
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (0, Some(self.remaining)) }
}

impl FusedIterator for Trace<'_, '_> {}
