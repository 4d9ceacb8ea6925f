use std::sync::atomic::{AtomicBool, Ordering};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Result, SamplerConfig,
    chain::{Outcome, Proposal, Rejection, Snapshot, accept, acceptance_probability, propose_move},
    error::ensure_arg,
    graph::Graph,
    objective::Objective,
    partition::Partition,
    report::ChainReport,
};

/// The chain's random source: seedable and resumable at any word position.
pub type ChainRng = ChaCha8Rng;

/// Record of a single chain step, from proposal to decision.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub iteration: usize,
    pub proposal: Option<Proposal>,
    pub boundary_before: usize,
    pub boundary_after: usize,
    pub delta: f64,
    pub probability: f64,
    pub outcome: Outcome,
}

/// Running counts of step outcomes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStats {
    pub accepted: usize,
    pub rejected: usize,
    pub stuck: usize,
}

impl ChainStats {
    /// Total number of steps taken.
    #[inline] pub fn iterations(&self) -> usize { self.accepted + self.rejected + self.stuck }

    /// Fraction of steps that were accepted (0 before the first step).
    pub fn acceptance_rate(&self) -> f64 {
        if self.iterations() == 0 { 0.0 } else { self.accepted as f64 / self.iterations() as f64 }
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Accepted => self.accepted += 1,
            Outcome::Rejected(_) => self.rejected += 1,
            Outcome::Stuck => self.stuck += 1,
        }
    }
}

/// A single Markov chain over district partitions of a shared, read-only graph.
///
/// The chain exclusively owns its partition and random source. Each step
/// proposes a boundary move, scores the candidate delta without touching the
/// partition, and commits only on acceptance.
#[derive(Debug)]
pub struct Chain<'g> {
    graph: &'g Graph,
    partition: Partition,
    objective: Objective,
    beta: f64,
    seed: u64,
    rng: ChainRng,
    score: f64,
    iteration: usize,
    stats: ChainStats,
    log_every: usize,
}

impl<'g> Chain<'g> {
    /// Start a chain from the deterministic initial partition.
    pub fn new(graph: &'g Graph, config: &SamplerConfig) -> Result<Self> {
        config.validate(graph)?;
        let partition = Partition::initial(graph, config.districts)?;
        Self::with_partition(graph, partition, config)
    }

    /// Start a chain from an existing partition.
    pub fn with_partition(graph: &'g Graph, partition: Partition, config: &SamplerConfig) -> Result<Self> {
        config.validate(graph)?;
        ensure_arg!(partition.num_nodes() == graph.node_count(),
            "partition covers {} nodes, graph has {}", partition.num_nodes(), graph.node_count());
        ensure_arg!(partition.num_districts() == config.districts,
            "partition has {} districts, config asks for {}", partition.num_districts(), config.districts);

        let objective = config.objective()?;
        let score = objective.compute(graph, &partition);

        Ok(Self {
            graph,
            partition,
            objective,
            beta: config.beta,
            seed: config.seed,
            rng: ChainRng::seed_from_u64(config.seed),
            score,
            iteration: 0,
            stats: ChainStats::default(),
            log_every: config.log_every,
        })
    }

    /// Resume a chain exactly where a snapshot was taken, including its random stream.
    pub fn from_snapshot(graph: &'g Graph, snapshot: &Snapshot, config: &SamplerConfig) -> Result<Self> {
        let partition = Partition::from_assignments(graph, config.districts, snapshot.assignments.clone())?
            .with_boundary_order(&snapshot.boundary)?;
        let mut chain = Self::with_partition(graph, partition, &SamplerConfig { seed: snapshot.seed, ..config.clone() })?;
        chain.rng.set_word_pos(snapshot.rng_position);
        chain.iteration = snapshot.iteration;
        Ok(chain)
    }

    #[inline] pub fn graph(&self) -> &'g Graph { self.graph }

    #[inline] pub fn partition(&self) -> &Partition { &self.partition }

    #[inline] pub fn into_partition(self) -> Partition { self.partition }

    #[inline] pub fn objective(&self) -> &Objective { &self.objective }

    /// Total score of the current partition.
    #[inline] pub fn score(&self) -> f64 { self.score }

    /// Number of steps taken so far (including steps before a snapshot was resumed).
    #[inline] pub fn iteration(&self) -> usize { self.iteration }

    #[inline] pub fn stats(&self) -> ChainStats { self.stats }

    /// Capture the current state and random stream position.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            iteration: self.iteration,
            assignments: self.partition.assignments().to_vec(),
            score: self.score,
            boundary: self.partition.boundary_edges().to_vec(),
            seed: self.seed,
            rng_position: self.rng.get_word_pos(),
        }
    }

    /// Summarize the current state for reporting.
    pub fn report(&self) -> ChainReport {
        ChainReport::new(self.graph, &self.partition, &self.objective, self.stats)
    }

    /// Perform a single step: propose, score, accept or reject.
    pub fn step(&mut self) -> Step {
        let boundary_before = self.partition.boundary_edge_count();
        let mut step = Step {
            iteration: self.iteration,
            proposal: None,
            boundary_before,
            boundary_after: boundary_before,
            delta: 0.0,
            probability: 0.0,
            outcome: Outcome::Stuck,
        };
        self.iteration += 1;

        step.proposal = propose_move(self.graph, &self.partition, &mut self.rng);
        if let Some(Proposal { node, to, .. }) = step.proposal {
            step.outcome = self.decide(&mut step, node, to);
        }

        self.stats.record(step.outcome);
        tracing::trace!(?step, "chain step");
        step
    }

    /// Score and decide a proposal, committing it on acceptance.
    fn decide(&mut self, step: &mut Step, node: usize, to: u32) -> Outcome {
        if self.partition.would_empty_district(node) {
            return Outcome::Rejected(Rejection::EmptiesDistrict)
        }

        step.boundary_after = self.partition.boundary_count_after(self.graph, node, to);
        if step.boundary_after == 0 {
            return Outcome::Rejected(Rejection::NoBoundaryAfter)
        }

        let candidate = self.objective.score(self.graph, &self.partition.totals_after(self.graph, node, to));
        step.delta = candidate - self.score;
        step.probability = acceptance_probability(step.delta, self.beta, step.boundary_before, step.boundary_after);

        if accept(step.probability, &mut self.rng) {
            self.partition.move_node(self.graph, node, to);
            self.score = candidate;
            Outcome::Accepted
        } else {
            Outcome::Rejected(Rejection::Metropolis)
        }
    }

    /// Run exactly `iterations` steps and return the resulting partition.
    pub fn run(&mut self, iterations: usize) -> &Partition {
        tracing::info!(iterations, beta = self.beta, score = self.score, "starting chain");
        for _ in 0..iterations {
            self.step();
            self.log_progress();
        }
        self.log_summary();
        &self.partition
    }

    /// Run up to `iterations` steps, stopping early at an iteration boundary
    /// once `cancel` is set. Returns the number of steps taken.
    pub fn run_until_cancelled(&mut self, iterations: usize, cancel: &AtomicBool) -> usize {
        let mut taken = 0;
        while taken < iterations && !cancel.load(Ordering::Relaxed) {
            self.step();
            self.log_progress();
            taken += 1;
        }

        if taken < iterations { tracing::info!(taken, iterations, "chain cancelled") }
        self.log_summary();
        taken
    }

    fn log_progress(&self) {
        if self.log_every == 0 || self.iteration % self.log_every != 0 { return }

        let breakdown = self.objective.breakdown(self.graph, self.partition.totals());
        let [population, partisan] = self.objective.metrics();
        tracing::debug!(
            "Iter {}: score {:.6e} | {}={:.4e} {}={:.4e} | boundary {} | accept {:.4}",
            self.iteration,
            self.score,
            population.short_name(), breakdown.population,
            partisan.short_name(), breakdown.partisan,
            self.partition.boundary_edge_count(),
            self.stats.acceptance_rate(),
        );
    }

    fn log_summary(&self) {
        tracing::info!(
            iterations = self.stats.iterations(),
            accepted = self.stats.accepted,
            rejected = self.stats.rejected,
            stuck = self.stats.stuck,
            score = self.score,
            boundary = self.partition.boundary_edge_count(),
            "chain finished",
        );
    }
}

/// Sample a partition: run a chain from the initial partition for
/// `config.iterations` steps and return the final state.
pub fn run(graph: &Graph, config: &SamplerConfig) -> Result<Partition> {
    let mut chain = Chain::new(graph, config)?;
    chain.run(config.iterations);
    Ok(chain.into_partition())
}
