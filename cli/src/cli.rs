use std::path::PathBuf;

/// Redistricting sampler CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "districtor", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Run a Markov chain over district partitions and write a report
    Sample(SampleArgs),

    /// Score an existing district assignment
    Score(ScoreArgs),
}

/// Sampler parameters; any flag given overrides the config file.
#[derive(clap::Args, Debug)]
pub struct SampleArgs {
    /// Adjacency graph (JSON document with `nodes` and `edges`)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub graph: PathBuf,

    /// Sampler config (JSON), defaults apply to anything it omits
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output report file, defaults to "./report.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Also write every accepted state as one JSON line to this file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub trace: Option<PathBuf>,

    /// Number of districts
    #[arg(short, long)]
    pub districts: Option<usize>,

    /// Number of chain iterations
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Inverse temperature
    #[arg(long)]
    pub beta: Option<f64>,

    /// Weight of the population term against the partisan term, in [0, 1]
    #[arg(long)]
    pub lambda: Option<f64>,

    /// Scale of the population imbalance term
    #[arg(long)]
    pub population_weight: Option<f64>,

    /// Mean partisan index districts are pulled toward
    #[arg(long, allow_negative_numbers = true)]
    pub partisan_target: Option<f64>,

    /// Random seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Log progress every this many iterations (0 disables)
    #[arg(long)]
    pub log_every: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct ScoreArgs {
    /// Adjacency graph (JSON document with `nodes` and `edges`)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub graph: PathBuf,

    /// Assignment file: a JSON object from node id to district, or a report
    /// written by `sample`. Scores the initial split when omitted.
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub assignments: Option<PathBuf>,

    /// Number of districts, defaults to the largest label + 1
    #[arg(short, long)]
    pub districts: Option<usize>,

    /// Weight of the population term against the partisan term, in [0, 1]
    #[arg(long, default_value_t = 1.0)]
    pub lambda: f64,

    /// Scale of the population imbalance term
    #[arg(long, default_value_t = districtor::DEFAULT_POPULATION_WEIGHT)]
    pub population_weight: f64,

    /// Mean partisan index districts are pulled toward
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub partisan_target: f64,
}
