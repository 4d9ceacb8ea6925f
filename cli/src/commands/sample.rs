use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use districtor::{Chain, SamplerConfig};

use crate::cli::{Cli, SampleArgs};

/// Resolve the sampler config: file first, then flag overrides.
fn load_config(args: &SampleArgs) -> Result<SamplerConfig> {
    let mut config = match &args.config {
        Some(path) => SamplerConfig::read_from_json(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?,
        None => SamplerConfig::default(),
    };

    if let Some(districts) = args.districts { config.districts = districts }
    if let Some(iterations) = args.iterations { config.iterations = iterations }
    if let Some(beta) = args.beta { config.beta = beta }
    if let Some(lambda) = args.lambda { config.lambda = lambda }
    if let Some(weight) = args.population_weight { config.population_weight = weight }
    if let Some(target) = args.partisan_target { config.partisan_target = target }
    if let Some(seed) = args.seed { config.seed = seed }
    if let Some(log_every) = args.log_every { config.log_every = log_every }

    Ok(config)
}

/// Run the chain, streaming every accepted state to `path` as JSON lines.
fn run_traced(chain: &mut Chain<'_>, iterations: usize, path: &Path) -> Result<usize> {
    let mut writer = BufWriter::new(File::create(path)
        .with_context(|| format!("Failed to create trace file {}", path.display()))?);

    let mut written = 0;
    for snapshot in chain.trace(iterations) {
        serde_json::to_writer(&mut writer, &snapshot)?;
        writeln!(writer)?;
        written += 1;
    }
    writer.flush()?;

    Ok(written)
}

pub fn run(cli: &Cli, args: &SampleArgs) -> Result<()> {
    let out_path = args.output.clone().unwrap_or("./report.json".into());
    let config = load_config(args)?;
    let graph = super::read_graph(&args.graph)?;

    let mut chain = Chain::new(&graph, &config).context("Invalid sampler configuration")?;
    if cli.verbose > 0 { tracing::info!("{}", chain.objective()) }

    match &args.trace {
        Some(path) => {
            let written = run_traced(&mut chain, config.iterations, path)?;
            tracing::info!(states = written, "wrote trace to {}", path.display());
        }
        None => { chain.run(config.iterations); }
    }

    chain.report().write_to_json(&out_path)
        .with_context(|| format!("Failed to write report to {}", out_path.display()))?;
    tracing::info!(score = chain.score(), "wrote report to {}", out_path.display());

    Ok(())
}
