//! digit-viz CLI - inspect the connection layout the studio draws.
//!
//! The interactive app lives in the `studio` binary:
//!   cargo run --bin studio --release

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use digit_viz::{GeneratorKind, LayoutPass, SeedPolicy, VizConfig};

#[derive(Parser)]
#[command(name = "digit-viz")]
#[command(about = "Inspect the seeded connection layout of the digit visualizer")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "digit-viz.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the connections between two rows as JSON
    Layout {
        /// Layout seed (defaults to the configured one)
        #[arg(short = 'S', long)]
        seed: Option<i64>,

        /// Units in the source row
        #[arg(long)]
        from: usize,

        /// Units in the target row
        #[arg(long)]
        to: usize,

        /// Generator driving the layout
        #[arg(short, long, value_enum)]
        generator: Option<GeneratorArg>,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum GeneratorArg {
    /// frac(sin(n) * 10000)
    Sine,
    /// rand's StdRng
    Std,
}

impl GeneratorArg {
    fn to_kind(self) -> GeneratorKind {
        match self {
            GeneratorArg::Sine => GeneratorKind::Sine,
            GeneratorArg::Std => GeneratorKind::Std,
        }
    }
}

#[derive(Serialize)]
struct LayoutReport {
    seed: i64,
    generator: GeneratorKind,
    from: usize,
    to: usize,
    count: usize,
    connections: Vec<(usize, usize)>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("digit_viz=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = VizConfig::load(Some(cli.config.as_path()))
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Commands::Layout { seed, from, to, generator } => {
            let seed = seed.unwrap_or(config.layout.seed);
            let generator = generator.map(GeneratorArg::to_kind).unwrap_or(config.layout.generator);

            // A single pair: both seed policies draw the same stream.
            let conns = LayoutPass::new(seed)
                .with_policy(SeedPolicy::SharedStream)
                .with_generator(generator)
                .compute(&[from, to]);

            let report = LayoutReport {
                seed,
                generator,
                from,
                to,
                count: conns.len(),
                connections: conns.iter().map(|c| (c.from_unit, c.to_unit)).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
