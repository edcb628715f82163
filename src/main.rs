//! Ruleta CLI
//!
//! Serve the engine over HTTP, play single bets, or simulate long runs.

use clap::{Parser, Subcommand};
use ruleta::{
    api::ApiServer,
    config::{generate_sample_config, ConfigLoader, RuletaConfig},
    games::{simulate, BetId, CatalogPreset},
};
use std::path::PathBuf;
use tracing::info;

/// Ruleta engine CLI
#[derive(Parser)]
#[command(name = "ruleta")]
#[command(about = "Roulette outcome and house-edge engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Catalog preset; replaces any `[[bets]]` from the configuration file
    #[arg(long, global = true)]
    preset: Option<CatalogPreset>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the engine over HTTP
    Serve {
        /// Listen port, overrides the configuration
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Place one or more bets and print each result
    Play {
        /// Bet identifier (prize tier in the stock catalogs)
        #[arg(short, long)]
        bet: BetId,

        /// Number of bets to place
        #[arg(short = 'n', long, default_value = "1")]
        count: u64,

        /// RNG seed for a reproducible run
        #[arg(short, long)]
        seed: Option<i64>,
    },

    /// Run many bets and report observed vs. configured odds
    Simulate {
        /// Bet identifier
        #[arg(short, long)]
        bet: BetId,

        /// Rounds to play
        #[arg(short, long, default_value = "200000")]
        rounds: u64,

        /// RNG seed for a reproducible run
        #[arg(short, long)]
        seed: Option<i64>,
    },

    /// List the configured bets
    Catalog,

    /// Write a sample configuration file
    GenerateConfig {
        /// Output path
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "ruleta=debug,tower_http=debug" } else { "ruleta=info,tower_http=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load()?;
    if let Some(preset) = cli.preset {
        config.use_preset(preset);
    }

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.api.port = port;
            }
            ruleta::config::validate(&config)?;
            let engine = config.build_processor()?;
            ApiServer::new(config.api.clone(), engine).run().await
        }
        Commands::Play { bet, count, seed } => run_play(config, bet, count, seed),
        Commands::Simulate { bet, rounds, seed } => run_simulation(config, bet, rounds, seed),
        Commands::Catalog => print_catalog(&config),
        Commands::GenerateConfig { path } => {
            generate_sample_config(&path.to_string_lossy())?;
            info!("Sample configuration written to {}", path.display());
            Ok(())
        }
    }
}

fn run_play(
    mut config: RuletaConfig,
    bet: BetId,
    count: u64,
    seed: Option<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    if seed.is_some() {
        config.engine.seed = seed;
    }
    let mut engine = config.build_processor()?;

    for _ in 0..count {
        let result = engine.process_bet(bet)?;
        println!(
            "number={:>3} {:<4} prize={:>6.2} net={:>+7.2} edge={:>+.4}",
            result.number,
            result.outcome().to_string(),
            result.prize,
            result.net_result,
            result.house_edge,
        );
    }

    let stats = engine.stats();
    println!(
        "staked={:.2} paid_out={:.2} retained={:.2} edge={:+.4} target={:.4} recent_win_rate={:.4}",
        stats.total_staked,
        stats.total_paid_out,
        stats.total_retained,
        stats.current_edge,
        stats.target_edge,
        stats.recent_win_rate,
    );
    Ok(())
}

fn run_simulation(
    mut config: RuletaConfig,
    bet: BetId,
    rounds: u64,
    seed: Option<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    if seed.is_some() {
        config.engine.seed = seed;
    }
    let mut engine = config.build_processor()?;
    let report = simulate(&mut engine, bet, rounds)?;

    println!("Simulation of bet {} over {} rounds", report.bet_id, report.rounds);
    println!("   Wins:              {}", report.wins);
    println!("   Observed win rate: {:.5}", report.observed_win_rate);
    println!("   Target prob.:      {:.5}", report.target_probability);
    println!("   Total staked:      {:.2}", report.total_staked);
    println!("   Total paid out:    {:.2}", report.total_paid_out);
    println!("   Realized edge:     {:+.4}", report.realized_edge);
    println!("   Theoretical edge:  {:+.4}", report.theoretical_edge);
    println!("   Elapsed:           {:?}", report.execution_time);
    Ok(())
}

fn print_catalog(config: &RuletaConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = config.catalog()?;
    for option in catalog.options() {
        println!(
            "{:>4}  {:<12} p={:<7} edge={:+.4} numbers={}",
            option.id,
            option.label,
            option.probability_label(),
            option.theoretical_edge(),
            option.numbers.name(),
        );
    }
    Ok(())
}
