//! attntiv CLI — generate exercise content, score rounds, and simulate sessions.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use attntiv_core::{DifficultyTier, ExerciseKind};

mod commands;

#[derive(Parser)]
#[command(name = "attntiv", version, about = "Adaptive brain-training exercise engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one piece of exercise content as JSON
    Generate {
        /// Content type: memory, matrix, n-back, math, pattern, speed, feed
        #[arg(long)]
        content: String,

        /// Difficulty tier
        #[arg(long, default_value = "beginner")]
        tier: DifficultyTier,

        /// Rng seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Matrix side length
        #[arg(long, default_value = "4")]
        size: usize,

        /// N-back distance
        #[arg(long, default_value = "2")]
        n: usize,

        /// N-back sequence length
        #[arg(long, default_value = "20")]
        length: usize,
    },

    /// Compute the score for a round
    Score {
        /// Exercise kind
        #[arg(long)]
        kind: ExerciseKind,

        /// Difficulty tier
        #[arg(long)]
        tier: DifficultyTier,

        /// Accuracy in [0, 1]
        #[arg(long)]
        accuracy: f64,

        /// Seconds of time bonus
        #[arg(long, default_value = "0.0")]
        time_bonus: f64,

        /// Print base, bonus and total separately
        #[arg(long)]
        breakdown: bool,
    },

    /// Play a session with a scripted player and save the report
    Simulate {
        /// Game mode
        #[arg(long)]
        mode: ExerciseKind,

        /// Rounds to play
        #[arg(long, default_value = "5")]
        rounds: u32,

        /// Probability the player answers correctly
        #[arg(long, default_value = "0.8")]
        skill: f64,

        /// Rng seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory
        #[arg(long, default_value = "./attntiv-results")]
        output: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Summarize a saved session report
    Stats {
        /// Report JSON
        #[arg(long)]
        report: PathBuf,
    },

    /// Create a starter attntiv.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("attntiv=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            content,
            tier,
            seed,
            size,
            n,
            length,
        } => commands::generate::execute(content, tier, seed, size, n, length),
        Commands::Score {
            kind,
            tier,
            accuracy,
            time_bonus,
            breakdown,
        } => commands::score::execute(kind, tier, accuracy, time_bonus, breakdown),
        Commands::Simulate {
            mode,
            rounds,
            skill,
            seed,
            output,
            config,
        } => commands::simulate::execute(mode, rounds, skill, seed, output, config),
        Commands::Stats { report } => commands::stats::execute(report),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
