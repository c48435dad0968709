//! Tinsel CLI - headless driver for the particle Christmas scene

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, generate, simulate};

#[derive(Parser)]
#[command(name = "tinsel")]
#[command(about = "Procedural particle Christmas tree, generated and simulated headlessly", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one particle system and describe it
    Generate {
        /// System to generate
        #[arg(value_enum)]
        system: generate::System,

        /// Path to experience config (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Random seed for reproducible output
        #[arg(long, default_value = "1")]
        seed: u32,

        /// Output format (summary or json)
        #[arg(long, default_value = "summary")]
        format: String,

        /// Write textures to this PNG file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run the experience at a fixed frame rate and report its progress
    Simulate {
        /// Path to experience config (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Random seed for reproducible output
        #[arg(long, default_value = "1")]
        seed: u32,

        /// Simulated duration in seconds
        #[arg(long, default_value = "20")]
        seconds: f32,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Request the experience start at this time
        #[arg(long, default_value = "0")]
        start_at: f32,

        /// Request a close at this time
        #[arg(long)]
        close_at: Option<f32>,

        /// Replay the ribbon at this time
        #[arg(long)]
        replay_at: Option<f32>,

        /// Report every N seconds
        #[arg(long, default_value = "1")]
        every: f32,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Configuration file operations
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            system,
            config,
            seed,
            format,
            output,
        } => generate::run(generate::GenerateArgs {
            system,
            config,
            seed,
            format,
            output,
        }),
        Commands::Simulate {
            config,
            seed,
            seconds,
            fps,
            start_at,
            close_at,
            replay_at,
            every,
            format,
        } => simulate::run(simulate::SimulateArgs {
            config,
            seed,
            seconds,
            fps,
            start_at,
            close_at,
            replay_at,
            every,
            format,
        }),
        Commands::Config(cmd) => config::run(cmd),
    }
}
