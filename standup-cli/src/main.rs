//! standup CLI - run the spinner API or spin from the terminal
//!
//! - `serve`: HTTP API backed by PostgreSQL (or memory)
//! - `spin`: one-off twisted order for names on the command line
//! - `twists`: list the available twists

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::serve::ServeArgs;
use commands::spin::SpinArgs;
use commands::twists::TwistsArgs;

#[derive(Parser, Debug)]
#[command(
    name = "standup",
    author,
    version,
    about = "Randomize the speaking order for daily standups",
    long_about = "Randomize the speaking order for daily standups, with optional twists: \
                  reverse, random skip, double turn and pair up."
)]
struct Cli {
    /// Debug logging (RUST_LOG still wins)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Spin an order for the given names
    Spin(SpinArgs),
    /// List available twists
    Twists(TwistsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Spin(args) => commands::spin::run_spin(args),
        Commands::Twists(args) => commands::twists::run_twists(args),
    };

    tracing_setup::shutdown_otel();
    result
}
