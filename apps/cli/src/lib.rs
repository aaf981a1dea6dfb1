//! # Courier CLI Library
//!
//! Command-line front end for the parcel service. `main.rs` only parses
//! arguments and maps the result to an exit code; everything else is here.
//!
//! ## Module Organization
//! ```text
//! courier_cli/
//! ├── lib.rs          ◄─── You are here (argument model, dispatch, logging)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Shared Context (config, auth, API)
//! │   ├── quote.rs    ◄─── courier quote
//! │   ├── coverage.rs ◄─── courier coverage
//! │   ├── send.rs     ◄─── courier send (interactive wizard)
//! │   ├── parcels.rs  ◄─── courier parcels [id]
//! │   ├── payments.rs ◄─── courier payments
//! │   ├── rider.rs    ◄─── courier rider
//! │   └── config.rs   ◄─── courier config show|init
//! ├── prompt.rs       ◄─── Terminal question/answer helpers
//! └── error.rs        ◄─── AppError and exit codes
//! ```

pub mod commands;
pub mod error;
pub mod prompt;

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use courier_client::ClientConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::config::ConfigCommand;
use commands::coverage::CoverageArgs;
use commands::parcels::ParcelsArgs;
use commands::quote::QuoteArgs;
use commands::rider::RiderArgs;
use commands::{identity, Context};
use error::AppResult;
use prompt::Prompter;

/// courier - send parcels, track them, and apply as a rider
#[derive(Parser, Debug)]
#[command(name = "courier")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to client.toml (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Act as this signed-in user (email)
    #[arg(short, long, global = true, env = "COURIER_USER")]
    pub user: Option<String>,

    /// Display name for --user
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a parcel (offline)
    Quote(QuoteArgs),

    /// List served regions and districts
    Coverage(CoverageArgs),

    /// Book a parcel with the interactive wizard
    Send,

    /// Your parcels, or one parcel by id
    Parcels(ParcelsArgs),

    /// Your payment history
    Payments,

    /// Apply to become a rider
    Rider(RiderArgs),

    /// Inspect or create the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Runs one CLI invocation.
pub async fn run(cli: Cli) -> AppResult<()> {
    let mut out = io::stdout();
    let json = cli.json;

    match cli.command {
        Commands::Quote(ref args) => commands::quote::run(args, json, &mut out),
        Commands::Coverage(ref args) => commands::coverage::run(args, json, &mut out),
        Commands::Config(ref command) => {
            let config = ClientConfig::load_or_default(cli.config.clone());
            commands::config::run(command, &config, cli.config.clone(), &mut out)
        }
        Commands::Send => {
            let ctx = connect(&cli)?;
            let mut prompt = Prompter::new(io::stdin().lock(), io::stdout());
            let record = commands::send::run(&ctx, &mut prompt, Local::now().date_naive()).await?;
            if json {
                serde_json::to_writer_pretty(&mut out, &record)?;
                writeln!(out)?;
            }
            Ok(())
        }
        Commands::Parcels(ref args) => {
            commands::parcels::run(&connect(&cli)?, args, json, &mut out).await
        }
        Commands::Payments => commands::payments::run(&connect(&cli)?, json, &mut out).await,
        Commands::Rider(ref args) => {
            commands::rider::run(&connect(&cli)?, args.clone(), &mut out).await
        }
    }
}

/// Loads configuration and builds the API context for network commands.
fn connect(cli: &Cli) -> AppResult<Context> {
    let config = ClientConfig::load(cli.config.clone())?;
    let user = cli
        .user
        .as_deref()
        .map(|email| identity(email, cli.name.as_deref()));
    let ctx = Context::connect(config, user)?;
    info!(base_url = %ctx.config.base_url(), "Connected to parcel API");
    Ok(ctx)
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=courier_client=trace` - Trace the API client only
/// - Default: `info,courier=debug,reqwest=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,courier=debug,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
