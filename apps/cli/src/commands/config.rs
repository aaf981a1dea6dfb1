//! # Config Command
//!
//! Shows the effective configuration or writes a starter `client.toml`.

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;
use courier_client::ClientConfig;

use crate::error::{AppError, AppResult};

/// `courier config` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file + environment)
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(
    command: &ConfigCommand,
    config: &ClientConfig,
    path: Option<PathBuf>,
    out: &mut impl Write,
) -> AppResult<()> {
    match command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            if shown.api.access_token.is_some() {
                shown.api.access_token = Some("********".to_string());
            }
            let text = toml::to_string_pretty(&shown)
                .map_err(|e| AppError::internal(format!("TOML error: {}", e)))?;
            write!(out, "{}", text)?;
        }
        ConfigCommand::Init { force } => {
            let target = path
                .or_else(ClientConfig::default_config_path)
                .ok_or_else(|| AppError::internal("No config directory available"))?;
            if target.exists() && !force {
                return Err(AppError::validation(format!(
                    "{} already exists (use --force to overwrite)",
                    target.display()
                )));
            }
            let written = ClientConfig::default().save(Some(target))?;
            writeln!(out, "Wrote {}", written.display())?;
        }
    }
    Ok(())
}
