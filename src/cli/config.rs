//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::constants::{APP_BINARY_NAME, APP_NAME};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the configuration file location
    Path,
    /// Write a configuration file with default values
    Init(ConfigInitArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Configuration file to read instead of the default one
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Write a default configuration file
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Write here instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Replace an existing file
    #[arg(long)]
    force: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => {
                println!("{}", default_path()?.display());
                Ok(())
            }
            ConfigCommand::Init(args) => args.execute(),
        }
    }
}

fn default_path() -> CliResult<PathBuf> {
    Config::config_file_path()
        .map_err(|e| CliError::io(format!("Failed to locate configuration: {e}")))
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            let json = serde_json::to_string_pretty(&config).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?;
            println!("{json}");
        } else {
            let toml = toml::to_string_pretty(&config).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration: {e}"))
            })?;
            println!("# {APP_NAME} configuration");
            print!("{toml}");
        }

        Ok(())
    }
}

impl ConfigInitArgs {
    /// Execute init command
    pub fn execute(&self) -> CliResult<()> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => default_path()?,
        };
        if path.exists() && !self.force {
            return Err(CliError::validation(format!(
                "Configuration already exists: {} (run `{APP_BINARY_NAME} config init --force` to replace it)",
                path.display()
            )));
        }

        Config::default()
            .save_to(&path)
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Wrote default configuration to {}", path.display());
        Ok(())
    }
}
