//! RetroSkin - Delta skin to RetroArch overlay converter
//!
//! Converts a Delta skin (directory or `.deltaskin` archive) into a
//! RetroArch overlay config, a debug overlay config and a screen shader.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use retroskin::cli::{ConfigArgs, ConvertArgs, ExitCode};

/// RetroSkin - convert Delta skins into RetroArch overlays
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a skin into overlay configs and a shader
    Convert(ConvertArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Command::Convert(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    match result {
        Ok(()) => ExitCode::Success.into(),
        Err(err) => {
            eprintln!("Error: {err}");
            err.exit_code().into()
        }
    }
}
