//! `passkey39` developer CLI.
//!
//! Builds deterministic challenges, derives keys from authenticator
//! signatures and converts between the hex and mnemonic encodings of a key.

mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::Command;

#[derive(Parser)]
#[command(name = "passkey39", version)]
#[command(about = "Deterministic private keys from passkey signatures")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("passkey39={default_level}")));

    // Logs go to stderr so stdout only carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let output = commands::run(cli.command)?;
    println!("{output}");
    Ok(())
}
