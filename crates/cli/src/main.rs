//! Shoestore CLI - Database migrations.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending schema migrations
//! shoestore-cli migrate
//! ```
//!
//! The migrator must run to completion before the web process is expected
//! to serve traffic against a fresh database. It exits 0 on success and
//! non-zero with a diagnostic message when it cannot connect or migrate.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shoestore-cli")]
#[command(author, version, about = "Shoestore CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
    }
    Ok(())
}
