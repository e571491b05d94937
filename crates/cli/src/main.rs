//! TehTehAir CLI - Database migrations and provisioning tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! tehtehair-cli migrate
//!
//! # Provision the settings singleton (no-op when it already exists)
//! tehtehair-cli seed settings
//!
//! # Insert products from a YAML file
//! tehtehair-cli seed products --file crates/cli/seed/products.yaml
//!
//! # List every product, hidden ones included
//! tehtehair-cli products list
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Provision settings and sample products
//! - `products` - Inspect the catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tehtehair-cli")]
#[command(author, version, about = "TehTehAir store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Inspect products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Insert the store settings row if the table is empty
    Settings,
    /// Insert products from a YAML file
    Products {
        /// Path to the YAML product list
        #[arg(short, long, default_value = "crates/cli/seed/products.yaml")]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List all products, newest first
    List,
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
        Commands::Seed { target } => match target {
            SeedTarget::Settings => commands::seed::settings().await?,
            SeedTarget::Products { file } => commands::seed::products(&file).await?,
        },
        Commands::Products { action } => match action {
            ProductsAction::List => commands::products::list().await?,
        },
    }
    Ok(())
}
