//! Fieldhand CLI - BaseLinker supplementary-field tools.
//!
//! # Usage
//!
//! ```bash
//! # List inventories available to the API token
//! fieldhand inventories
//!
//! # List supplementary-field definitions for an inventory
//! fieldhand fields -i 3001
//!
//! # Show the product table with current supplementary values
//! fieldhand products -i 3001
//!
//! # Apply a batch of edits in one go
//! fieldhand apply -i 3001 -e 101:467=24 -e 102:484=red
//!
//! # Edit fields interactively
//! fieldhand edit -i 3001
//! ```
//!
//! # Commands
//!
//! - `inventories` - List inventories
//! - `fields` - List supplementary-field definitions
//! - `products` - Show the product table
//! - `apply` - Apply a batch of field edits
//! - `edit` - Edit fields interactively
//!
//! # Exit Codes
//!
//! A completed batch exits 0 even when individual rows failed; the per-row
//! outcomes are in the output. A missing token or a token the vendor rejects
//! exits 1.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::apply::EditSpec;

#[derive(Parser)]
#[command(name = "fieldhand")]
#[command(author, version, about = "BaseLinker supplementary-field tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List inventories available to the API token
    Inventories,
    /// List supplementary-field definitions for an inventory
    Fields {
        /// Inventory id
        #[arg(short, long)]
        inventory: i64,
    },
    /// Show the product table with current supplementary values
    Products {
        /// Inventory id
        #[arg(short, long)]
        inventory: i64,
    },
    /// Apply a batch of supplementary-field edits
    Apply {
        /// Inventory id
        #[arg(short, long)]
        inventory: i64,

        /// Edit to apply, as `PRODUCT:FIELD=VALUE`; repeat for more rows.
        /// `FIELD` is the numeric field id, with or without the vendor's
        /// `extra_field_` prefix.
        #[arg(short, long = "edit", value_name = "PRODUCT:FIELD=VALUE")]
        edits: Vec<EditSpec>,
    },
    /// Edit supplementary fields interactively
    Edit {
        /// Inventory id; prompted for when omitted
        #[arg(short, long)]
        inventory: Option<i64>,
    },
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
        Commands::Inventories => commands::inventories::run().await?,
        Commands::Fields { inventory } => commands::fields::run(inventory).await?,
        Commands::Products { inventory } => commands::products::run(inventory).await?,
        Commands::Apply { inventory, edits } => commands::apply::run(inventory, edits).await?,
        Commands::Edit { inventory } => commands::edit::run(inventory).await?,
    }
    Ok(())
}
