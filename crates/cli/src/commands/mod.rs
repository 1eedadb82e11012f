//! Command implementations.
//!
//! Every command loads configuration on its own, talks to BaseLinker through
//! one [`BaselinkerClient`], and reports through `tracing` so output follows
//! the usual `RUST_LOG` filtering.

pub mod apply;
pub mod edit;
pub mod fields;
pub mod inventories;
pub mod products;

use thiserror::Error;

use fieldhand_baselinker::{BaselinkerClient, Config};

/// Errors shared by the commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] fieldhand_baselinker::ConfigError),

    /// A BaseLinker call failed in a way the batch could not absorb.
    #[error(transparent)]
    Api(#[from] fieldhand_baselinker::Error),

    /// An interactive prompt failed.
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// The account has no inventories to work with.
    #[error("No inventories found for this account")]
    NoInventories,
}

/// Load configuration from the environment and build the client.
pub(crate) fn client() -> Result<BaselinkerClient, CommandError> {
    let config = Config::from_env()?;
    Ok(BaselinkerClient::new(&config))
}
