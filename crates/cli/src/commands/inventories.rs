//! Inventory listing command.
//!
//! # Usage
//!
//! ```bash
//! fieldhand inventories
//! ```
//!
//! # Environment Variables
//!
//! - `BASELINKER_API_TOKEN` - BaseLinker API token

use super::CommandError;

/// List inventories available to the API token.
pub async fn run() -> Result<(), CommandError> {
    let client = super::client()?;
    let inventories = client.inventories().await?;

    if inventories.is_empty() {
        tracing::info!("No inventories found for this account");
        return Ok(());
    }

    for inventory in &inventories {
        if inventory.name.is_empty() {
            tracing::info!("{}", inventory.inventory_id);
        } else {
            tracing::info!("{}  {}", inventory.inventory_id, inventory.name);
        }
    }

    Ok(())
}
