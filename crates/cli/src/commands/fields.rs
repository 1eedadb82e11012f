//! Supplementary-field listing command.
//!
//! # Usage
//!
//! ```bash
//! fieldhand fields -i 3001
//! ```
//!
//! # Environment Variables
//!
//! - `BASELINKER_API_TOKEN` - BaseLinker API token

use fieldhand_core::InventoryId;

use super::CommandError;

/// List the supplementary-field definitions of one inventory.
pub async fn run(inventory: i64) -> Result<(), CommandError> {
    let client = super::client()?;
    let fields = client.extra_fields(InventoryId::new(inventory)).await?;

    if fields.is_empty() {
        tracing::info!("Inventory {inventory} has no supplementary fields");
        return Ok(());
    }

    for field in &fields {
        match &field.editor_type {
            Some(editor) => {
                tracing::info!("{}  {} ({editor})", field.extra_field_id, field.name);
            }
            None => tracing::info!("{}  {}", field.extra_field_id, field.name),
        }
    }

    Ok(())
}
