//! Interactive editing command.
//!
//! # Usage
//!
//! ```bash
//! fieldhand edit -i 3001
//!
//! # Prompt for the inventory as well
//! fieldhand edit
//! ```
//!
//! # Environment Variables
//!
//! - `BASELINKER_API_TOKEN` - BaseLinker API token
//!
//! Walks product and field selection with keyboard prompts and applies each
//! confirmed change immediately, so a rejected value is visible before the
//! next one is typed.

use std::time::Duration;

use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use fieldhand_baselinker::{BaselinkerClient, apply_batch, load_catalog};
use fieldhand_core::{EditOutcome, FieldEdit, InventoryId};

use super::CommandError;

/// Edit supplementary fields interactively.
pub async fn run(inventory: Option<i64>) -> Result<(), CommandError> {
    let client = super::client()?;

    let inventory_id = match inventory {
        Some(id) => InventoryId::new(id),
        None => pick_inventory(&client).await?,
    };

    let progress = spinner("Loading catalog...");
    let catalog = load_catalog(&client, inventory_id).await;
    progress.finish_and_clear();
    let mut catalog = catalog?;

    if catalog.fields.is_empty() {
        tracing::warn!("Inventory {inventory_id} has no supplementary fields to edit");
        return Ok(());
    }
    if catalog.products.is_empty() {
        tracing::warn!("Inventory {inventory_id} has no products");
        return Ok(());
    }

    loop {
        let mut product_labels: Vec<String> = catalog
            .products
            .iter()
            .map(|product| format!("{}  {}", product.id, product.name))
            .collect();
        product_labels.push("Done".to_string());

        let product_index = Select::new()
            .with_prompt("Product")
            .items(&product_labels)
            .default(0)
            .interact()?;
        if product_index == catalog.products.len() {
            break;
        }

        let field_labels: Vec<String> = catalog
            .fields
            .iter()
            .map(|field| format!("{}  {}", field.extra_field_id, field.name))
            .collect();
        let field_index = Select::new()
            .with_prompt("Field")
            .items(&field_labels)
            .default(0)
            .interact()?;

        let Some(product) = catalog.products.get(product_index) else {
            continue;
        };
        let Some(field) = catalog.fields.get(field_index) else {
            continue;
        };

        let product_id = product.id;
        let field_id = field.extra_field_id;
        let field_name = field.name.clone();
        // Row values are aligned with catalog.fields, so the field index
        // doubles as the value index.
        let current = product
            .values
            .get(field_index)
            .map(|value| value.value.clone())
            .unwrap_or_default();

        let new_value: String = Input::new()
            .with_prompt(format!("{field_name} for product {product_id}"))
            .with_initial_text(current.clone())
            .allow_empty(true)
            .interact_text()?;

        if new_value == current {
            tracing::info!("Value unchanged, skipping");
        } else {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Set {field_name} on product {product_id} to '{new_value}'?"
                ))
                .default(true)
                .interact()?;

            if confirmed {
                let progress = spinner("Applying edit...");
                let report = apply_batch(
                    &client,
                    inventory_id,
                    vec![FieldEdit::new(product_id, field_id, new_value.clone())],
                )
                .await;
                progress.finish_and_clear();
                let report = report?;

                match report.results.first().map(|result| &result.outcome) {
                    Some(EditOutcome::Success) => {
                        if let Some(value) = catalog
                            .products
                            .get_mut(product_index)
                            .and_then(|product| product.values.get_mut(field_index))
                        {
                            value.value = new_value;
                        }
                        tracing::info!("product {product_id} field {field_id}: updated");
                    }
                    Some(EditOutcome::Failure { kind, message }) => {
                        tracing::warn!(
                            "product {product_id} field {field_id}: {kind} - {message}"
                        );
                    }
                    None => {}
                }
            }
        }

        let again = Confirm::new()
            .with_prompt("Edit another field?")
            .default(true)
            .interact()?;
        if !again {
            break;
        }
    }

    Ok(())
}

/// Prompt for one of the account's inventories.
async fn pick_inventory(client: &BaselinkerClient) -> Result<InventoryId, CommandError> {
    let progress = spinner("Loading inventories...");
    let inventories = client.inventories().await;
    progress.finish_and_clear();
    let inventories = inventories?;

    if inventories.is_empty() {
        return Err(CommandError::NoInventories);
    }
    if let [only] = inventories.as_slice() {
        tracing::info!("Using inventory {}", only.inventory_id);
        return Ok(only.inventory_id);
    }

    let labels: Vec<String> = inventories
        .iter()
        .map(|inventory| format!("{}  {}", inventory.inventory_id, inventory.name))
        .collect();
    let selection = Select::new()
        .with_prompt("Inventory")
        .items(&labels)
        .default(0)
        .interact()?;

    inventories
        .into_iter()
        .nth(selection)
        .map(|inventory| inventory.inventory_id)
        .ok_or(CommandError::NoInventories)
}

/// Spinner shown while a request is in flight.
fn spinner(message: &'static str) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_message(message);
    progress
}
