//! Product table command.
//!
//! # Usage
//!
//! ```bash
//! fieldhand products -i 3001
//! ```
//!
//! # Environment Variables
//!
//! - `BASELINKER_API_TOKEN` - BaseLinker API token

use fieldhand_baselinker::load_catalog;
use fieldhand_core::InventoryId;

use super::CommandError;

/// Show the product table with current supplementary values.
///
/// Field definitions come first so the `field=value` pairs in the product
/// lines can be read against them.
pub async fn run(inventory: i64) -> Result<(), CommandError> {
    let client = super::client()?;
    let catalog = load_catalog(&client, InventoryId::new(inventory)).await?;

    if catalog.products.is_empty() {
        tracing::info!("Inventory {inventory} has no products");
        return Ok(());
    }

    for field in &catalog.fields {
        tracing::info!("field {}  {}", field.extra_field_id, field.name);
    }

    for product in &catalog.products {
        let price = product
            .price
            .map_or_else(|| "N/A".to_string(), |price| format!("{price:.2}"));
        let values: Vec<String> = product
            .values
            .iter()
            .map(|value| format!("{}={}", value.field, value.value))
            .collect();

        tracing::info!(
            "{}  sku={} ean={} price={}  {}  [{}]",
            product.id,
            product.sku,
            product.ean,
            price,
            product.name,
            values.join(", ")
        );
    }

    Ok(())
}
