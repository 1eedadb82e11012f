//! Inventory picker route handler.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;

use fieldhand_baselinker::types::Inventory;

use crate::error::AppError;
use crate::state::AppState;

/// Inventory display data for templates.
#[derive(Debug, Clone)]
pub struct InventoryView {
    pub id: i64,
    pub name: String,
}

impl From<&Inventory> for InventoryView {
    fn from(inventory: &Inventory) -> Self {
        let name = if inventory.name.is_empty() {
            format!("Inventory {}", inventory.inventory_id)
        } else {
            inventory.name.clone()
        };

        Self {
            id: inventory.inventory_id.as_i64(),
            name,
        }
    }
}

/// Inventory picker page template.
#[derive(Template)]
#[template(path = "inventories/index.html")]
pub struct InventoriesIndexTemplate {
    pub inventories: Vec<InventoryView>,
}

/// Inventory picker page handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let inventories = state.client().inventories().await?;
    let inventories: Vec<InventoryView> = inventories.iter().map(InventoryView::from).collect();

    let template = InventoriesIndexTemplate { inventories };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    })))
}

// ===== Tests =====
