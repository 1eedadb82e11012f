//! Editable product table route handler.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::Html,
};
use rust_decimal::Decimal;
use tracing::instrument;

use fieldhand_baselinker::types::ExtraField;
use fieldhand_baselinker::{ProductRow, load_catalog};
use fieldhand_core::InventoryId;

use crate::error::AppError;
use crate::state::AppState;

/// Supplementary-field column header for templates.
#[derive(Debug, Clone)]
pub struct FieldView {
    pub id: i64,
    pub name: String,
}

/// One editable cell: the current value of a supplementary field.
#[derive(Debug, Clone)]
pub struct CellView {
    pub field_id: i64,
    pub value: String,
}

/// Product row display data for templates.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub id: i64,
    pub sku: String,
    pub ean: String,
    pub name: String,
    pub price: String,
    pub cells: Vec<CellView>,
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Format a price for the table, `N/A` when the product has none.
fn format_price(price: Option<Decimal>) -> String {
    price.map_or_else(|| "N/A".to_string(), |amount| format!("{amount:.2}"))
}

impl From<&ExtraField> for FieldView {
    fn from(field: &ExtraField) -> Self {
        Self {
            id: field.extra_field_id.as_i64(),
            name: field.name.clone(),
        }
    }
}

impl From<&ProductRow> for ProductRowView {
    fn from(row: &ProductRow) -> Self {
        let cells = row
            .values
            .iter()
            .map(|value| CellView {
                field_id: value.field.as_i64(),
                value: value.value.clone(),
            })
            .collect();

        Self {
            id: row.id.as_i64(),
            sku: row.sku.clone(),
            ean: row.ean.clone(),
            name: row.name.clone(),
            price: format_price(row.price),
            cells,
        }
    }
}

/// Editable product table template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub inventory_id: i64,
    pub fields: Vec<FieldView>,
    pub products: Vec<ProductRowView>,
}

/// Editable product table handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Path(inventory_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let catalog = load_catalog(state.client(), InventoryId::new(inventory_id)).await?;

    let template = ProductsIndexTemplate {
        inventory_id,
        fields: catalog.fields.iter().map(FieldView::from).collect(),
        products: catalog.products.iter().map(ProductRowView::from).collect(),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    })))
}

// ===== Tests =====
