//! HTTP route handlers for the field editor UI.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Health check
//!
//! # Inventories
//! GET  /                                    - Inventory picker
//!
//! # Products
//! GET  /inventories/{inventory_id}/products - Editable product table
//!
//! # Edits API
//! POST /api/inventories/{inventory_id}/edits - Apply a batch of field edits
//! ```

pub mod edits;
pub mod inventories;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the field editor.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Inventory picker
        .route("/", get(inventories::index))
        // Editable product table
        .route(
            "/inventories/{inventory_id}/products",
            get(products::index),
        )
        // Batch edit API
        .route(
            "/api/inventories/{inventory_id}/edits",
            post(edits::apply),
        )
}
