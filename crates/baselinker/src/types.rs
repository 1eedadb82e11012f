//! Wire types for the BaseLinker connector API.
//!
//! The connector keys most collections by id rendered as a JSON object key,
//! so the response shapes here decode those objects and flatten them into
//! ordinary vectors and maps keyed by the typed ids.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use fieldhand_core::{ExtraFieldId, InventoryId, ProductId};

/// One product catalog (BaseLinker calls these "inventories").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Inventory {
    /// Vendor-assigned inventory id.
    pub inventory_id: InventoryId,
    /// Display name from the panel.
    #[serde(default)]
    pub name: String,
}

/// Supplementary-field definition from `getInventoryExtraFields`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtraField {
    /// Vendor-assigned field id.
    pub extra_field_id: ExtraFieldId,
    /// Display name from the panel.
    pub name: String,
    /// Editor widget hint ("text", "textarea", ...), when the vendor sends one.
    #[serde(default)]
    pub editor_type: Option<String>,
}

/// Product row from `getInventoryProductsList`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    /// Vendor-assigned product id.
    pub id: ProductId,
    /// Stock-keeping unit, empty when unset.
    pub sku: String,
    /// EAN barcode, empty when unset.
    pub ean: String,
    /// Product name as the listing call reports it.
    pub name: String,
    /// Prices keyed by price-group id.
    pub prices: HashMap<String, Decimal>,
}

impl ProductSummary {
    /// Price shown in tables: the lowest-numbered price group's value.
    #[must_use]
    pub fn default_price(&self) -> Option<Decimal> {
        lowest_group_price(&self.prices)
    }
}

/// Per-product detail record from `getInventoryProductsData`.
///
/// The vendor stores the product name and every supplementary value inside
/// `text_fields`, keyed as `extra_field_<id>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDetail {
    /// Stock-keeping unit, empty when unset.
    #[serde(default)]
    pub sku: String,
    /// EAN barcode, empty when unset.
    #[serde(default)]
    pub ean: String,
    /// Prices keyed by price-group id.
    #[serde(default)]
    pub prices: HashMap<String, Decimal>,
    /// Raw text-field map as the vendor sends it.
    #[serde(default)]
    pub text_fields: Map<String, Value>,
}

impl ProductDetail {
    /// Product display name, stored by the vendor in `text_fields`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.text_fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Current value of one supplementary field, if set.
    #[must_use]
    pub fn extra_field(&self, field: ExtraFieldId) -> Option<&str> {
        self.text_fields
            .get(&field.text_field_key())
            .and_then(Value::as_str)
    }

    /// Price shown in tables: the lowest-numbered price group's value.
    #[must_use]
    pub fn default_price(&self) -> Option<Decimal> {
        lowest_group_price(&self.prices)
    }
}

/// Pick a display price deterministically: the lowest-numbered price group.
fn lowest_group_price(prices: &HashMap<String, Decimal>) -> Option<Decimal> {
    prices
        .iter()
        .min_by_key(|(group, _)| group.parse::<i64>().unwrap_or(i64::MAX))
        .map(|(_, price)| *price)
}

// =============================================================================
// Response envelopes
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct InventoriesResponse {
    #[serde(default)]
    pub inventories: Vec<Inventory>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExtraFieldsResponse {
    #[serde(default)]
    pub extra_fields: Vec<ExtraField>,
}

/// Listing entry as the vendor sends it. The id usually repeats the object
/// key; decoding falls back to the key when the entry omits it.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductListEntry {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    sku: String,
    #[serde(default)]
    ean: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    prices: HashMap<String, Decimal>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductListResponse {
    #[serde(default)]
    products: HashMap<String, ProductListEntry>,
}

impl ProductListResponse {
    /// Flatten the id-keyed object into rows sorted by product id.
    ///
    /// Rows whose id can be determined neither from the entry nor from the
    /// key are unaddressable and get dropped.
    pub(crate) fn into_products(self) -> Vec<ProductSummary> {
        let mut rows: Vec<ProductSummary> = self
            .products
            .into_iter()
            .filter_map(|(key, entry)| {
                let id = entry.id.or_else(|| key.parse::<i64>().ok())?;
                Some(ProductSummary {
                    id: ProductId::new(id),
                    sku: entry.sku,
                    ean: entry.ean,
                    name: entry.name,
                    prices: entry.prices,
                })
            })
            .collect();
        rows.sort_by_key(|p| p.id);
        rows
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductDataResponse {
    #[serde(default)]
    products: HashMap<String, ProductDetail>,
}

impl ProductDataResponse {
    /// Re-key the detail records by typed product id.
    pub(crate) fn into_details(self) -> HashMap<ProductId, ProductDetail> {
        self.products
            .into_iter()
            .filter_map(|(key, detail)| {
                let id = key.parse::<i64>().ok()?;
                Some((ProductId::new(id), detail))
            })
            .collect()
    }
}

/// `addInventoryProduct` acknowledgement. Only the echoed id is of interest,
/// and even that is informational.
#[derive(Debug, Deserialize)]
pub(crate) struct UpdateProductResponse {
    #[serde(default)]
    #[allow(dead_code)]
    pub product_id: Option<i64>,
}

// =============================================================================
// Request parameter objects
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct InventoryParams {
    pub inventory_id: InventoryId,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProductDataParams {
    pub inventory_id: InventoryId,
    pub products: Vec<ProductId>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateProductParams {
    pub inventory_id: InventoryId,
    pub product_id: ProductId,
    pub text_fields: Map<String, Value>,
}
