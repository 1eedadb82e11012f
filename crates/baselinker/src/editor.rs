//! Batch application of supplementary-field edits, plus the joined catalog
//! view both front ends render.
//!
//! The editor holds the one piece of policy in the system: edits apply
//! strictly in submission order, one awaited request at a time, and a failed
//! row never aborts the rest of the batch. Repeated edits to the same
//! (product, field) pair are all sent, so the last one submitted wins at the
//! vendor. Only a rejected token stops a run early, because no later row
//! could succeed with the same credentials.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::{debug, error, instrument, warn};

use fieldhand_core::{
    ApplyResult, BatchReport, EditOutcome, ExtraFieldId, FailureKind, FieldEdit, InventoryId,
    ProductId,
};

use crate::client::BaselinkerClient;
use crate::error::Error;
use crate::types::{ExtraField, ProductDetail};

/// Joined read-side view of one inventory: the supplementary-field
/// definitions plus one display row per product.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Field definitions, in the vendor's order. Every row's `values` vector
    /// aligns with this.
    pub fields: Vec<ExtraField>,
    /// Product rows sorted by id.
    pub products: Vec<ProductRow>,
}

/// Current value of one supplementary field on one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    /// Which field this cell belongs to.
    pub field: ExtraFieldId,
    /// Current value, empty when unset.
    pub value: String,
}

/// One display row of the catalog table.
#[derive(Debug, Clone)]
pub struct ProductRow {
    /// Vendor-assigned product id.
    pub id: ProductId,
    /// Stock-keeping unit, empty when unset.
    pub sku: String,
    /// EAN barcode, empty when unset.
    pub ean: String,
    /// Display name.
    pub name: String,
    /// Display price, when any price group is configured.
    pub price: Option<Decimal>,
    /// One cell per [`Catalog::fields`] entry, in the same order.
    pub values: Vec<FieldValue>,
}

/// Load the editable view of an inventory.
///
/// Joins the product listing with the per-product detail records (one call
/// each) and the supplementary-field definitions. The detail call is skipped
/// for inventories without products.
///
/// # Errors
///
/// Returns any client error unchanged; the read side has no per-row policy.
#[instrument(skip(client), fields(inventory_id = %inventory_id))]
pub async fn load_catalog(
    client: &BaselinkerClient,
    inventory_id: InventoryId,
) -> Result<Catalog, Error> {
    let fields = client.extra_fields(inventory_id).await?;
    let summaries = client.product_list(inventory_id).await?;

    let details: HashMap<ProductId, ProductDetail> = if summaries.is_empty() {
        HashMap::new()
    } else {
        let ids: Vec<ProductId> = summaries.iter().map(|p| p.id).collect();
        client.product_data(inventory_id, &ids).await?
    };

    let products: Vec<ProductRow> = summaries
        .into_iter()
        .map(|summary| {
            let detail = details.get(&summary.id);

            let values = fields
                .iter()
                .map(|field| FieldValue {
                    field: field.extra_field_id,
                    value: detail
                        .and_then(|d| d.extra_field(field.extra_field_id))
                        .unwrap_or_default()
                        .to_owned(),
                })
                .collect();

            // The listing omits some core fields on older accounts; the
            // detail record fills the gaps.
            let price = summary
                .default_price()
                .or_else(|| detail.and_then(ProductDetail::default_price));
            let name = match detail.map(ProductDetail::name) {
                Some(name) if !name.is_empty() => name.to_owned(),
                _ => summary.name,
            };
            let sku = if summary.sku.is_empty() {
                detail.map(|d| d.sku.clone()).unwrap_or_default()
            } else {
                summary.sku
            };
            let ean = if summary.ean.is_empty() {
                detail.map(|d| d.ean.clone()).unwrap_or_default()
            } else {
                summary.ean
            };

            ProductRow {
                id: summary.id,
                sku,
                ean,
                name,
                price,
                values,
            }
        })
        .collect();

    debug!(
        products = products.len(),
        fields = fields.len(),
        "Catalog loaded"
    );

    Ok(Catalog { fields, products })
}

/// Apply a batch of edits in submission order.
///
/// Fetches the inventory's supplementary-field definitions once up front;
/// edits naming a field the inventory does not define fail locally as
/// validation failures without a request. Every other row issues exactly one
/// update call. Row failures are recorded in the report and the batch
/// continues; the report always holds one result per submitted edit, in
/// order.
///
/// # Errors
///
/// Returns an error only when nothing row-level can be reported: the
/// up-front field lookup failed, or the vendor rejected the token
/// mid-batch.
#[instrument(skip(client, edits), fields(inventory_id = %inventory_id, edits = edits.len()))]
pub async fn apply_batch(
    client: &BaselinkerClient,
    inventory_id: InventoryId,
    edits: Vec<FieldEdit>,
) -> Result<BatchReport, Error> {
    let known_fields: HashSet<ExtraFieldId> = client
        .extra_fields(inventory_id)
        .await?
        .into_iter()
        .map(|field| field.extra_field_id)
        .collect();

    let mut results = Vec::with_capacity(edits.len());

    for edit in edits {
        let outcome = if known_fields.contains(&edit.field) {
            apply_one(client, inventory_id, &edit).await?
        } else {
            warn!(
                product_id = %edit.product_id,
                field = %edit.field,
                "Edit targets a field the inventory does not define"
            );
            EditOutcome::Failure {
                kind: FailureKind::Validation,
                message: format!("inventory has no supplementary field {}", edit.field),
            }
        };

        results.push(ApplyResult {
            product_id: edit.product_id,
            field: edit.field,
            outcome,
        });
    }

    let report = BatchReport { results };
    debug!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "Batch applied"
    );

    Ok(report)
}

/// Issue one update and classify the result.
///
/// Fatal errors propagate; everything else becomes a per-row outcome.
async fn apply_one(
    client: &BaselinkerClient,
    inventory_id: InventoryId,
    edit: &FieldEdit,
) -> Result<EditOutcome, Error> {
    match client
        .update_extra_field(inventory_id, edit.product_id, edit.field, &edit.value)
        .await
    {
        Ok(()) => Ok(EditOutcome::Success),
        Err(err) if err.is_fatal() => {
            error!(
                product_id = %edit.product_id,
                field = %edit.field,
                error = %err,
                "Token rejected, aborting batch"
            );
            Err(err)
        }
        Err(err) => {
            let kind = err.failure_kind().unwrap_or(FailureKind::Transport);
            warn!(
                product_id = %edit.product_id,
                field = %edit.field,
                error = %err,
                "Edit failed, continuing with the rest of the batch"
            );
            Ok(EditOutcome::Failure {
                kind,
                message: err.to_string(),
            })
        }
    }
}
