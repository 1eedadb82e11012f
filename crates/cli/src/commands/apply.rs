//! Batch apply command.
//!
//! # Usage
//!
//! ```bash
//! # Set field 467 on product 101 and field 484 on product 102
//! fieldhand apply -i 3001 -e 101:467=24 -e 102:484=red
//!
//! # Field ids also accept the vendor's text-field key form
//! fieldhand apply -i 3001 -e 101:extra_field_467=24
//! ```
//!
//! # Environment Variables
//!
//! - `BASELINKER_API_TOKEN` - BaseLinker API token
//!
//! Rows are applied in the order given. A failing row is reported and the
//! batch carries on; the command still exits 0. Only a missing or rejected
//! token fails the command.

use std::str::FromStr;

use thiserror::Error;

use fieldhand_baselinker::apply_batch;
use fieldhand_core::{EditOutcome, ExtraFieldId, FieldEdit, InventoryId, ProductId};

use super::CommandError;

/// One `PRODUCT:FIELD=VALUE` argument, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSpec {
    /// Product to change.
    pub product_id: ProductId,
    /// Supplementary field to change.
    pub field: ExtraFieldId,
    /// New value, verbatim; everything after the first `=`.
    pub value: String,
}

/// Errors from parsing a `PRODUCT:FIELD=VALUE` argument.
#[derive(Debug, Error)]
pub enum ParseEditSpecError {
    /// The argument did not split into the three expected parts.
    #[error("expected PRODUCT:FIELD=VALUE, got '{0}'")]
    Shape(String),

    /// The product part was not a number.
    #[error("invalid product id '{0}'")]
    ProductId(String),

    /// The field part was neither a field id nor an `extra_field_` key.
    #[error("invalid field id '{0}'")]
    FieldId(String),
}

impl FromStr for EditSpec {
    type Err = ParseEditSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target, value) = s
            .split_once('=')
            .ok_or_else(|| ParseEditSpecError::Shape(s.to_owned()))?;
        let (product, field) = target
            .split_once(':')
            .ok_or_else(|| ParseEditSpecError::Shape(s.to_owned()))?;

        let product_id = product
            .trim()
            .parse::<i64>()
            .map_err(|_| ParseEditSpecError::ProductId(product.to_owned()))?;
        let field = field
            .trim()
            .parse::<ExtraFieldId>()
            .map_err(|_| ParseEditSpecError::FieldId(field.to_owned()))?;

        Ok(Self {
            product_id: ProductId::new(product_id),
            field,
            value: value.to_owned(),
        })
    }
}

impl From<EditSpec> for FieldEdit {
    fn from(spec: EditSpec) -> Self {
        Self::new(spec.product_id, spec.field, spec.value)
    }
}

/// Apply a batch of edits and report every row's outcome.
pub async fn run(inventory: i64, specs: Vec<EditSpec>) -> Result<(), CommandError> {
    if specs.is_empty() {
        tracing::warn!("No edits given, nothing to do");
        return Ok(());
    }

    let client = super::client()?;

    let edits: Vec<FieldEdit> = specs.into_iter().map(FieldEdit::from).collect();
    let total = edits.len();

    let report = apply_batch(&client, InventoryId::new(inventory), edits).await?;

    for result in &report.results {
        match &result.outcome {
            EditOutcome::Success => {
                tracing::info!("product {} field {}: updated", result.product_id, result.field);
            }
            EditOutcome::Failure { kind, message } => {
                tracing::warn!(
                    "product {} field {}: {kind} - {message}",
                    result.product_id,
                    result.field
                );
            }
        }
    }

    tracing::info!("Updated {}/{total} fields", report.succeeded());

    Ok(())
}

// ===== Tests =====

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_field_id() {
        let spec: EditSpec = "101:467=24".parse().expect("valid spec");
        assert_eq!(spec.product_id, ProductId::new(101));
        assert_eq!(spec.field, ExtraFieldId::new(467));
        assert_eq!(spec.value, "24");
    }

    #[test]
    fn test_parses_prefixed_field_key() {
        let spec: EditSpec = "102:extra_field_484=red".parse().expect("valid spec");
        assert_eq!(spec.product_id, ProductId::new(102));
        assert_eq!(spec.field, ExtraFieldId::new(484));
        assert_eq!(spec.value, "red");
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let spec: EditSpec = "101:467=a=b=c".parse().expect("valid spec");
        assert_eq!(spec.value, "a=b=c");
    }

    #[test]
    fn test_empty_value_is_allowed() {
        let spec: EditSpec = "101:467=".parse().expect("valid spec");
        assert_eq!(spec.value, "");
    }

    #[test]
    fn test_rejects_missing_equals() {
        let err = "101:467".parse::<EditSpec>().unwrap_err();
        assert!(matches!(err, ParseEditSpecError::Shape(_)));
    }

    #[test]
    fn test_rejects_missing_colon() {
        let err = "101467=24".parse::<EditSpec>().unwrap_err();
        assert!(matches!(err, ParseEditSpecError::Shape(_)));
    }

    #[test]
    fn test_rejects_bad_product_id() {
        let err = "abc:467=24".parse::<EditSpec>().unwrap_err();
        assert!(matches!(err, ParseEditSpecError::ProductId(_)));
    }

    #[test]
    fn test_rejects_bad_field_id() {
        let err = "101:warranty=24".parse::<EditSpec>().unwrap_err();
        assert!(matches!(err, ParseEditSpecError::FieldId(_)));
    }

    #[test]
    fn test_converts_into_field_edit() {
        let spec: EditSpec = "101:467=24".parse().expect("valid spec");
        let edit = FieldEdit::from(spec);
        assert_eq!(edit, FieldEdit::new(ProductId::new(101), ExtraFieldId::new(467), "24"));
    }
}
