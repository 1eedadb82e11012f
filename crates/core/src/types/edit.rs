//! Batch-edit vocabulary shared by the field editor and both front ends.
//!
//! A front end collects [`FieldEdit`] rows, the editor applies them in
//! submission order, and every row comes back as an [`ApplyResult`] inside a
//! [`BatchReport`]. Per-row failures are data, not errors: a report always
//! holds one result per submitted edit.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::id::{ExtraFieldId, ProductId};

/// A single requested change to one supplementary field on one product.
///
/// Created by a front end from user input and consumed exactly once by the
/// field editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEdit {
    /// Vendor-assigned product identifier.
    pub product_id: ProductId,
    /// The supplementary field being changed.
    pub field: ExtraFieldId,
    /// The new value, verbatim as entered.
    pub value: String,
}

impl FieldEdit {
    /// Create a new edit row.
    #[must_use]
    pub fn new(product_id: ProductId, field: ExtraFieldId, value: impl Into<String>) -> Self {
        Self {
            product_id,
            field,
            value: value.into(),
        }
    }
}

/// Classification of a per-row failure.
///
/// Fatal conditions (missing configuration, rejected token) never appear
/// here; those abort the batch before or during the run instead of being
/// recorded per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The vendor rejected the field or value.
    Validation,
    /// The vendor signalled throttling; the row was not applied.
    RateLimited,
    /// The request never produced a decodable vendor answer.
    Transport,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Matches the serialized names so logs and JSON agree.
        let kind = match self {
            Self::Validation => "validation",
            Self::RateLimited => "rate_limited",
            Self::Transport => "transport",
        };
        f.write_str(kind)
    }
}

/// Terminal outcome of one applied edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EditOutcome {
    /// The vendor accepted the new value.
    Success,
    /// The row failed; the batch carried on regardless.
    Failure {
        /// Failure class, for programmatic handling.
        kind: FailureKind,
        /// Human-readable detail from the vendor or transport layer.
        message: String,
    },
}

impl EditOutcome {
    /// Whether this row was applied.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// One row of a batch report: the edit's target plus its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    /// Product the edit targeted.
    pub product_id: ProductId,
    /// Field the edit targeted.
    pub field: ExtraFieldId,
    /// What happened.
    pub outcome: EditOutcome,
}

/// Ordered per-row outcomes for one submitted batch.
///
/// Results appear in submission order, one per [`FieldEdit`], including rows
/// that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Per-row results in submission order.
    pub results: Vec<ApplyResult>,
}

impl BatchReport {
    /// Number of rows in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the batch was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of rows the vendor accepted.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.is_success())
            .count()
    }

    /// Number of rows that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn sample_report() -> BatchReport {
        BatchReport {
            results: vec![
                ApplyResult {
                    product_id: ProductId::new(101),
                    field: ExtraFieldId::new(467),
                    outcome: EditOutcome::Success,
                },
                ApplyResult {
                    product_id: ProductId::new(102),
                    field: ExtraFieldId::new(484),
                    outcome: EditOutcome::Failure {
                        kind: FailureKind::Validation,
                        message: "value rejected".to_owned(),
                    },
                },
            ],
        }
    }

    #[test]
    fn test_report_counts() {
        let report = sample_report();
        assert_eq!(report.len(), 2);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let success = serde_json::to_value(EditOutcome::Success).expect("serialize");
        assert_eq!(success["status"], "success");

        let failure = serde_json::to_value(EditOutcome::Failure {
            kind: FailureKind::RateLimited,
            message: "slow down".to_owned(),
        })
        .expect("serialize");
        assert_eq!(failure["status"], "failure");
        assert_eq!(failure["kind"], "rate_limited");
        assert_eq!(failure["message"], "slow down");
    }

    #[test]
    fn test_field_edit_round_trips_through_json() {
        let edit = FieldEdit::new(ProductId::new(7), ExtraFieldId::new(484), "red");
        let json = serde_json::to_string(&edit).expect("serialize");
        let back: FieldEdit = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, edit);
    }

    #[test]
    fn test_empty_report() {
        let report = BatchReport::default();
        assert!(report.is_empty());
        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.failed(), 0);
    }

    #[test]
    fn test_failure_kind_display_matches_wire_names() {
        assert_eq!(FailureKind::Validation.to_string(), "validation");
        assert_eq!(FailureKind::RateLimited.to_string(), "rate_limited");
        assert_eq!(FailureKind::Transport.to_string(), "transport");
    }
}
