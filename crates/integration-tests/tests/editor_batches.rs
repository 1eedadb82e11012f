//! Integration tests for batch edit application.
//!
//! These drive `apply_batch` end to end over the fake connector and pin the
//! batch policy: submission order, per-row failure isolation, duplicate
//! handling, and the one condition that aborts a run.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use serde_json::{Value, json};

use fieldhand_baselinker::{BaselinkerClient, Error, apply_batch};
use fieldhand_core::{EditOutcome, ExtraFieldId, FailureKind, FieldEdit, InventoryId, ProductId};
use fieldhand_integration_tests::FakeConnector;

const INVENTORY: InventoryId = InventoryId::new(3001);

/// Field definitions every batch test starts from.
fn fields_payload() -> Value {
    json!({
        "extra_fields": [
            { "extra_field_id": 467, "name": "warranty_months" },
            { "extra_field_id": 484, "name": "color" },
        ]
    })
}

fn edit(product: i64, field: i64, value: &str) -> FieldEdit {
    FieldEdit::new(ProductId::new(product), ExtraFieldId::new(field), value)
}

// =============================================================================
// Ordering Tests
// =============================================================================

#[tokio::test]
async fn test_one_result_per_edit_in_submission_order() {
    let connector = FakeConnector::start().await;
    connector.push_success(fields_payload());
    connector.push_success(json!({ "product_id": 101 }));
    connector.push_success(json!({ "product_id": 102 }));

    let client = BaselinkerClient::new(&connector.config());
    let report = apply_batch(
        &client,
        INVENTORY,
        vec![edit(101, 467, "24"), edit(102, 484, "red")],
    )
    .await
    .expect("batch completes");

    assert_eq!(report.len(), 2);
    assert_eq!(report.results[0].product_id, ProductId::new(101));
    assert_eq!(report.results[1].product_id, ProductId::new(102));
    assert!(report.results.iter().all(|r| r.outcome.is_success()));

    // One field lookup, then the updates in submission order.
    let calls = connector.calls();
    let methods: Vec<&str> = calls.iter().map(|c| c.method.as_str()).collect();
    assert_eq!(
        methods,
        vec![
            "getInventoryExtraFields",
            "addInventoryProduct",
            "addInventoryProduct"
        ]
    );
    assert_eq!(calls[1].parameters["product_id"], 101);
    assert_eq!(calls[2].parameters["product_id"], 102);
}

#[tokio::test]
async fn test_duplicate_edits_all_sent_so_last_wins() {
    let connector = FakeConnector::start().await;
    connector.push_success(fields_payload());
    connector.push_success(json!({ "product_id": 101 }));
    connector.push_success(json!({ "product_id": 101 }));

    let client = BaselinkerClient::new(&connector.config());
    let report = apply_batch(
        &client,
        INVENTORY,
        vec![edit(101, 467, "10"), edit(101, 467, "20")],
    )
    .await
    .expect("batch completes");

    assert_eq!(report.len(), 2);
    assert_eq!(report.succeeded(), 2);

    // Both writes reach the vendor; the second value is the last one sent.
    let calls = connector.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].parameters["text_fields"]["extra_field_467"], "10");
    assert_eq!(calls[2].parameters["text_fields"]["extra_field_467"], "20");
}

#[tokio::test]
async fn test_empty_batch_returns_empty_report() {
    let connector = FakeConnector::start().await;
    connector.push_success(fields_payload());

    let client = BaselinkerClient::new(&connector.config());
    let report = apply_batch(&client, INVENTORY, Vec::new())
        .await
        .expect("empty batch completes");

    assert!(report.is_empty());
    assert_eq!(connector.calls().len(), 1, "only the field lookup runs");
}

// =============================================================================
// Per-Row Failure Tests
// =============================================================================

#[tokio::test]
async fn test_failing_row_does_not_abort_the_batch() {
    let connector = FakeConnector::start().await;
    connector.push_success(fields_payload());
    connector.push_success(json!({ "product_id": 101 }));
    connector.push_vendor_error("ERROR_EMPTY_TEXT_FIELDS", "Value rejected");

    let client = BaselinkerClient::new(&connector.config());
    let report = apply_batch(
        &client,
        INVENTORY,
        vec![edit(101, 467, "24"), edit(102, 484, "red")],
    )
    .await
    .expect("batch completes despite the failed row");

    assert_eq!(report.len(), 2);
    assert!(report.results[0].outcome.is_success());
    match &report.results[1].outcome {
        EditOutcome::Failure { kind, message } => {
            assert_eq!(*kind, FailureKind::Validation);
            assert!(message.contains("Value rejected"));
        }
        EditOutcome::Success => panic!("second row should have failed"),
    }
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
}

#[tokio::test]
async fn test_rate_limited_row_continues() {
    let connector = FakeConnector::start().await;
    connector.push_success(fields_payload());
    connector.push_vendor_error("ERROR_REQUESTS_LIMIT", "Too many requests");
    connector.push_success(json!({ "product_id": 102 }));

    let client = BaselinkerClient::new(&connector.config());
    let report = apply_batch(
        &client,
        INVENTORY,
        vec![edit(101, 467, "24"), edit(102, 484, "red")],
    )
    .await
    .expect("batch completes");

    match &report.results[0].outcome {
        EditOutcome::Failure { kind, .. } => assert_eq!(*kind, FailureKind::RateLimited),
        EditOutcome::Success => panic!("first row should have been throttled"),
    }
    assert!(report.results[1].outcome.is_success());
    assert_eq!(connector.calls().len(), 3, "no retry for the throttled row");
}

#[tokio::test]
async fn test_transport_failure_becomes_transport_row() {
    let connector = FakeConnector::start().await;
    connector.push_success(fields_payload());
    connector.push_http(500, None, "upstream exploded");

    let client = BaselinkerClient::new(&connector.config());
    let report = apply_batch(&client, INVENTORY, vec![edit(101, 467, "24")])
        .await
        .expect("batch completes");

    match &report.results[0].outcome {
        EditOutcome::Failure { kind, .. } => assert_eq!(*kind, FailureKind::Transport),
        EditOutcome::Success => panic!("row should have failed"),
    }
}

#[tokio::test]
async fn test_unknown_field_fails_locally_without_a_request() {
    let connector = FakeConnector::start().await;
    connector.push_success(fields_payload());

    let client = BaselinkerClient::new(&connector.config());
    let report = apply_batch(&client, INVENTORY, vec![edit(101, 999, "24")])
        .await
        .expect("batch completes");

    assert_eq!(report.len(), 1);
    match &report.results[0].outcome {
        EditOutcome::Failure { kind, message } => {
            assert_eq!(*kind, FailureKind::Validation);
            assert!(message.contains("999"));
        }
        EditOutcome::Success => panic!("unknown field should fail"),
    }

    // Only the field lookup went out; no update was attempted.
    let calls = connector.calls();
    let methods: Vec<&str> = calls.iter().map(|c| c.method.as_str()).collect();
    assert_eq!(methods, vec!["getInventoryExtraFields"]);
}

// =============================================================================
// Fatal Error Tests
// =============================================================================

#[tokio::test]
async fn test_rejected_token_aborts_and_sends_nothing_further() {
    let connector = FakeConnector::start().await;
    connector.push_success(fields_payload());
    connector.push_success(json!({ "product_id": 101 }));
    connector.push_vendor_error("ERROR_AUTH_TOKEN", "Invalid token");

    let client = BaselinkerClient::new(&connector.config());
    let err = apply_batch(
        &client,
        INVENTORY,
        vec![
            edit(101, 467, "24"),
            edit(102, 484, "red"),
            edit(103, 467, "36"),
        ],
    )
    .await
    .expect_err("rejected token is fatal");

    assert!(matches!(err, Error::Auth(_)));

    // The third edit never reached the wire.
    let calls = connector.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2].parameters["product_id"], 102);
}

#[tokio::test]
async fn test_failed_field_lookup_is_fatal() {
    let connector = FakeConnector::start().await;
    connector.push_http(500, None, "upstream exploded");

    let client = BaselinkerClient::new(&connector.config());
    let err = apply_batch(&client, INVENTORY, vec![edit(101, 467, "24")])
        .await
        .expect_err("no field list, no batch");

    assert!(matches!(err, Error::Api { status: 500, .. }));
    assert_eq!(connector.calls().len(), 1, "no update may follow");
}
