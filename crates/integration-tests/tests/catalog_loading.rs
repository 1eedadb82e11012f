//! Integration tests for catalog loading.
//!
//! `load_catalog` joins three connector calls into the editable table view;
//! these tests script all three and check the join.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use serde_json::json;

use fieldhand_baselinker::{BaselinkerClient, load_catalog};
use fieldhand_core::{ExtraFieldId, InventoryId, ProductId};
use fieldhand_integration_tests::FakeConnector;

const INVENTORY: InventoryId = InventoryId::new(3001);

#[tokio::test]
async fn test_catalog_joins_list_details_and_fields() {
    let connector = FakeConnector::start().await;
    connector.push_success(json!({
        "extra_fields": [
            { "extra_field_id": 467, "name": "warranty_months" },
            { "extra_field_id": 484, "name": "color" },
        ]
    }));
    connector.push_success(json!({
        "products": {
            "102": { "sku": "SKU-102", "name": "Widget B", "prices": { "1": 19.5 } },
            "101": { "sku": "SKU-101", "ean": "4006381333931", "name": "Widget A", "prices": { "1": 59.0 } },
        }
    }));
    connector.push_success(json!({
        "products": {
            "101": {
                "text_fields": {
                    "name": "Widget A",
                    "extra_field_467": "24",
                    "extra_field_484": "blue",
                }
            },
            "102": {
                "text_fields": {
                    "name": "Widget B",
                    "extra_field_484": "red",
                }
            },
        }
    }));

    let client = BaselinkerClient::new(&connector.config());
    let catalog = load_catalog(&client, INVENTORY).await.expect("catalog loads");

    assert_eq!(catalog.fields.len(), 2);
    assert_eq!(catalog.products.len(), 2);

    // Rows come back sorted by product id.
    let first = &catalog.products[0];
    assert_eq!(first.id, ProductId::new(101));
    assert_eq!(first.sku, "SKU-101");
    assert_eq!(first.name, "Widget A");
    assert_eq!(first.price, Some(Decimal::from_str_exact("59.0").unwrap()));

    // Values align with the field list: warranty first, then color.
    assert_eq!(first.values[0].field, ExtraFieldId::new(467));
    assert_eq!(first.values[0].value, "24");
    assert_eq!(first.values[1].value, "blue");

    // Missing supplementary values render as empty cells, not holes.
    let second = &catalog.products[1];
    assert_eq!(second.values[0].value, "");
    assert_eq!(second.values[1].value, "red");

    // Read path: fields, listing, then one detail call for all ids.
    let calls = connector.calls();
    let methods: Vec<&str> = calls.iter().map(|c| c.method.as_str()).collect();
    assert_eq!(
        methods,
        vec![
            "getInventoryExtraFields",
            "getInventoryProductsList",
            "getInventoryProductsData"
        ]
    );
    assert_eq!(calls[2].parameters["products"], json!([101, 102]));
}

#[tokio::test]
async fn test_empty_inventory_skips_the_detail_call() {
    let connector = FakeConnector::start().await;
    connector.push_success(json!({ "extra_fields": [] }));
    connector.push_success(json!({ "products": {} }));

    let client = BaselinkerClient::new(&connector.config());
    let catalog = load_catalog(&client, INVENTORY).await.expect("catalog loads");

    assert!(catalog.products.is_empty());
    assert_eq!(
        connector.calls().len(),
        2,
        "no detail call for an empty listing"
    );
}

#[tokio::test]
async fn test_detail_record_fills_listing_gaps() {
    let connector = FakeConnector::start().await;
    connector.push_success(json!({ "extra_fields": [] }));
    // Older accounts return bare listing entries.
    connector.push_success(json!({ "products": { "101": {} } }));
    connector.push_success(json!({
        "products": {
            "101": {
                "sku": "SKU-101",
                "ean": "4006381333931",
                "prices": { "2": 12.0, "1": 59.0 },
                "text_fields": { "name": "Widget A" },
            }
        }
    }));

    let client = BaselinkerClient::new(&connector.config());
    let catalog = load_catalog(&client, INVENTORY).await.expect("catalog loads");

    let row = catalog.products.first().expect("one row");
    assert_eq!(row.sku, "SKU-101");
    assert_eq!(row.ean, "4006381333931");
    assert_eq!(row.name, "Widget A");
    // The lowest-numbered price group wins.
    assert_eq!(row.price, Some(Decimal::from_str_exact("59.0").unwrap()));
}
