//! HTTP client for the BaseLinker connector API.
//!
//! Every connector call shares one wire shape: a form-encoded POST carrying
//! a `method` name and a JSON-encoded `parameters` object, authenticated
//! with an `X-BLToken` header. The vendor answers HTTP 200 even for its own
//! errors, so failures are detected from the `status` field of the envelope
//! as well as from the HTTP status.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, instrument};
use url::Url;

use fieldhand_core::{ExtraFieldId, InventoryId, ProductId};

use crate::config::Config;
use crate::error::Error;
use crate::types::{
    ExtraField, ExtraFieldsResponse, InventoriesResponse, Inventory, InventoryParams,
    ProductDataParams, ProductDataResponse, ProductDetail, ProductListResponse, ProductSummary,
    UpdateProductParams, UpdateProductResponse,
};

/// Auth header the connector expects on every request.
const TOKEN_HEADER: &str = "X-BLToken";

/// BaseLinker connector client.
///
/// Cheap to clone; all clones share one HTTP connection pool. Each operation
/// issues exactly one outbound request and caches nothing.
#[derive(Clone)]
pub struct BaselinkerClient {
    inner: Arc<BaselinkerClientInner>,
}

struct BaselinkerClientInner {
    client: reqwest::Client,
    token: SecretString,
    api_url: Url,
}

impl BaselinkerClient {
    /// Create a new connector client from loaded configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            inner: Arc::new(BaselinkerClientInner {
                client: reqwest::Client::new(),
                token: config.token.clone(),
                api_url: config.api_url.clone(),
            }),
        }
    }

    /// The endpoint this client posts to.
    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.inner.api_url
    }

    /// List the product catalogs the token can access.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the vendor rejects it.
    #[instrument(skip(self))]
    pub async fn inventories(&self) -> Result<Vec<Inventory>, Error> {
        let response: InventoriesResponse = self.call("getInventories", &Value::Object(Map::new())).await?;
        Ok(response.inventories)
    }

    /// List the supplementary-field definitions of one inventory.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the vendor rejects it.
    #[instrument(skip(self), fields(inventory_id = %inventory_id))]
    pub async fn extra_fields(&self, inventory_id: InventoryId) -> Result<Vec<ExtraField>, Error> {
        let params = InventoryParams { inventory_id };
        let response: ExtraFieldsResponse = self.call("getInventoryExtraFields", &params).await?;
        Ok(response.extra_fields)
    }

    /// List the products of one inventory, sorted by product id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the vendor rejects it.
    #[instrument(skip(self), fields(inventory_id = %inventory_id))]
    pub async fn product_list(
        &self,
        inventory_id: InventoryId,
    ) -> Result<Vec<ProductSummary>, Error> {
        let params = InventoryParams { inventory_id };
        let response: ProductListResponse = self.call("getInventoryProductsList", &params).await?;
        Ok(response.into_products())
    }

    /// Fetch detail records (text fields, prices) for specific products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the vendor rejects it.
    #[instrument(skip(self, products), fields(inventory_id = %inventory_id, products = products.len()))]
    pub async fn product_data(
        &self,
        inventory_id: InventoryId,
        products: &[ProductId],
    ) -> Result<HashMap<ProductId, ProductDetail>, Error> {
        let params = ProductDataParams {
            inventory_id,
            products: products.to_vec(),
        };
        let response: ProductDataResponse = self.call("getInventoryProductsData", &params).await?;
        Ok(response.into_details())
    }

    /// Overwrite one supplementary field on one product.
    ///
    /// Issues a single `addInventoryProduct` request carrying only the
    /// edited text field; the vendor merges it into the existing record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the vendor rejects the
    /// field, the value, or the token.
    #[instrument(
        skip(self, value),
        fields(inventory_id = %inventory_id, product_id = %product_id, field = %field)
    )]
    pub async fn update_extra_field(
        &self,
        inventory_id: InventoryId,
        product_id: ProductId,
        field: ExtraFieldId,
        value: &str,
    ) -> Result<(), Error> {
        let mut text_fields = Map::new();
        text_fields.insert(field.text_field_key(), Value::String(value.to_owned()));

        let params = UpdateProductParams {
            inventory_id,
            product_id,
            text_fields,
        };
        let _: UpdateProductResponse = self.call("addInventoryProduct", &params).await?;

        debug!("Supplementary field updated");
        Ok(())
    }

    /// Execute one connector call.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        parameters: &impl Serialize,
    ) -> Result<T, Error> {
        let parameters = serde_json::to_string(parameters)?;
        debug!(method, "Calling BaseLinker connector");

        let response = self
            .inner
            .client
            .post(self.inner.api_url.clone())
            .header(TOKEN_HEADER, self.inner.token.expose_secret())
            .form(&[("method", method), ("parameters", parameters.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error(status, response).await);
        }

        let body: Value = response.json().await?;
        decode_response(body)
    }
}

impl std::fmt::Debug for BaselinkerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaselinkerClient")
            .field("api_url", &self.inner.api_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Map a non-success HTTP status onto the error taxonomy.
async fn http_error(status: StatusCode, response: reqwest::Response) -> Error {
    let status = status.as_u16();

    // Check for rate limiting
    if status == 429 {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return Error::RateLimited(retry_after);
    }

    // Check for unauthorized
    if status == 401 || status == 403 {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "invalid API token".to_string());
        return Error::Auth(message);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Error::Api { status, message }
}

/// Decode a connector envelope into the expected payload.
///
/// The vendor reports `status: "SUCCESS"` next to the payload fields, or
/// `status: "ERROR"` with `error_code`/`error_message` on failure.
fn decode_response<T: DeserializeOwned>(body: Value) -> Result<T, Error> {
    match body.get("status").and_then(Value::as_str) {
        Some("SUCCESS") => Ok(serde_json::from_value(body)?),
        _ => Err(vendor_error(&body)),
    }
}

/// Map a vendor error envelope onto the error taxonomy.
fn vendor_error(body: &Value) -> Error {
    let code = match body.get("error_code") {
        Some(Value::String(code)) => code.clone(),
        Some(Value::Number(code)) => code.to_string(),
        _ => "UNKNOWN".to_string(),
    };
    let message = body
        .get("error_message")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error")
        .to_string();

    match code.as_str() {
        "ERROR_AUTH_TOKEN" => Error::Auth(message),
        "ERROR_REQUESTS_LIMIT" => Error::RateLimited(60),
        _ => Error::Validation { code, message },
    }
}
