//! HTTP client for the Shopify Admin REST `orders.json` endpoint.
//!
//! One POST per order, bounded by the configured timeout and never retried:
//! order creation is not idempotent.

use std::time::Duration;

use codorder_core::ShopifyConfig;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::error::ShopifyError;
use crate::types::{CreateOrderResponse, CreatedOrder, NewOrder, OrderEnvelope};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";
const MAX_CONNECT_TIMEOUT_SECS: u64 = 10;
const FALLBACK_REJECTION_MESSAGE: &str = "Failed to create order in Shopify";

pub struct ShopifyAdminClient {
    client: Client,
    access_token: String,
    orders_url: Url,
}

impl std::fmt::Debug for ShopifyAdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyAdminClient")
            .field("orders_url", &self.orders_url.as_str())
            .field("access_token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

/// Reduces a configured store URL to its origin, e.g.
/// `"my-store.myshopify.com/admin"` → `"https://my-store.myshopify.com"`.
///
/// A missing scheme is treated as `https`.
pub(crate) fn extract_store_origin(store_url: &str) -> Result<String, ShopifyError> {
    let trimmed = store_url.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&with_scheme).map_err(|e| ShopifyError::InvalidStoreUrl {
        store_url: store_url.to_owned(),
        reason: e.to_string(),
    })?;
    if url.host_str().unwrap_or_default().is_empty() {
        return Err(ShopifyError::InvalidStoreUrl {
            store_url: store_url.to_owned(),
            reason: "missing host".to_owned(),
        });
    }

    Ok(url.origin().ascii_serialization())
}

/// `{origin}/admin/api/{version}/orders.json`
pub(crate) fn build_orders_url(store_url: &str, api_version: &str) -> Result<Url, ShopifyError> {
    let origin = extract_store_origin(store_url)?;
    let raw = format!("{origin}/admin/api/{}/orders.json", api_version.trim());
    Url::parse(&raw).map_err(|e| ShopifyError::InvalidStoreUrl {
        store_url: store_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Flattens a Shopify error payload into one line of text.
///
/// Shopify uses `{"errors": "Not Found"}`, `{"errors": {"field": ["msg"]}}`,
/// and occasionally `{"error": "..."}`.
pub(crate) fn rejection_message(body: &Value) -> String {
    let source = body.get("errors").or_else(|| body.get("error"));
    let text = source.map(flatten_error_value).unwrap_or_default();
    if text.is_empty() {
        FALLBACK_REJECTION_MESSAGE.to_owned()
    } else {
        text
    }
}

fn flatten_error_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Array(items) => items
            .iter()
            .map(flatten_error_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(field, v)| (field, flatten_error_value(v)))
            .filter(|(_, msg)| !msg.is_empty())
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>()
            .join("; "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl ShopifyAdminClient {
    /// Creates a client for the store in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidStoreUrl`] if the store URL has no
    /// usable host, or [`ShopifyError::Http`] if the `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &ShopifyConfig, timeout_secs: u64) -> Result<Self, ShopifyError> {
        Self::with_store_url(
            &config.store_url,
            &config.access_token,
            &config.api_version,
            timeout_secs,
        )
    }

    /// Creates a client against an explicit store URL (for wiremock tests).
    ///
    /// # Errors
    ///
    /// Same as [`ShopifyAdminClient::new`].
    pub fn with_store_url(
        store_url: &str,
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(
                timeout_secs.min(MAX_CONNECT_TIMEOUT_SECS),
            ))
            .user_agent(concat!("codorder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            orders_url: build_orders_url(store_url, api_version)?,
        })
    }

    #[must_use]
    pub fn orders_url(&self) -> &Url {
        &self.orders_url
    }

    /// Creates `order` in Shopify.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::Rejected`] on a 400, 402, or 422 response with a JSON body.
    /// - [`ShopifyError::UnexpectedStatus`] on any other non-2xx response.
    /// - [`ShopifyError::Http`] on timeout or network failure.
    /// - [`ShopifyError::Deserialize`] if the body is not JSON.
    /// - [`ShopifyError::MissingOrder`] if a 2xx body has no `order`.
    pub async fn create_order(&self, order: &NewOrder) -> Result<CreatedOrder, ShopifyError> {
        let response = self
            .client
            .post(self.orders_url.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&OrderEnvelope { order })
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let parsed = serde_json::from_str::<Value>(&text);

        if !status.is_success() {
            return Err(self.map_failure(status, parsed.ok()));
        }

        let body = parsed.map_err(|e| ShopifyError::Deserialize {
            context: format!("POST {}", self.orders_url),
            source: e,
        })?;
        let envelope: CreateOrderResponse =
            serde_json::from_value(body.clone()).map_err(|e| ShopifyError::Deserialize {
                context: format!("POST {} order object", self.orders_url),
                source: e,
            })?;

        match envelope.order {
            Some(created) => {
                tracing::info!(
                    order_id = created.id,
                    order_number = ?created.order_number,
                    "shopify order created"
                );
                Ok(created)
            }
            None => Err(ShopifyError::MissingOrder { raw: body }),
        }
    }

    fn map_failure(&self, status: StatusCode, body: Option<Value>) -> ShopifyError {
        match body {
            Some(raw) if is_order_rejection_status(status) => {
                let message = rejection_message(&raw);
                tracing::warn!(status = status.as_u16(), %message, "shopify rejected order");
                ShopifyError::Rejected {
                    status: status.as_u16(),
                    message,
                    raw,
                }
            }
            body => {
                let detail = body.as_ref().map(rejection_message);
                tracing::warn!(
                    status = status.as_u16(),
                    detail = ?detail,
                    "shopify returned unexpected status"
                );
                ShopifyError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: self.orders_url.to_string(),
                }
            }
        }
    }
}

/// Statuses where Shopify judged the order itself. Credential, store, and
/// throttling failures (401, 403, 404, 429) say nothing about the buyer's input.
fn is_order_rejection_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 400 | 402 | 422)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
