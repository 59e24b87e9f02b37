use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use codorder_core::{OrderRequest, OrderValidationError, ReceivedFields, VariantNotFound};
use codorder_shopify::{cod_order, ShopifyError};
use serde::Serialize;
use thiserror::Error;

use crate::middleware::RequestId;

use super::AppState;

const MISSING_FIELDS_MESSAGE: &str = "Missing required fields. Please ensure name, phone, address, city, state and pincode are provided.";
const NOT_CONFIGURED_MESSAGE: &str =
    "Order service is not configured to create orders. Please contact the store.";
const UNREACHABLE_MESSAGE: &str =
    "Could not reach the store to create your order. Please try again.";

/// Every way an order submission can fail, mapped onto the storefront's
/// `{ success: false, ... }` JSON shapes.
#[derive(Debug, Error)]
pub(super) enum OrderError {
    #[error("invalid request body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Validation(#[from] OrderValidationError),

    #[error(transparent)]
    VariantNotFound(#[from] VariantNotFound),

    #[error("Shopify store URL or access token is not configured")]
    NotConfigured,

    #[error(transparent)]
    Upstream(#[from] ShopifyError),
}

#[derive(Debug, Serialize)]
struct OrderFailure {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    received: Option<ReceivedFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pid: Option<String>,
    #[serde(rename = "sizeKey", skip_serializing_if = "Option::is_none")]
    size_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<serde_json::Value>,
}

impl OrderFailure {
    fn message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            received: None,
            pid: None,
            size_key: None,
            raw: None,
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            OrderError::MalformedBody(reason) => {
                tracing::warn!(%reason, "order body rejected");
                (
                    StatusCode::BAD_REQUEST,
                    OrderFailure {
                        received: Some(ReceivedFields::default()),
                        ..OrderFailure::message(format!("Invalid order request: {reason}"))
                    },
                )
            }
            OrderError::Validation(err) => {
                tracing::warn!(missing = ?err.missing, "order validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    OrderFailure {
                        received: Some(err.received),
                        ..OrderFailure::message(MISSING_FIELDS_MESSAGE)
                    },
                )
            }
            OrderError::VariantNotFound(err) => {
                tracing::warn!(
                    product_id = %err.product_id,
                    size = %err.size,
                    "variant not found in catalog"
                );
                let message = format!(
                    "Variant not found for product_id={} size={}. Check the variant catalog.",
                    err.product_id, err.size
                );
                (
                    StatusCode::BAD_REQUEST,
                    OrderFailure {
                        pid: Some(err.product_id),
                        size_key: Some(err.size),
                        ..OrderFailure::message(message)
                    },
                )
            }
            OrderError::NotConfigured => {
                tracing::error!("order refused: Shopify credentials are not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    OrderFailure::message(NOT_CONFIGURED_MESSAGE),
                )
            }
            OrderError::Upstream(ShopifyError::Rejected { message, raw, .. }) => (
                StatusCode::BAD_REQUEST,
                OrderFailure {
                    raw: Some(raw),
                    ..OrderFailure::message(message)
                },
            ),
            OrderError::Upstream(err) => {
                tracing::error!(error = %err, "shopify order creation failed");
                (
                    StatusCode::BAD_GATEWAY,
                    OrderFailure::message(UNREACHABLE_MESSAGE),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub(super) struct OrderCreated {
    success: bool,
    message: &'static str,
    order_id: i64,
    order_number: Option<i64>,
}

/// `POST /api/create-cod-order`
///
/// Validates the form, resolves the variant, and makes exactly one Shopify
/// call. Validation and catalog misses return before any network I/O.
pub(super) async fn create_cod_order(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<OrderCreated>, OrderError> {
    let Json(request) = payload.map_err(|e| OrderError::MalformedBody(e.body_text()))?;
    let order = request.validate()?;
    let variant_id = state.catalog.resolve(&order.product_id, &order.size)?;
    let client = state.shopify.as_deref().ok_or(OrderError::NotConfigured)?;

    tracing::info!(
        request_id = %req_id.0,
        product_id = %order.product_id,
        size = %order.size,
        variant_id,
        "creating COD order"
    );
    tracing::debug!(
        name = %order.name,
        phone = %order.phone,
        city = %order.city,
        pincode = %order.pincode,
        "COD order contact"
    );

    let new_order = cod_order(&order, variant_id, &state.order_country);
    let created = client.create_order(&new_order).await?;

    tracing::info!(
        request_id = %req_id.0,
        order_id = created.id,
        order_number = ?created.order_number,
        "COD order created"
    );

    Ok(Json(OrderCreated {
        success: true,
        message: "COD Order created successfully!",
        order_id: created.id,
        order_number: created.order_number,
    }))
}

#[cfg(test)]
#[path = "orders_test.rs"]
mod tests;
