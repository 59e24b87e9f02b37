mod address;
mod orders;

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use codorder_core::VariantCatalog;
use codorder_shopify::ShopifyAdminClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<VariantCatalog>,
    /// `None` when Shopify credentials are not configured.
    pub shopify: Option<Arc<ShopifyAdminClient>>,
    pub order_country: Arc<str>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

/// `{ "success": false, "message": ... }`, the storefront's error shape.
#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    catalog_products: usize,
    upstream_configured: bool,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

pub fn failure(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<FailureBody>) {
    (
        status,
        Json(FailureBody {
            success: false,
            message: message.into(),
        }),
    )
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn handle_panic(_: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("handler panicked");
    failure(StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/normalize-address", post(address::normalize_address))
        .route("/api/create-cod-order", post(orders::create_cod_order))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            catalog_products: state.catalog.len(),
            upstream_configured: state.shopify.is_some(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
