use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use codorder_core::{AddressComponents, GeocodeResult, NormalizedAddress};
use serde::{Deserialize, Serialize};

use super::failure;

/// Body of `POST /api/normalize-address`.
///
/// `components` wins over `results` when both are sent.
#[derive(Debug, Default, Deserialize)]
pub(super) struct NormalizeRequest {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    components: Option<AddressComponents>,
    #[serde(default)]
    place_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct NormalizeResponse {
    success: bool,
    address: NormalizedAddress,
    line2: String,
}

impl NormalizeRequest {
    fn resolve(self) -> (AddressComponents, Option<String>) {
        if let Some(components) = self.components {
            return (components, self.place_name);
        }
        match codorder_core::select_result(&self.results) {
            Some(result) => (
                result.components(),
                self.place_name.or_else(|| result.name.clone()),
            ),
            None => (AddressComponents::new(), self.place_name),
        }
    }
}

/// `POST /api/normalize-address`
pub(super) async fn normalize_address(
    payload: Result<Json<NormalizeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return failure(
                StatusCode::BAD_REQUEST,
                format!("Invalid address request: {}", rejection.body_text()),
            )
            .into_response();
        }
    };

    let (components, place_name) = request.resolve();
    let address = codorder_core::normalize_address(&components, place_name.as_deref());
    tracing::debug!(
        city = %address.city,
        pincode = %address.pincode,
        "address normalized"
    );

    let line2 = address.line2();
    Json(NormalizeResponse {
        success: true,
        address,
        line2,
    })
    .into_response()
}
