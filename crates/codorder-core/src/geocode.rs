//! Reverse-geocoding response shapes (Google Geocoding API compatible) and
//! the rule for picking which candidate feeds the address normalizer.

use serde::Deserialize;

use crate::address::{AddressComponents, ComponentType};

/// Top-level reverse-geocoding response. `status` is `"OK"` when any
/// result was found, otherwise e.g. `"ZERO_RESULTS"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One candidate address for the queried coordinates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub address_components: Vec<GeocodeComponent>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    /// Place name, present on place-based providers.
    #[serde(default)]
    pub name: Option<String>,
}

/// A single component; one component may carry several types
/// (e.g. `["sublocality_level_1", "sublocality", "political"]`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeComponent {
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl GeocodeResponse {
    /// `false` only when the provider reported a non-`OK` status.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        !matches!(self.status.as_deref(), Some(status) if status != "OK")
    }
}

impl GeocodeResult {
    /// Collapses the component list into one value per known type, keeping
    /// the first component that carries each type.
    #[must_use]
    pub fn components(&self) -> AddressComponents {
        let mut components = AddressComponents::new();
        for component in &self.address_components {
            for kind in component.types.iter().filter_map(|t| ComponentType::from_key(t)) {
                components.insert_if_absent(kind, &component.long_name);
            }
        }
        components
    }

    #[must_use]
    pub fn has_postal_code(&self) -> bool {
        self.address_components
            .iter()
            .any(|c| c.types.iter().any(|t| t == ComponentType::PostalCode.as_str()))
    }
}

/// Picks the candidate to normalize: the first result, unless it has no
/// postal code and a later one does.
#[must_use]
pub fn select_result(results: &[GeocodeResult]) -> Option<&GeocodeResult> {
    let first = results.first()?;
    if first.has_postal_code() {
        return Some(first);
    }
    Some(
        results
            .iter()
            .find(|r| r.has_postal_code())
            .unwrap_or(first),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_from(value: serde_json::Value) -> GeocodeResult {
        serde_json::from_value(value).expect("valid geocode result")
    }

    #[test]
    fn components_keep_first_component_per_type() {
        let result = result_from(json!({
            "address_components": [
                { "long_name": "Saroornagar", "types": ["sublocality_level_1", "sublocality", "political"] },
                { "long_name": "Other Area", "types": ["sublocality"] },
                { "long_name": "India", "short_name": "IN", "types": ["country", "political"] }
            ]
        }));

        let components = result.components();
        assert_eq!(components.get(ComponentType::SublocalityLevel1), "Saroornagar");
        assert_eq!(components.get(ComponentType::Sublocality), "Saroornagar");
        assert!(!components.contains(ComponentType::Locality));
    }

    #[test]
    fn select_result_prefers_result_with_postal_code() {
        let results = vec![
            result_from(json!({
                "address_components": [{ "long_name": "Hyderabad", "types": ["locality"] }]
            })),
            result_from(json!({
                "address_components": [{ "long_name": "500059", "types": ["postal_code"] }]
            })),
        ];

        let chosen = select_result(&results).expect("a result");
        assert!(chosen.has_postal_code());
    }

    #[test]
    fn select_result_falls_back_to_first() {
        let results = vec![
            result_from(json!({ "formatted_address": "first", "address_components": [] })),
            result_from(json!({ "formatted_address": "second", "address_components": [] })),
        ];

        let chosen = select_result(&results).expect("a result");
        assert_eq!(chosen.formatted_address.as_deref(), Some("first"));
    }

    #[test]
    fn select_result_empty_is_none() {
        assert!(select_result(&[]).is_none());
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let response: GeocodeResponse =
            serde_json::from_value(json!({ "status": "ZERO_RESULTS" })).expect("parse");
        assert!(response.results.is_empty());
        assert!(!response.is_ok());
    }

    #[test]
    fn response_without_status_counts_as_ok() {
        let response: GeocodeResponse =
            serde_json::from_value(json!({ "results": [] })).expect("parse");
        assert!(response.is_ok());
    }
}
