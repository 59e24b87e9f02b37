//! `normalize` command: runs the address normalizer over a saved geocoder
//! response so precedence rules can be checked against real provider output.

use std::path::Path;

use anyhow::Context;
use codorder_core::{
    normalize_address, select_result, AddressComponents, GeocodeResponse, GeocodeResult,
    NormalizedAddress,
};
use serde::Serialize;
use serde_json::Value;

/// What the normalizer needs out of a saved input file.
#[derive(Debug, Default)]
pub(crate) struct SavedInput {
    pub(crate) components: AddressComponents,
    pub(crate) place_name: Option<String>,
    /// The provider's own rendering of the chosen result, printed alongside
    /// ours for comparison.
    pub(crate) formatted_address: Option<String>,
}

#[derive(Debug, Serialize)]
struct NormalizeOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    provider_formatted: Option<String>,
    address: NormalizedAddress,
    line2: String,
}

impl SavedInput {
    fn from_results(results: &[GeocodeResult]) -> Self {
        select_result(results).map_or_else(Self::default, |result| Self {
            components: result.components(),
            place_name: result.name.clone(),
            formatted_address: result.formatted_address.clone(),
        })
    }
}

/// Accepts a full geocoder response (`{status, results}`), a bare result
/// list, or a flat component map.
pub(crate) fn components_from_json(raw: &str) -> anyhow::Result<SavedInput> {
    let value: Value = serde_json::from_str(raw).context("input is not valid JSON")?;

    match value {
        Value::Object(map) if map.contains_key("results") => {
            let response: GeocodeResponse = serde_json::from_value(Value::Object(map))
                .context("expected a geocoder response with a results list")?;
            if !response.is_ok() {
                tracing::warn!(
                    status = response.status.as_deref().unwrap_or_default(),
                    "geocoder reported a non-OK status"
                );
            }
            Ok(SavedInput::from_results(&response.results))
        }
        Value::Array(items) => {
            let results: Vec<GeocodeResult> = serde_json::from_value(Value::Array(items))
                .context("expected a list of geocoder results")?;
            Ok(SavedInput::from_results(&results))
        }
        Value::Object(map) => {
            let components: AddressComponents = serde_json::from_value(Value::Object(map))
                .context("flat component map must contain only string values")?;
            Ok(SavedInput {
                components,
                ..SavedInput::default()
            })
        }
        other => anyhow::bail!("unsupported input: expected an object or array, got {other}"),
    }
}

pub(crate) fn run_normalize(file: &Path, place_name: Option<&str>) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let input = components_from_json(&raw)?;
    if input.components.is_empty() {
        tracing::warn!(file = %file.display(), "no known address components in input");
    }

    let place_name = place_name.or(input.place_name.as_deref());
    let address = normalize_address(&input.components, place_name);
    let line2 = address.line2();
    println!(
        "{}",
        serde_json::to_string_pretty(&NormalizeOutput {
            provider_formatted: input.formatted_address,
            address,
            line2,
        })?
    );
    Ok(())
}
