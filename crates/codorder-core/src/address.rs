//! Best-effort conversion of reverse-geocoded address components into the
//! delivery-form fields a COD checkout expects.
//!
//! The heuristics are tuned for Indian addresses: building identifiers are
//! joined with `/`, neighbourhood-level localities ("...nagar", "...colony",
//! "...pet") are pushed into the area line, and the district is preferred as
//! the city in that case.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Geocoder component types the normalizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentType {
    StreetNumber,
    Route,
    Premise,
    Subpremise,
    Sublocality,
    SublocalityLevel1,
    SublocalityLevel2,
    Neighborhood,
    PostalTown,
    Locality,
    AdministrativeAreaLevel1,
    AdministrativeAreaLevel2,
    PostalCode,
}

impl ComponentType {
    pub const ALL: [ComponentType; 13] = [
        ComponentType::StreetNumber,
        ComponentType::Route,
        ComponentType::Premise,
        ComponentType::Subpremise,
        ComponentType::Sublocality,
        ComponentType::SublocalityLevel1,
        ComponentType::SublocalityLevel2,
        ComponentType::Neighborhood,
        ComponentType::PostalTown,
        ComponentType::Locality,
        ComponentType::AdministrativeAreaLevel1,
        ComponentType::AdministrativeAreaLevel2,
        ComponentType::PostalCode,
    ];

    /// The geocoder's wire name for this type, e.g. `"administrative_area_level_2"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::StreetNumber => "street_number",
            ComponentType::Route => "route",
            ComponentType::Premise => "premise",
            ComponentType::Subpremise => "subpremise",
            ComponentType::Sublocality => "sublocality",
            ComponentType::SublocalityLevel1 => "sublocality_level_1",
            ComponentType::SublocalityLevel2 => "sublocality_level_2",
            ComponentType::Neighborhood => "neighborhood",
            ComponentType::PostalTown => "postal_town",
            ComponentType::Locality => "locality",
            ComponentType::AdministrativeAreaLevel1 => "administrative_area_level_1",
            ComponentType::AdministrativeAreaLevel2 => "administrative_area_level_2",
            ComponentType::PostalCode => "postal_code",
        }
    }

    /// Parses a geocoder type string. Unknown types (`"country"`,
    /// `"political"`, ...) return `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == key)
    }
}

/// One value per component type, taken from a single geocoding result.
///
/// Deserializes from a flat JSON object such as
/// `{"street_number": "83", "locality": "Champapet"}`; unknown keys, nulls,
/// and blank values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<String>>")]
pub struct AddressComponents {
    values: BTreeMap<ComponentType, String>,
}

impl AddressComponents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `kind`, replacing any previous value. Blank values are ignored.
    pub fn insert(&mut self, kind: ComponentType, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            self.values.insert(kind, trimmed.to_owned());
        }
    }

    /// Sets `kind` only if no value has been recorded for it yet.
    ///
    /// Geocoders list components from most to least specific, so the first
    /// component carrying a type is the one to keep.
    pub fn insert_if_absent(&mut self, kind: ComponentType, value: &str) {
        if !self.values.contains_key(&kind) {
            self.insert(kind, value);
        }
    }

    #[must_use]
    pub fn with(mut self, kind: ComponentType, value: impl Into<String>) -> Self {
        self.insert(kind, value);
        self
    }

    /// Value for `kind`, or `""` when absent.
    #[must_use]
    pub fn get(&self, kind: ComponentType) -> &str {
        self.values.get(&kind).map_or("", String::as_str)
    }

    #[must_use]
    pub fn contains(&self, kind: ComponentType) -> bool {
        self.values.contains_key(&kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, Option<String>>> for AddressComponents {
    fn from(raw: BTreeMap<String, Option<String>>) -> Self {
        let mut components = Self::new();
        for (key, value) in raw {
            if let (Some(kind), Some(value)) = (ComponentType::from_key(&key), value) {
                components.insert(kind, value);
            }
        }
        components
    }
}

/// Display-ready address derived from [`AddressComponents`].
///
/// Every field is a plain string; `""` means unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAddress {
    /// Building / flat identifier, e.g. `"Sai Residency/4B/83"`.
    pub house_no: String,
    pub street: String,
    /// Road / area / colony line (display line 1).
    pub area_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl NormalizedAddress {
    /// Informational second display line: `"City, State - 500059"`.
    #[must_use]
    pub fn line2(&self) -> String {
        let head = [self.city.as_str(), self.state.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        if self.pincode.is_empty() {
            head
        } else {
            format!("{head} - {}", self.pincode)
        }
    }
}

/// Last-word suffixes that mark a locality as a colony, neighbourhood, or
/// village rather than a town.
static GRANULAR_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(nagar|colony|pet|peta|palli|pally|palle|gudem|guda|wadi|wada|vihar|enclave|layout|village|gaon|gram|basti|tanda|mohalla)$",
    )
    .expect("valid granular locality regex")
});

const GRANULAR_MAX_CHARS: usize = 24;
const GRANULAR_MAX_WORDS: usize = 2;

/// Whether `locality` names something smaller than a city.
fn is_granular_locality(locality: &str) -> bool {
    let words: Vec<&str> = locality.split_whitespace().collect();
    let Some(last) = words.last() else {
        return false;
    };
    locality.chars().count() <= GRANULAR_MAX_CHARS
        && words.len() <= GRANULAR_MAX_WORDS
        && GRANULAR_SUFFIX.is_match(last)
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.is_empty())
        .unwrap_or("")
}

fn choose_city<'a>(locality: &'a str, district: &'a str, postal_town: &'a str) -> &'a str {
    if is_granular_locality(locality) {
        let wider = first_non_empty(&[district, postal_town]);
        if !wider.is_empty() {
            return wider;
        }
    }
    first_non_empty(&[locality, district, postal_town])
}

fn build_house_no(premise: &str, subpremise: &str, street_number: &str) -> String {
    let joined = [premise, subpremise, street_number]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        first_non_empty(&[premise, subpremise, street_number]).to_owned()
    } else {
        joined
    }
}

/// Appends `part` unless it is blank or already present (case-insensitive).
fn push_unique<'a>(parts: &mut Vec<&'a str>, part: &'a str) {
    if part.is_empty() || parts.iter().any(|p| p.eq_ignore_ascii_case(part)) {
        return;
    }
    parts.push(part);
}

/// Normalizes geocoded components into form fields.
///
/// `place_name` is the geocoder's optional name for the chosen result; it only
/// fills `house_no` when no premise, subpremise, or street number exists and it
/// does not merely repeat an area, city, or state component.
///
/// Pure and infallible: missing components produce empty fields.
#[must_use]
pub fn normalize_address(
    components: &AddressComponents,
    place_name: Option<&str>,
) -> NormalizedAddress {
    use ComponentType as C;

    let premise = components.get(C::Premise);
    let subpremise = components.get(C::Subpremise);
    let street_number = components.get(C::StreetNumber);
    let route = components.get(C::Route);
    let sublocality1 = first_non_empty(&[
        components.get(C::SublocalityLevel1),
        components.get(C::Sublocality),
    ]);
    let sublocality2 = components.get(C::SublocalityLevel2);
    let neighborhood = components.get(C::Neighborhood);
    let locality = components.get(C::Locality);
    let postal_town = components.get(C::PostalTown);
    let district = components.get(C::AdministrativeAreaLevel2);
    let state = components.get(C::AdministrativeAreaLevel1);
    let pincode = components.get(C::PostalCode);

    let city = choose_city(locality, district, postal_town);

    let mut parts: Vec<&str> = Vec::new();
    push_unique(&mut parts, route);
    push_unique(&mut parts, sublocality1);
    push_unique(&mut parts, sublocality2);
    push_unique(&mut parts, neighborhood);
    if locality != city {
        push_unique(&mut parts, locality);
    }
    if district != city {
        push_unique(&mut parts, district);
    }

    let area_line = if parts.is_empty() {
        first_non_empty(&[premise, locality, district]).to_owned()
    } else {
        parts.join(", ")
    };

    let mut house_no = build_house_no(premise, subpremise, street_number);
    if house_no.is_empty() {
        if let Some(name) = place_name.map(str::trim).filter(|n| !n.is_empty()) {
            let repeats_known = [
                route,
                sublocality1,
                sublocality2,
                neighborhood,
                locality,
                district,
                postal_town,
                state,
                pincode,
            ]
            .iter()
            .any(|known| known.eq_ignore_ascii_case(name));
            if !repeats_known {
                house_no = name.to_owned();
            }
        }
    }

    let street = if route.is_empty() {
        area_line.clone()
    } else {
        route.to_owned()
    };

    NormalizedAddress {
        house_no,
        street,
        area_line,
        city: city.to_owned(),
        state: state.to_owned(),
        pincode: pincode.to_owned(),
    }
}

#[cfg(test)]
#[path = "address_test.rs"]
mod tests;
