//! COD order request shape and server-side validation.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Body of `POST /api/create-cod-order` as sent by the storefront form.
///
/// Every field is optional on the wire; missing values become `""` and are
/// caught by [`OrderRequest::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, rename = "houseNo", deserialize_with = "lenient_string")]
    pub house_no: String,
    /// Road / area / colony as typed by the customer.
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,
    /// Pre-combined address line; wins over `house_no` + `address` when set.
    #[serde(default, rename = "addressLine1", deserialize_with = "lenient_string")]
    pub address_line1: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pincode: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub size: String,
}

/// Accepts a JSON string, number, or boolean; `null` becomes `""`.
///
/// Query-string values copied into the body arrive as strings, while hand
/// written requests often send `product_id` as a number.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        None => String::new(),
        Some(Lenient::Text(s)) => s,
        Some(Lenient::Unsigned(n)) => n.to_string(),
        Some(Lenient::Signed(n)) => n.to_string(),
        Some(Lenient::Float(n)) => n.to_string(),
        Some(Lenient::Flag(b)) => b.to_string(),
    })
}

/// The normalized values the validator saw, echoed back on failure so the
/// caller can tell which field was rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReceivedFields {
    pub name: String,
    pub phone: String,
    #[serde(rename = "addressLine")]
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing or invalid required fields: {}", .missing.join(", "))]
pub struct OrderValidationError {
    /// Names of the fields that failed, in form order.
    pub missing: Vec<&'static str>,
    pub received: ReceivedFields,
}

/// An order request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Resolved single-line delivery address.
    pub address_line: String,
    pub city: String,
    pub state: String,
    /// Exactly six ASCII digits.
    pub pincode: String,
    /// Raw house number, kept for back-office attributes.
    pub house_no: String,
    /// Raw road / area text, kept for back-office attributes.
    pub area: String,
    pub product_id: String,
    pub size: String,
}

pub const PINCODE_LEN: usize = 6;

/// Strips everything but ASCII digits: `"500 059"` → `"500059"`.
#[must_use]
pub fn normalize_pincode(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

impl OrderRequest {
    /// Single-line address: `addressLine1` when given, otherwise
    /// `"{houseNo}, {address}"`, or `address` alone when there is no house
    /// number.
    #[must_use]
    pub fn address_line(&self) -> String {
        let explicit = self.address_line1.trim();
        if !explicit.is_empty() {
            return explicit.to_owned();
        }

        let house_no = self.house_no.trim();
        let address = self.address.trim();
        if house_no.is_empty() {
            address.to_owned()
        } else {
            format!("{house_no}, {address}")
                .trim_end_matches([',', ' '])
                .to_owned()
        }
    }

    /// Checks the fields needed to ship a COD order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderValidationError`] listing every missing field when
    /// name, phone, address line, city, or state is blank, or the pincode
    /// is not six digits once non-digits are stripped.
    pub fn validate(&self) -> Result<ValidatedOrder, OrderValidationError> {
        let received = ReceivedFields {
            name: self.name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            address_line: self.address_line(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            pincode: normalize_pincode(&self.pincode),
        };

        let mut missing = Vec::new();
        if received.name.is_empty() {
            missing.push("name");
        }
        if received.phone.is_empty() {
            missing.push("phone");
        }
        if received.address_line.is_empty() {
            missing.push("address");
        }
        if received.city.is_empty() {
            missing.push("city");
        }
        if received.state.is_empty() {
            missing.push("state");
        }
        if received.pincode.len() != PINCODE_LEN {
            missing.push("pincode");
        }

        if !missing.is_empty() {
            return Err(OrderValidationError { missing, received });
        }

        Ok(ValidatedOrder {
            name: received.name,
            phone: received.phone,
            email: self.email.trim().to_owned(),
            address_line: received.address_line,
            city: received.city,
            state: received.state,
            pincode: received.pincode,
            house_no: self.house_no.trim().to_owned(),
            area: self.address.trim().to_owned(),
            product_id: self.product_id.trim().to_owned(),
            size: self.size.trim().to_owned(),
        })
    }
}
