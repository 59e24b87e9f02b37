//! Request and response shapes for the Shopify Admin REST `orders.json`
//! endpoint.
//!
//! Only the fields a COD order needs are modelled. Shopify accepts `tags` as
//! a comma-separated string and answers `201 Created` with the full order
//! object, of which `id`, `order_number`, and `name` are read back.

use serde::{Deserialize, Serialize};

/// Wire wrapper: Shopify expects `{"order": {...}}`.
#[derive(Debug, Serialize)]
pub struct OrderEnvelope<'a> {
    pub order: &'a NewOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrder {
    pub line_items: Vec<LineItem>,
    pub customer: Customer,
    pub billing_address: MailingAddress,
    pub shipping_address: MailingAddress,
    pub financial_status: FinancialStatus,
    pub tags: String,
    /// Shown under "Additional details" in the Shopify admin.
    pub note_attributes: Vec<NoteAttribute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialStatus {
    /// Payment is collected on delivery.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub variant_id: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub first_name: String,
    /// Omitted when blank; Shopify rejects an empty email string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailingAddress {
    pub address1: String,
    pub city: String,
    /// State name, e.g. `"Telangana"`.
    pub province: String,
    pub zip: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteAttribute {
    pub name: String,
    pub value: String,
}

/// Response body of a successful `POST /orders.json`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderResponse {
    #[serde(default)]
    pub order: Option<CreatedOrder>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedOrder {
    /// Shopify numeric order ID (e.g., `5923468312345`).
    pub id: i64,
    /// Sequential store order number (e.g., `1042`).
    #[serde(default)]
    pub order_number: Option<i64>,
    /// Display name, e.g. `"#1042"`.
    #[serde(default)]
    pub name: Option<String>,
}
