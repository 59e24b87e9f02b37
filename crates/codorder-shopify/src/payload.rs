//! Builds the Shopify order for a validated COD request.

use codorder_core::ValidatedOrder;

use crate::types::{
    Customer, FinancialStatus, LineItem, MailingAddress, NewOrder, NoteAttribute,
};

pub const COD_TAG: &str = "COD";

/// Builds a single-item, payment-pending COD order.
///
/// Billing and shipping share the resolved delivery address. The raw form
/// fields are repeated as note attributes so fulfilment staff can check what
/// the customer actually typed.
#[must_use]
pub fn cod_order(order: &ValidatedOrder, variant_id: u64, country: &str) -> NewOrder {
    let address = MailingAddress {
        address1: order.address_line.clone(),
        city: order.city.clone(),
        province: order.state.clone(),
        zip: order.pincode.clone(),
        country: country.to_owned(),
    };

    let note = |name: &str, value: &str| NoteAttribute {
        name: name.to_owned(),
        value: value.to_owned(),
    };

    NewOrder {
        line_items: vec![LineItem {
            variant_id,
            quantity: 1,
        }],
        customer: Customer {
            first_name: order.name.clone(),
            email: Some(order.email.clone()).filter(|e| !e.is_empty()),
            phone: order.phone.clone(),
        },
        billing_address: address.clone(),
        shipping_address: address,
        financial_status: FinancialStatus::Pending,
        tags: COD_TAG.to_owned(),
        note_attributes: vec![
            note("NAME", &order.name),
            note("Phone number", &order.phone),
            note("Road name/ Area /colony", &order.area),
            note("House no", &order.house_no),
            note("City", &order.city),
            note("State", &order.state),
            note("zip_code", &order.pincode),
            note("Size", &order.size),
            note("Email", &order.email),
        ],
    }
}
