use super::*;
use serde_json::json;

#[test]
fn orders_url_from_bare_domain() {
    let url = build_orders_url("my-store.myshopify.com", "2024-10").expect("valid url");
    assert_eq!(
        url.as_str(),
        "https://my-store.myshopify.com/admin/api/2024-10/orders.json"
    );
}

#[test]
fn orders_url_strips_path_and_trailing_slash() {
    let url = build_orders_url("https://my-store.myshopify.com/admin/", "2024-10")
        .expect("valid url");
    assert_eq!(
        url.as_str(),
        "https://my-store.myshopify.com/admin/api/2024-10/orders.json"
    );
}

#[test]
fn orders_url_keeps_http_for_local_servers() {
    let url = build_orders_url("http://127.0.0.1:8080", "2024-10").expect("valid url");
    assert_eq!(
        url.as_str(),
        "http://127.0.0.1:8080/admin/api/2024-10/orders.json"
    );
}

#[test]
fn empty_store_url_is_rejected() {
    let err = build_orders_url("   ", "2024-10").unwrap_err();
    assert!(matches!(err, ShopifyError::InvalidStoreUrl { .. }));
}

#[test]
fn rejection_message_from_string() {
    assert_eq!(rejection_message(&json!({"errors": "Not Found"})), "Not Found");
}

#[test]
fn rejection_message_from_field_map() {
    let body = json!({"errors": {"line_items": ["is invalid"], "customer": ["phone is invalid"]}});
    assert_eq!(
        rejection_message(&body),
        "customer: phone is invalid; line_items: is invalid"
    );
}

#[test]
fn rejection_message_from_singular_error_key() {
    assert_eq!(
        rejection_message(&json!({"error": "Unavailable Shop"})),
        "Unavailable Shop"
    );
}

#[test]
fn rejection_message_falls_back_when_absent() {
    assert_eq!(
        rejection_message(&json!({"unexpected": true})),
        "Failed to create order in Shopify"
    );
    assert_eq!(
        rejection_message(&json!({"errors": []})),
        "Failed to create order in Shopify"
    );
}

#[test]
fn debug_redacts_access_token() {
    let client = ShopifyAdminClient::with_store_url(
        "my-store.myshopify.com",
        "shpat_secret",
        "2024-10",
        10,
    )
    .expect("client");
    let debug = format!("{client:?}");
    assert!(!debug.contains("shpat_secret"));
    assert!(debug.contains("[redacted]"));
}

#[test]
fn only_order_level_statuses_are_rejections() {
    for code in [400, 402, 422] {
        let status = StatusCode::from_u16(code).expect("status");
        assert!(is_order_rejection_status(status), "{code} should be a rejection");
    }
    for code in [401, 403, 404, 406, 429, 500, 503] {
        let status = StatusCode::from_u16(code).expect("status");
        assert!(!is_order_rejection_status(status), "{code} should not be a rejection");
    }
}
