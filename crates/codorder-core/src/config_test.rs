use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn shopify_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("SHOPIFY_STORE_URL", "https://example-store.myshopify.com");
    m.insert("SHOPIFY_ACCESS_TOKEN", "shpat_test");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "CODORDER_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:5000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.catalog_path,
        std::path::PathBuf::from("./config/variants_map.json")
    );
    assert!(cfg.shopify.is_none());
    assert_eq!(cfg.order_country, "India");
    assert_eq!(cfg.upstream_timeout_secs, 10);
}

#[test]
fn build_app_config_reads_shopify_settings() {
    let map = shopify_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let shopify = cfg.shopify.expect("shopify config should be present");
    assert_eq!(shopify.store_url, "https://example-store.myshopify.com");
    assert_eq!(shopify.access_token, "shpat_test");
    assert_eq!(shopify.api_version, "2024-10");
}

#[test]
fn build_app_config_without_token_leaves_shopify_unset() {
    let mut map = shopify_env();
    map.remove("SHOPIFY_ACCESS_TOKEN");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.shopify.is_none());
}

#[test]
fn build_app_config_treats_blank_token_as_unset() {
    let mut map = shopify_env();
    map.insert("SHOPIFY_ACCESS_TOKEN", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.shopify.is_none());
}

#[test]
fn build_app_config_api_version_override() {
    let mut map = shopify_env();
    map.insert("SHOPIFY_API_VERSION", "2025-01");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.shopify.unwrap().api_version, "2025-01");
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("CODORDER_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CODORDER_BIND_ADDR"),
        "expected InvalidEnvVar(CODORDER_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_upstream_timeout_override() {
    let mut map = HashMap::new();
    map.insert("CODORDER_UPSTREAM_TIMEOUT_SECS", "3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.upstream_timeout_secs, 3);
}

#[test]
fn build_app_config_rejects_zero_upstream_timeout() {
    let mut map = HashMap::new();
    map.insert("CODORDER_UPSTREAM_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CODORDER_UPSTREAM_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CODORDER_UPSTREAM_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_upstream_timeout() {
    let mut map = HashMap::new();
    map.insert("CODORDER_UPSTREAM_TIMEOUT_SECS", "ten");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CODORDER_UPSTREAM_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CODORDER_UPSTREAM_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn shopify_config_debug_redacts_token() {
    let map = shopify_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("shpat_test"), "token leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}
