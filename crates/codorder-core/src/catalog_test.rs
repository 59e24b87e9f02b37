use std::io::Write as _;

use super::*;

const CATALOG: &str = r#"{
    "8123456789": {
        "title": "Oversized Tee",
        "variants": { "S": 44120000001, "M": "44120000002", "xl": 44120000004 }
    },
    "8123456790": {
        "variants": { "Free Size": 44120000010 }
    }
}"#;

fn catalog() -> VariantCatalog {
    VariantCatalog::from_json_str(CATALOG).expect("valid catalog")
}

#[test]
fn resolve_exact_size() {
    assert_eq!(catalog().resolve("8123456789", "S"), Ok(44_120_000_001));
}

#[test]
fn resolve_accepts_string_variant_ids() {
    assert_eq!(catalog().resolve("8123456789", "M"), Ok(44_120_000_002));
}

#[test]
fn resolve_lowercase_request_against_uppercase_key() {
    assert_eq!(catalog().resolve("8123456789", "m"), Ok(44_120_000_002));
}

#[test]
fn resolve_uppercase_request_against_lowercase_key() {
    assert_eq!(catalog().resolve("8123456789", "XL"), Ok(44_120_000_004));
}

#[test]
fn resolve_trims_inputs() {
    assert_eq!(catalog().resolve(" 8123456790 ", " Free Size "), Ok(44_120_000_010));
}

#[test]
fn resolve_unknown_size_names_attempt() {
    let err = catalog().resolve("8123456789", "XXL").unwrap_err();
    assert_eq!(err.product_id, "8123456789");
    assert_eq!(err.size, "XXL");
}

#[test]
fn resolve_unknown_product() {
    let err = catalog().resolve("999", "S").unwrap_err();
    assert_eq!(
        err.to_string(),
        "variant not found for product_id=999 size=S"
    );
}

#[test]
fn counts_products_and_variants() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.variant_count(), 4);
    assert_eq!(
        catalog.product("8123456789").and_then(|p| p.title.as_deref()),
        Some("Oversized Tee")
    );
}

#[test]
fn rejects_non_numeric_variant_id() {
    let result = VariantCatalog::from_json_str(r#"{"1": {"variants": {"S": "abc"}}}"#);
    assert!(
        matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("invalid variant id")),
        "expected Validation error, got: {result:?}"
    );
}

#[test]
fn rejects_zero_variant_id() {
    let result = VariantCatalog::from_json_str(r#"{"1": {"variants": {"S": 0}}}"#);
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn rejects_size_keys_that_collide_after_trim() {
    let result = VariantCatalog::from_json_str(r#"{"1": {"variants": {"M": 1, " M": 2}}}"#);
    assert!(
        matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("duplicate size key 'M'")),
        "expected Validation error, got: {result:?}"
    );
}

#[test]
fn products_are_listed_by_id() {
    let catalog = catalog();
    let ids: Vec<&str> = catalog.products().map(|(id, _)| id).collect();
    assert_eq!(ids, ["8123456789", "8123456790"]);
}

#[test]
fn rejects_blank_product_id() {
    let result = VariantCatalog::from_json_str(r#"{" ": {"variants": {"S": 1}}}"#);
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn rejects_malformed_json() {
    let result = VariantCatalog::from_json_str("{not json");
    assert!(matches!(result, Err(ConfigError::CatalogJsonParse(_))));
}

#[test]
fn parses_yaml_catalog() {
    let yaml = "\"8123456789\":\n  variants:\n    S: 44120000001\n    M: \"44120000002\"\n";
    let catalog = VariantCatalog::from_yaml_str(yaml).expect("valid yaml catalog");
    assert_eq!(catalog.resolve("8123456789", "m"), Ok(44_120_000_002));
}

#[test]
fn load_reads_json_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("temp file");
    file.write_all(CATALOG.as_bytes()).expect("write catalog");

    let catalog = VariantCatalog::load(file.path()).expect("load catalog");
    assert_eq!(catalog.len(), 2);
}

#[test]
fn load_reads_yaml_file_by_extension() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("temp file");
    file.write_all(b"\"42\":\n  variants:\n    L: 7\n")
        .expect("write catalog");

    let catalog = VariantCatalog::load(file.path()).expect("load catalog");
    assert_eq!(catalog.resolve("42", "l"), Ok(7));
}

#[test]
fn load_missing_file_reports_path() {
    let result = VariantCatalog::load(Path::new("/nonexistent/variants_map.json"));
    assert!(
        matches!(result, Err(ConfigError::CatalogFileIo { ref path, .. }) if path.contains("variants_map.json")),
        "expected CatalogFileIo, got: {result:?}"
    );
}
