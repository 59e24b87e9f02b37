//! Static product/size → variant lookup table.
//!
//! The catalog file is maintained by hand next to the storefront and mirrors
//! the store's products:
//!
//! ```json
//! {
//!   "8123456789": {
//!     "title": "Oversized Tee",
//!     "variants": { "S": 44120000001, "M": "44120000002" }
//!   }
//! }
//! ```
//!
//! Variant ids may be written as numbers or numeric strings. The catalog is
//! loaded once at startup and shared read-only afterwards.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::ConfigError;

/// Returned when a product/size pair has no catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("variant not found for product_id={product_id} size={size}")]
pub struct VariantNotFound {
    pub product_id: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProduct {
    pub title: Option<String>,
    /// Size key as written in the catalog → variant id.
    pub variants: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantCatalog {
    products: HashMap<String, CatalogProduct>,
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    variants: BTreeMap<String, RawVariantId>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawVariantId {
    Number(u64),
    Text(String),
}

impl VariantCatalog {
    /// Loads a catalog file; `.yaml`/`.yml` files are parsed as YAML,
    /// everything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
            path: path.display().to_string(),
            source: e,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError` on malformed JSON or invalid entries.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, RawProduct> =
            serde_json::from_str(content).map_err(ConfigError::CatalogJsonParse)?;
        Self::from_raw(raw)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` on malformed YAML or invalid entries.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, RawProduct> =
            serde_yaml::from_str(content).map_err(ConfigError::CatalogYamlParse)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: BTreeMap<String, RawProduct>) -> Result<Self, ConfigError> {
        let mut products = HashMap::with_capacity(raw.len());

        for (product_id, product) in raw {
            let product_id = product_id.trim().to_owned();
            if product_id.is_empty() {
                return Err(ConfigError::Validation(
                    "product_id must be non-empty".to_string(),
                ));
            }

            let mut variants = BTreeMap::new();
            for (size, raw_id) in product.variants {
                let size = size.trim().to_owned();
                if size.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "product '{product_id}' has an empty size key"
                    )));
                }
                let variant_id = parse_variant_id(&product_id, &size, raw_id)?;
                if variants.insert(size.clone(), variant_id).is_some() {
                    return Err(ConfigError::Validation(format!(
                        "product '{product_id}' has duplicate size key '{size}'"
                    )));
                }
            }

            if products
                .insert(
                    product_id.clone(),
                    CatalogProduct {
                        title: product.title,
                        variants,
                    },
                )
                .is_some()
            {
                return Err(ConfigError::Validation(format!(
                    "duplicate product_id: '{product_id}'"
                )));
            }
        }

        Ok(Self { products })
    }

    /// Resolves a product/size pair to a variant id.
    ///
    /// The size is tried as given, then upper-cased, then lower-cased, since
    /// referring pages are inconsistent about casing (`"m"` vs `"M"`).
    ///
    /// # Errors
    ///
    /// Returns [`VariantNotFound`] when the product is unknown or none of the
    /// size spellings match.
    pub fn resolve(&self, product_id: &str, size: &str) -> Result<u64, VariantNotFound> {
        let product_id = product_id.trim();
        let size = size.trim();

        let found = self.products.get(product_id).and_then(|product| {
            [size.to_owned(), size.to_uppercase(), size.to_lowercase()]
                .iter()
                .find_map(|key| product.variants.get(key).copied())
        });

        found.ok_or_else(|| VariantNotFound {
            product_id: product_id.to_owned(),
            size: size.to_owned(),
        })
    }

    #[must_use]
    pub fn product(&self, product_id: &str) -> Option<&CatalogProduct> {
        self.products.get(product_id.trim())
    }

    /// Products ordered by id.
    pub fn products(&self) -> impl Iterator<Item = (&str, &CatalogProduct)> {
        let mut products: Vec<_> = self
            .products
            .iter()
            .map(|(id, product)| (id.as_str(), product))
            .collect();
        products.sort_unstable_by_key(|(id, _)| *id);
        products.into_iter()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Total number of size → variant entries across all products.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.products.values().map(|p| p.variants.len()).sum()
    }
}

fn parse_variant_id(product_id: &str, size: &str, raw: RawVariantId) -> Result<u64, ConfigError> {
    let id = match raw {
        RawVariantId::Number(n) => Some(n),
        RawVariantId::Text(s) => s.trim().parse::<u64>().ok(),
    };

    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ConfigError::Validation(format!(
            "product '{product_id}' size '{size}' has an invalid variant id"
        ))),
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
