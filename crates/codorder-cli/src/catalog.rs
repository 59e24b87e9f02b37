//! `resolve` and `check-catalog` commands.

use std::path::Path;

use codorder_core::VariantCatalog;

pub(crate) fn run_resolve(path: &Path, product: &str, size: &str) -> anyhow::Result<()> {
    let catalog = VariantCatalog::load(path)?;
    match catalog.resolve(product, size) {
        Ok(variant_id) => {
            println!("{variant_id}");
            Ok(())
        }
        Err(miss) => {
            let known: Vec<&str> = catalog
                .product(product.trim())
                .map(|p| p.variants.keys().map(String::as_str).collect())
                .unwrap_or_default();
            if known.is_empty() {
                anyhow::bail!("{miss} (product not in catalog)");
            }
            anyhow::bail!("{miss} (known sizes: {})", known.join(", "));
        }
    }
}

pub(crate) fn run_check(path: &Path) -> anyhow::Result<()> {
    let catalog = VariantCatalog::load(path)?;
    println!(
        "{}: {} products, {} variants",
        path.display(),
        catalog.len(),
        catalog.variant_count()
    );
    for line in listing(&catalog) {
        println!("  {line}");
    }
    Ok(())
}

/// One `id  title  [sizes]` line per product.
pub(crate) fn listing(catalog: &VariantCatalog) -> Vec<String> {
    catalog
        .products()
        .map(|(id, product)| {
            let sizes: Vec<&str> = product.variants.keys().map(String::as_str).collect();
            format!(
                "{id}  {}  [{}]",
                product.title.as_deref().unwrap_or("(untitled)"),
                sizes.join(", ")
            )
        })
        .collect()
}
