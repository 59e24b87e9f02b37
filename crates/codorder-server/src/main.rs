mod api;
mod middleware;

use std::sync::Arc;

use codorder_core::VariantCatalog;
use codorder_shopify::ShopifyAdminClient;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = codorder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let catalog = VariantCatalog::load(&config.catalog_path)?;
    tracing::info!(
        path = %config.catalog_path.display(),
        products = catalog.len(),
        variants = catalog.variant_count(),
        "variant catalog loaded"
    );

    let shopify = match &config.shopify {
        Some(shopify) => {
            let client = ShopifyAdminClient::new(shopify, config.upstream_timeout_secs)?;
            tracing::info!(orders_url = %client.orders_url(), "shopify client ready");
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!(
                "SHOPIFY_STORE_URL or SHOPIFY_ACCESS_TOKEN not set; order submissions will be refused"
            );
            None
        }
    };

    let state = AppState {
        catalog: Arc::new(catalog),
        shopify,
        order_country: Arc::from(config.order_country.as_str()),
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "codorder server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
