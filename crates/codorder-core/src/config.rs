use crate::app_config::{AppConfig, Environment, ShopifyConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values are treated the same as unset ones.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("CODORDER_ENV", "development"))?;

    let bind_addr = or_default("CODORDER_BIND_ADDR", "0.0.0.0:5000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("CODORDER_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("CODORDER_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default(
        "CODORDER_CATALOG_PATH",
        "./config/variants_map.json",
    ));

    let shopify = match (optional("SHOPIFY_STORE_URL"), optional("SHOPIFY_ACCESS_TOKEN")) {
        (Some(store_url), Some(access_token)) => Some(ShopifyConfig {
            store_url,
            access_token,
            api_version: or_default("SHOPIFY_API_VERSION", "2024-10"),
        }),
        _ => None,
    };

    let order_country = or_default("CODORDER_ORDER_COUNTRY", "India");

    let upstream_timeout_secs = parse_u64("CODORDER_UPSTREAM_TIMEOUT_SECS", "10")?;
    if upstream_timeout_secs == 0 {
        return Err(invalid(
            "CODORDER_UPSTREAM_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_path,
        shopify,
        order_country,
        upstream_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CODORDER_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
