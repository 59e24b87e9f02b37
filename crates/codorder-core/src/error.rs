use thiserror::Error;

/// Errors raised while loading runtime configuration or the variant catalog.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog JSON: {0}")]
    CatalogJsonParse(#[source] serde_json::Error),

    #[error("failed to parse catalog YAML: {0}")]
    CatalogYamlParse(#[source] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
