use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Shopify answered 400, 402, or 422 with a JSON error body.
    #[error("Shopify rejected the order (HTTP {status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        raw: serde_json::Value,
    },

    /// Non-2xx response that carried no usable error body.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// 2xx response whose body had no `order` object.
    #[error("Shopify response did not contain an order")]
    MissingOrder { raw: serde_json::Value },

    #[error("invalid store URL \"{store_url}\": {reason}")]
    InvalidStoreUrl { store_url: String, reason: String },
}
