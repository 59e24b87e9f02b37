pub mod address;
pub mod app_config;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geocode;
pub mod order;

pub use address::{normalize_address, AddressComponents, ComponentType, NormalizedAddress};
pub use app_config::{AppConfig, Environment, ShopifyConfig};
pub use catalog::{CatalogProduct, VariantCatalog, VariantNotFound};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use geocode::{select_result, GeocodeComponent, GeocodeResponse, GeocodeResult};
pub use order::{
    normalize_pincode, OrderRequest, OrderValidationError, ReceivedFields, ValidatedOrder,
};
