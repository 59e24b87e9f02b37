pub mod client;
pub mod error;
pub mod payload;
pub mod types;

pub use client::ShopifyAdminClient;
pub use error::ShopifyError;
pub use payload::cod_order;
pub use types::{CreatedOrder, NewOrder};
