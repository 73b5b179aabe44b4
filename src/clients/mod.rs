//! Client handles injected into every storefront surface.

#[macro_use]
mod macros;

pub mod address_client;
pub mod cart_client;
pub mod catalog_client;
pub mod order_client;

pub use address_client::AddressClient;
pub use cart_client::{CartClient, CartSubscription};
pub use catalog_client::CatalogClient;
pub use order_client::OrderClient;
