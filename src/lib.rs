//! # Storefront cart
//!
//! Session cart for a food-ordering storefront, plus the checkout flow that
//! turns a cart into an order.
//!
//! ## Terminology Note
//!
//! - **Service** (e.g. [`CartService`]) = an actor task owning some state
//! - **Client** (e.g. [`CartClient`]) = a cloneable handle sending requests to a service
//!
//! ## Ingredients
//!
//! - **Cart store** - The one piece that must hold invariants over time → [`CartStore`]
//!     - One line per product, quantities always ≥ 1, totals derived from the lines
//!     - Snapshot persisted after every mutation into a [`KeyValueStore`] slot, restored on open
//!     - Observers notified synchronously after each mutation
//! - **Cart service** - The store hosted as an actor so every surface shares one instance → [`CartService`], [`CartClient`]
//! - **Backend stand-ins** - Generic resource actor for catalog, addresses and orders → [`ResourceActor`]
//! - **Checkout** - Clears the cart only after the order backend accepted the order → [`OrderClient::place_order`]
//! - **System coordinator** - Startup, wiring and shutdown → [`StorefrontSystem`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! # use storefront::*;
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let system = StorefrontSystem::new(&StorefrontConfig::load()?);
//!
//! let dish = system.catalog_client.create_product(ProductCreate::new("Biryani", 220.0)).await?;
//! system.catalog_client.add_to_cart(&system.cart_client, dish, 2).await?;
//!
//! let receipt = system.order_client
//!     .place_order(CheckoutRequest::for_customer("customer_1"))
//!     .await?;
//! println!("placed {}", receipt.order_id);
//!
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod address_actor;
pub mod app_system;
pub mod cart_actor;
pub mod clients;
pub mod domain;
pub mod messages;
pub mod order_actor;
pub mod product_actor;

#[cfg(test)]
mod mock_framework;

pub use actor_framework::{Entity, FrameworkError, ResourceActor, ResourceClient};
pub use address_actor::AddressError;
pub use app_system::{setup_tracing, ConfigError, StorefrontConfig, StorefrontSystem};
pub use cart_actor::{CartError, CartService, CartStore, FileStorage, KeyValueStore, MemoryStorage, SubscriptionId};
pub use clients::{AddressClient, CartClient, CartSubscription, CatalogClient, OrderClient};
pub use domain::*;
pub use order_actor::OrderError;
pub use product_actor::CatalogError;
