//! Session cart: the synchronous store and the service task hosting it.

pub mod error;
pub mod observers;
pub mod service;
pub mod storage;
pub mod store;

pub use error::*;
pub use observers::SubscriptionId;
pub use service::CartService;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::{CartStore, CART_STORAGE_KEY};
