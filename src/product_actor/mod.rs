//! Catalog rows (`food_items`) as managed by the resource actor.

pub mod entity;
pub mod error;

pub use error::*;
