//! Order rows and their line items as recorded by the backend.

pub mod entity;
pub mod error;

pub use error::*;
