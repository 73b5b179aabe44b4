pub mod product;
pub mod address;
pub mod order;
pub mod cart;

pub use product::*;
pub use address::*;
pub use order::*;
pub use cart::*;
