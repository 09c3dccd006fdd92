//! Domain entities.

mod order;
mod product;

pub use order::*;
pub use product::*;
