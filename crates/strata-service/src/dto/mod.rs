//! Data Transfer Objects (DTOs).

mod order_dto;
mod product_dto;

pub use order_dto::*;
pub use product_dto::*;
