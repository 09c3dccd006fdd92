//! MySQL repository implementations.

mod order_repository;
mod product_repository;

pub use order_repository::MySqlOrderRepository;
pub use product_repository::MySqlProductRepository;
