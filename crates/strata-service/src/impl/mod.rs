//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `product_service.rs`).

pub mod order_service_impl;
pub mod product_service_impl;

pub use order_service_impl::OrderServiceImpl;
pub use product_service_impl::ProductServiceImpl;
