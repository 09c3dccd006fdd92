//! # Strata Service
//!
//! Entity services and the two cache accessors they are built on.
//! Products are served cache-aside and orders write-through; both share the
//! cache backends in [`cache`] and the counters in [`metrics`].

pub mod accessor;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod metrics;
pub mod order_service;
pub mod product_service;

#[cfg(test)]
mod test_support;

pub use accessor::*;
pub use cache::*;
pub use dto::*;
pub use order_service::*;
pub use product_service::*;
pub use r#impl::*;
