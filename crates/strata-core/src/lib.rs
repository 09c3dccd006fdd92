//! # Strata Core
//!
//! Core types, traits, and error definitions shared by every Strata crate:
//! the unified error type, typed entity ids, the `Entity` contract the cache
//! accessors are generic over, and the product/order domain model.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod timestamp;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};
