//! Domain entities and value objects.
//!
//! `Product` is served cache-aside and `Order` is served write-through.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
