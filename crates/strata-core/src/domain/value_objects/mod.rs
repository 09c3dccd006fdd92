//! Value objects.

mod order_status;

pub use order_status::*;
