//! # Strata Repository
//!
//! Store collaborators for the caching accessors.
//!
//! ```text
//! Accessor (cache-aside / write-through)
//!   ↓  Arc<dyn ProductRepository> / Arc<dyn OrderRepository>
//! MySqlProductRepository / MySqlOrderRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
