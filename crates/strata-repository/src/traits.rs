//! Store collaborator traits.
//!
//! The store is the system of record. Every operation here is fatal on
//! failure: errors surface as [`StrataError::Database`](strata_core::StrataError)
//! and the accessors propagate them unchanged.

use async_trait::async_trait;
use strata_core::{Entity, Interface, Order, Product, StrataResult};

/// Generic per-entity store operations.
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    /// Inserts a new record and returns it with its store-assigned id.
    async fn create(&self, entity: &E) -> StrataResult<E>;

    /// Finds a record by id.
    async fn find_by_id(&self, id: E::Id) -> StrataResult<Option<E>>;

    /// Persists a record, inserting or replacing the row with the same id.
    ///
    /// A record without an id is inserted as new.
    async fn save(&self, entity: &E) -> StrataResult<E>;

    /// Checks whether a record with the given id exists.
    async fn exists_by_id(&self, id: E::Id) -> StrataResult<bool>;

    /// Deletes a record by id. Returns `true` if a row was removed.
    async fn delete_by_id(&self, id: E::Id) -> StrataResult<bool>;

    /// Loads every record, ordered by id.
    async fn find_all(&self) -> StrataResult<Vec<E>>;
}

/// Product store, injectable through the DI module.
pub trait ProductRepository: EntityRepository<Product> + Interface {}

/// Order store, injectable through the DI module.
pub trait OrderRepository: EntityRepository<Order> + Interface {}
