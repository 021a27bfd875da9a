//! Store repository abstraction.
//!
//! This module defines the [`StoreRepository`] trait that abstracts over store
//! record backends. The rest of the plugin only ever talks to this trait, so a
//! network-backed implementation can replace the in-memory one without touching
//! the application or UI layers.
//!
//! # Design Philosophy
//!
//! The trait is designed to be minimal and focused on the actual operations needed
//! by the worker thread, not a generic ORM. Each method maps directly to one of the
//! four asynchronous store operations.

use crate::domain::error::Result;
use crate::domain::{Store, StoreDraft, StorePatch};

/// Abstraction over store record backends.
///
/// Implementations own the canonical record set, assign identity fields on
/// insert, and apply partial updates. Search filtering happens here so the
/// worker can paginate a backend-defined ordering.
///
/// # Implementations
///
/// - [`MemoryRepository`](crate::storage::MemoryRepository): In-memory records
///   seeded with sample data (default)
///
/// # Examples
///
/// ```
/// use storekeeper::storage::{MemoryRepository, StoreRepository};
///
/// let repository = MemoryRepository::seeded();
/// let stores = repository.list("coffee").unwrap();
/// assert_eq!(stores.len(), 1);
/// ```
pub trait StoreRepository: Send {
    /// Returns all stores matching the search string, in repository order.
    ///
    /// Matching is a case-insensitive substring test against the name, alias,
    /// and description fields. An empty search returns every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn list(&self, search: &str) -> Result<Vec<Store>>;

    /// Retrieves a single store by id.
    ///
    /// # Errors
    ///
    /// Returns [`StorekeeperError::NotFound`](crate::domain::StorekeeperError::NotFound)
    /// if no store has the given id.
    fn get(&self, id: &str) -> Result<Store>;

    /// Inserts a new store built from the draft.
    ///
    /// The repository assigns a unique id and creation timestamp, and places
    /// the new record at the front of the collection. Returns the complete
    /// record as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the write operation fails.
    fn insert(&mut self, draft: StoreDraft) -> Result<Store>;

    /// Merges a partial update into an existing store.
    ///
    /// Only fields present in the patch are overwritten. Returns the record
    /// after the merge.
    ///
    /// # Errors
    ///
    /// Returns [`StorekeeperError::NotFound`](crate::domain::StorekeeperError::NotFound)
    /// if no store has the given id. The repository is left unmodified in that case.
    fn merge(&mut self, id: &str, patch: StorePatch) -> Result<Store>;
}
