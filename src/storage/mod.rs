//! Storage layer for store records.
//!
//! This module provides the repository abstraction for store records and the
//! in-memory implementation that backs the plugin today. The trait boundary is
//! the substitution point for a future network-backed repository.
//!
//! # Modules
//!
//! - `repository`: Repository trait abstraction for record backends
//! - `memory`: Seeded in-memory implementation

pub mod memory;
pub mod repository;

pub use memory::MemoryRepository;
pub use repository::StoreRepository;
