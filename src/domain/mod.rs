//! Domain layer for the Storekeeper plugin.
//!
//! This module contains the core domain types and business logic for the plugin,
//! independent of Zellij-specific APIs or infrastructure concerns. It follows
//! domain-driven design principles by keeping business rules isolated from external
//! dependencies.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`store`]: Store record model with draft and patch payloads
//! - [`pagination`]: Page descriptor and slicing math
//!
//! # Examples
//!
//! ```
//! use storekeeper::domain::{StorePatch, Pagination};
//!
//! let pagination = Pagination::for_page(1, 25);
//! assert_eq!(pagination.total_pages, 3);
//!
//! let patch = StorePatch { name: Some("Renamed".to_string()), ..Default::default() };
//! assert!(patch.alias.is_none());
//! ```

pub mod error;
pub mod pagination;
pub mod store;

pub use error::{Result, StorekeeperError};
pub use pagination::{Pagination, PAGE_SIZE};
pub use store::{Store, StoreDraft, StorePatch};
