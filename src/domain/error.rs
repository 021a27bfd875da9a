//! Error types for the Storekeeper plugin.
//!
//! This module defines the centralized error type [`StorekeeperError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for Storekeeper plugin operations.
///
/// This enum consolidates all error conditions that can occur during plugin execution,
/// from repository operations to I/O failures and configuration issues. Most variants
/// wrap underlying errors from external crates using `#[from]` for automatic conversion.
///
/// # Examples
///
/// ```
/// use storekeeper::domain::StorekeeperError;
///
/// fn validate_config() -> Result<(), StorekeeperError> {
///     Err(StorekeeperError::Config("Missing required field".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum StorekeeperError {
    /// A store record was requested by an id that does not exist.
    ///
    /// Returned by repository lookups and merges against unknown ids. The
    /// message text is shown verbatim in the UI error state.
    #[error("Store not found")]
    NotFound,

    /// Repository operation failed.
    ///
    /// Occurs when reading from or writing to the store repository fails.
    /// The string contains a description of what went wrong.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    ///
    /// Occurs when the plugin cannot parse or apply the configured theme.
    /// The string contains a description of what went wrong.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with background worker failed.
    ///
    /// Occurs when the plugin cannot communicate with its background worker
    /// thread, typically during store operations. The string contains details
    /// about the communication failure.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Storekeeper operations.
///
/// This is a type alias for `std::result::Result<T, StorekeeperError>` that simplifies
/// function signatures throughout the codebase.
///
/// # Examples
///
/// ```
/// use storekeeper::domain::Result;
///
/// fn process_store() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, StorekeeperError>;
