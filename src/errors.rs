//! Unified error types for the crate.
//!
//! Every fallible operation returns [`Result`]. Validation problems carry the
//! offending field, lookup misses carry the key that was searched for, and
//! database errors wrap `SeaORM`'s error type directly.

use thiserror::Error;

/// All errors the order subsystem can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing failed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// A required field is missing or malformed; the write was not performed
    #[error("Validation failed for {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// Description of the violation
        message: String,
    },

    /// No order exists with the given id
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// A cart item or gift rule references a product that does not exist
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// The product id that could not be resolved
        id: i64,
    },

    /// A quantity was zero, negative, or otherwise unusable
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i32,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
