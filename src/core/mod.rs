//! Core business logic - framework-agnostic order operations.
//!
//! Everything the backend controller layer needs lives here: order CRUD with
//! nested line-item edits, cart-to-order reconciliation, the search predicate
//! builder, and the status lifecycle. All functions are async, take a
//! database connection, and return [`crate::errors::Result`].

/// Order code generation
pub mod code;
/// Order CRUD, nested line-item edits, and cache-total maintenance
pub mod order;
/// Cart-to-order reconciliation with gift-rule expansion
pub mod reconcile;
/// Dynamic filter/keyword search over the order collection
pub mod search;
/// Order status lifecycle transitions
pub mod status;
