//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the catalog's data access contract.
//! - Keep SQLite query details out of the service layer.
//!
//! # Invariants
//! - Writes enforce `validate()` before persistence.
//! - "No match" is an empty result, never an error.

pub mod movie_repo;
pub mod paging;
