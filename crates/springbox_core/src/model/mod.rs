//! Catalog domain model.
//!
//! # Invariants
//! - Every movie is identified by a store-assigned `MovieId`.
//! - Titles are free text and may repeat across movies.

pub mod movie;
