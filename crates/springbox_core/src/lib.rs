//! Core catalog logic for Springbox.
//! This crate owns the movie schema and every catalog query.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::movie::{Movie, MovieId, MovieValidationError, NewMovie};
pub use repo::movie_repo::{
    MovieRepository, RepoError, RepoResult, SqliteMovieRepository, EIGHTIES_PATTERN,
    NINETIES_PATTERN,
};
pub use repo::paging::{MovieSortField, Page, PageRequest, Sort, SortDirection};
pub use service::catalog_service::{CatalogError, CatalogResult, CatalogService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
