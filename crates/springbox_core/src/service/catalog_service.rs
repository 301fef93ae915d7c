//! Movie catalog use-case service.
//!
//! # Responsibility
//! - Provide stable catalog entry points for core callers.
//! - Delegate persistence and lookups to repository implementations.
//! - Emit one structured log event per catalog query.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Repository errors surface unchanged inside `CatalogError::Repo`.

use crate::model::movie::{Movie, MovieId, NewMovie};
use crate::repo::movie_repo::{MovieRepository, RepoError, RepoResult};
use crate::repo::paging::{Page, PageRequest, Sort};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const MIN_DECADE: u16 = 1000;
const MAX_DECADE: u16 = 9990;

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum CatalogError {
    /// Decade start must be a multiple of ten within four-digit years.
    InvalidDecade(u16),
    Repo(RepoError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDecade(value) => write!(
                f,
                "invalid decade `{value}`; expected a multiple of 10 in {MIN_DECADE}..={MAX_DECADE}"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDecade(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Use-case wrapper around a [`MovieRepository`].
pub struct CatalogService<R: MovieRepository> {
    repo: R,
}

impl<R: MovieRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts a movie and returns it with its assigned id.
    pub fn add_movie(&self, title: impl Into<String>) -> RepoResult<Movie> {
        let new_movie = NewMovie::new(title);
        let id = self.repo.insert_movie(&new_movie)?;
        debug!("event=movie_add module=catalog status=ok id={id}");
        Ok(Movie::new(id, new_movie.title))
    }

    pub fn rename_movie(&self, id: MovieId, title: impl Into<String>) -> RepoResult<Movie> {
        let movie = Movie::new(id, title);
        self.repo.update_movie(&movie)?;
        Ok(movie)
    }

    pub fn get_movie(&self, id: MovieId) -> RepoResult<Option<Movie>> {
        self.repo.get_movie(id)
    }

    pub fn count_movies(&self) -> RepoResult<u64> {
        self.repo.count_movies()
    }

    pub fn list_movies(&self, sort: &Sort) -> RepoResult<Vec<Movie>> {
        self.repo.list_movies(sort)
    }

    pub fn list_movies_page(&self, request: &PageRequest) -> RepoResult<Page<Movie>> {
        self.repo.list_movies_page(request)
    }

    pub fn delete_movie(&self, id: MovieId) -> RepoResult<()> {
        self.repo.delete_movie(id)?;
        debug!("event=movie_delete module=catalog status=ok id={id}");
        Ok(())
    }

    pub fn find_by_title(&self, title: &str) -> RepoResult<Vec<Movie>> {
        logged("find_by_title", || self.repo.find_by_title(title))
    }

    pub fn find_by_title_like(&self, pattern: &str) -> RepoResult<Vec<Movie>> {
        logged("find_by_title_like", || self.repo.find_by_title_like(pattern))
    }

    pub fn find_by_title_containing(&self, fragment: &str) -> RepoResult<Vec<Movie>> {
        logged("find_by_title_containing", || {
            self.repo.find_by_title_containing(fragment)
        })
    }

    pub fn find_by_title_starting_with(&self, prefix: &str) -> RepoResult<Vec<Movie>> {
        logged("find_by_title_starting_with", || {
            self.repo.find_by_title_starting_with(prefix)
        })
    }

    pub fn find_nineties_movies(&self) -> RepoResult<Vec<Movie>> {
        logged("find_nineties_movies", || self.repo.find_nineties_movies())
    }

    pub fn find_eighties_movies(&self) -> RepoResult<Vec<Movie>> {
        logged("find_eighties_movies", || self.repo.find_eighties_movies())
    }

    /// Movies whose parsed release year falls inside the decade starting at
    /// `decade_start` (e.g. `1990` covers 1990..=1999).
    ///
    /// Unlike [`Self::find_nineties_movies`], a title that merely contains the
    /// digits (`"1990: The Bronx Warriors (1982)"`) is not a match.
    pub fn find_by_release_decade(&self, decade_start: u16) -> CatalogResult<Vec<Movie>> {
        if decade_start % 10 != 0 || !(MIN_DECADE..=MAX_DECADE).contains(&decade_start) {
            return Err(CatalogError::InvalidDecade(decade_start));
        }

        let decade_digits = decade_start / 10;
        let decade_end = decade_start + 9;
        let candidates = logged("find_by_release_decade", || {
            self.repo
                .find_by_title_containing(&decade_digits.to_string())
        })?;

        Ok(candidates
            .into_iter()
            .filter(|movie| {
                movie
                    .release_year()
                    .is_some_and(|year| (decade_start..=decade_end).contains(&year))
            })
            .collect())
    }
}

fn logged<F>(query: &str, run: F) -> RepoResult<Vec<Movie>>
where
    F: FnOnce() -> RepoResult<Vec<Movie>>,
{
    let started_at = Instant::now();
    let result = run();
    match &result {
        Ok(movies) => debug!(
            "event=catalog_query module=catalog status=ok query={query} rows={} duration_ms={}",
            movies.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => warn!(
            "event=catalog_query module=catalog status=error query={query} duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}
