//! Movie repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Answer the catalog's title lookups with explicit SQL.
//! - Provide the CRUD, paging and sorting reads underneath them.
//!
//! # Invariants
//! - Every list result is ordered by `id ASC` unless a `Sort` says otherwise.
//! - Exact matches use SQLite's BINARY collation (case-sensitive); LIKE-based
//!   matches are ASCII case-insensitive. Case is never normalized here.
//! - Only write paths validate titles; reads return stored rows as they are.

use crate::db::DbError;
use crate::model::movie::{Movie, MovieId, MovieValidationError, NewMovie};
use crate::repo::paging::{Page, PageRequest, Sort};
use rusqlite::{params, Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MOVIE_SELECT_SQL: &str = "SELECT id, title FROM movies";
const LIKE_ESCAPE: char = '\\';

/// Literal substring behind the nineties filter. Matches anywhere in the title.
pub const NINETIES_PATTERN: &str = "%199%";
/// Literal substring behind the eighties filter. Matches anywhere in the title.
pub const EIGHTIES_PATTERN: &str = "%198%";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for movie persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(MovieValidationError),
    Db(DbError),
    NotFound(MovieId),
    /// The storage engine rejected a caller-supplied LIKE pattern.
    InvalidPattern {
        pattern: String,
        message: String,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "movie not found: {id}"),
            Self::InvalidPattern { pattern, message } => {
                let shown: String = pattern.chars().take(64).collect();
                write!(f, "invalid title pattern `{shown}`: {message}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted movie data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidPattern { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<MovieValidationError> for RepoError {
    fn from(value: MovieValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data access contract for the movie catalog.
pub trait MovieRepository {
    fn insert_movie(&self, movie: &NewMovie) -> RepoResult<MovieId>;
    /// Replaces the title of an existing movie. The id never changes.
    fn update_movie(&self, movie: &Movie) -> RepoResult<()>;
    fn get_movie(&self, id: MovieId) -> RepoResult<Option<Movie>>;
    fn exists(&self, id: MovieId) -> RepoResult<bool>;
    fn count_movies(&self) -> RepoResult<u64>;
    fn list_movies(&self, sort: &Sort) -> RepoResult<Vec<Movie>>;
    fn list_movies_page(&self, request: &PageRequest) -> RepoResult<Page<Movie>>;
    fn delete_movie(&self, id: MovieId) -> RepoResult<()>;

    /// Movies whose title equals `title` exactly.
    fn find_by_title(&self, title: &str) -> RepoResult<Vec<Movie>>;
    /// Movies matching `pattern` as a raw LIKE pattern (`%` and `_` are wildcards).
    fn find_by_title_like(&self, pattern: &str) -> RepoResult<Vec<Movie>>;
    /// Movies whose title contains `fragment`; wildcards in it match literally.
    fn find_by_title_containing(&self, fragment: &str) -> RepoResult<Vec<Movie>>;
    /// Movies whose title begins with `prefix`; wildcards in it match literally.
    fn find_by_title_starting_with(&self, prefix: &str) -> RepoResult<Vec<Movie>>;
    /// Movies whose title contains the substring `199`.
    fn find_nineties_movies(&self) -> RepoResult<Vec<Movie>>;
    /// Movies whose title contains the substring `198`.
    fn find_eighties_movies(&self) -> RepoResult<Vec<Movie>>;
}

/// SQLite-backed movie repository.
pub struct SqliteMovieRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMovieRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_movies<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Movie>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut movies = Vec::new();

        while let Some(row) = rows.next()? {
            movies.push(parse_movie_row(row)?);
        }

        Ok(movies)
    }

    fn query_like(&self, pattern: &str, escaped: bool) -> RepoResult<Vec<Movie>> {
        let sql = if escaped {
            format!("{MOVIE_SELECT_SQL} WHERE title LIKE ?1 ESCAPE '{LIKE_ESCAPE}' ORDER BY id ASC")
        } else {
            format!("{MOVIE_SELECT_SQL} WHERE title LIKE ?1 ORDER BY id ASC")
        };

        self.query_movies(&sql, [pattern])
            .map_err(|err| map_pattern_error(err, pattern))
    }
}

impl MovieRepository for SqliteMovieRepository<'_> {
    fn insert_movie(&self, movie: &NewMovie) -> RepoResult<MovieId> {
        movie.validate()?;

        self.conn.execute(
            "INSERT INTO movies (title) VALUES (?1);",
            [movie.title.as_str()],
        )?;

        Ok(MovieId(self.conn.last_insert_rowid()))
    }

    fn update_movie(&self, movie: &Movie) -> RepoResult<()> {
        movie.validate()?;

        let changed = self.conn.execute(
            "UPDATE movies SET title = ?1 WHERE id = ?2;",
            params![movie.title.as_str(), movie.id.get()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(movie.id));
        }

        Ok(())
    }

    fn get_movie(&self, id: MovieId) -> RepoResult<Option<Movie>> {
        let mut movies =
            self.query_movies(&format!("{MOVIE_SELECT_SQL} WHERE id = ?1;"), [id.get()])?;
        Ok(movies.pop())
    }

    fn exists(&self, id: MovieId) -> RepoResult<bool> {
        let found: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM movies WHERE id = ?1);",
            [id.get()],
            |row| row.get(0),
        )?;
        Ok(found == 1)
    }

    fn count_movies(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM movies;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative movie count `{count}`")))
    }

    fn list_movies(&self, sort: &Sort) -> RepoResult<Vec<Movie>> {
        self.query_movies(
            &format!("{MOVIE_SELECT_SQL} ORDER BY {};", sort.order_by_sql()),
            [],
        )
    }

    fn list_movies_page(&self, request: &PageRequest) -> RepoResult<Page<Movie>> {
        let size = request.effective_size();
        let content = self.query_movies(
            &format!(
                "{MOVIE_SELECT_SQL} ORDER BY {} LIMIT ?1 OFFSET ?2;",
                request.sort.order_by_sql()
            ),
            params![i64::from(size), request.offset()],
        )?;

        Ok(Page {
            content,
            page: request.page,
            size,
            total_elements: self.count_movies()?,
        })
    }

    fn delete_movie(&self, id: MovieId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM movies WHERE id = ?1;", [id.get()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn find_by_title(&self, title: &str) -> RepoResult<Vec<Movie>> {
        self.query_movies(
            &format!("{MOVIE_SELECT_SQL} WHERE title = ?1 ORDER BY id ASC;"),
            [title],
        )
    }

    fn find_by_title_like(&self, pattern: &str) -> RepoResult<Vec<Movie>> {
        self.query_like(pattern, false)
    }

    fn find_by_title_containing(&self, fragment: &str) -> RepoResult<Vec<Movie>> {
        self.query_like(&format!("%{}%", escape_like(fragment)), true)
    }

    fn find_by_title_starting_with(&self, prefix: &str) -> RepoResult<Vec<Movie>> {
        self.query_like(&format!("{}%", escape_like(prefix)), true)
    }

    fn find_nineties_movies(&self) -> RepoResult<Vec<Movie>> {
        self.query_like(NINETIES_PATTERN, false)
    }

    fn find_eighties_movies(&self) -> RepoResult<Vec<Movie>> {
        self.query_like(EIGHTIES_PATTERN, false)
    }
}

/// Builds a movie from whatever is stored; title rules only gate writes.
fn parse_movie_row(row: &Row<'_>) -> RepoResult<Movie> {
    Ok(Movie {
        id: MovieId(row.get("id")?),
        title: row.get("title")?,
    })
}

/// Escapes LIKE metacharacters so `value` matches literally under `ESCAPE '\'`.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

fn map_pattern_error(err: RepoError, pattern: &str) -> RepoError {
    match err {
        RepoError::Db(DbError::Sqlite(sqlite_err)) if is_pattern_error(&sqlite_err) => {
            RepoError::InvalidPattern {
                pattern: pattern.to_string(),
                message: sqlite_err.to_string(),
            }
        }
        other => other,
    }
}

fn is_pattern_error(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => {
            let msg = message.to_lowercase();
            msg.contains("like or glob pattern") || msg.contains("escape expression")
        }
        _ => false,
    }
}
