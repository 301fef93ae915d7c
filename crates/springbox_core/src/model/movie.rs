//! Movie domain model.
//!
//! # Responsibility
//! - Define the catalog record and its write-side counterpart.
//! - Validate titles before they reach storage.
//! - Derive the release year encoded in MovieLens-style titles.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `title` is non-blank and at most `MAX_TITLE_CHARS` characters.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound on title length, counted in characters.
pub const MAX_TITLE_CHARS: usize = 512;

static RELEASE_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((\d{4})\)\s*$").expect("valid release year regex"));

/// Store-assigned movie identifier (SQLite rowid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl MovieId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for movie titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieValidationError {
    EmptyTitle,
    TitleTooLong { max_chars: usize, actual_chars: usize },
}

impl Display for MovieValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "movie title must not be blank"),
            Self::TitleTooLong {
                max_chars,
                actual_chars,
            } => write!(
                f,
                "movie title has {actual_chars} characters; at most {max_chars} allowed"
            ),
        }
    }
}

impl Error for MovieValidationError {}

/// A persisted catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub id: MovieId,
    /// Free text. MovieLens titles carry the release year as `(YYYY)`.
    pub title: String,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    pub fn validate(&self) -> Result<(), MovieValidationError> {
        validate_title(&self.title)
    }

    /// Release year parsed from a trailing `(YYYY)` in the title, if any.
    pub fn release_year(&self) -> Option<u16> {
        parse_release_year(&self.title)
    }
}

/// Write model for inserting a movie; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
}

impl NewMovie {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn validate(&self) -> Result<(), MovieValidationError> {
        validate_title(&self.title)
    }
}

pub fn validate_title(title: &str) -> Result<(), MovieValidationError> {
    if title.trim().is_empty() {
        return Err(MovieValidationError::EmptyTitle);
    }
    let actual_chars = title.chars().count();
    if actual_chars > MAX_TITLE_CHARS {
        return Err(MovieValidationError::TitleTooLong {
            max_chars: MAX_TITLE_CHARS,
            actual_chars,
        });
    }
    Ok(())
}

/// Extracts the release year from titles such as `Heat (1995)`.
pub fn parse_release_year(title: &str) -> Option<u16> {
    RELEASE_YEAR_RE
        .captures(title)
        .and_then(|caps| caps.get(1))
        .and_then(|year| year.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_year_reads_trailing_parenthesized_year() {
        assert_eq!(parse_release_year("Toy Story (1995)"), Some(1995));
        assert_eq!(parse_release_year("Heat (1995) "), Some(1995));
        assert_eq!(parse_release_year("1984"), None);
        assert_eq!(parse_release_year("Blade Runner (1982) Director's Cut"), None);
    }

    #[test]
    fn validate_rejects_blank_and_oversized_titles() {
        assert_eq!(validate_title("   "), Err(MovieValidationError::EmptyTitle));
        let long = "x".repeat(MAX_TITLE_CHARS + 1);
        assert!(matches!(
            validate_title(&long),
            Err(MovieValidationError::TitleTooLong { actual_chars, .. })
                if actual_chars == MAX_TITLE_CHARS + 1
        ));
        assert!(validate_title("Jaws (1975)").is_ok());
    }

    #[test]
    fn movie_serializes_with_flat_id() {
        let movie = Movie::new(MovieId(7), "Alien (1979)");
        let json = serde_json::to_value(&movie).expect("movie should serialize");
        assert_eq!(json, serde_json::json!({ "id": 7, "title": "Alien (1979)" }));
    }
}
