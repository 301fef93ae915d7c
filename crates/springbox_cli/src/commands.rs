//! CLI command definitions for the Springbox catalog.

use clap::{Parser, Subcommand, ValueEnum};
use springbox_core::{MovieSortField, Sort, SortDirection};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum SortKey {
    #[default]
    Id,
    Title,
}

/// Springbox - movie catalog queries over a local SQLite file
#[derive(Parser, Debug)]
#[command(name = "springbox")]
#[command(version)]
pub struct Cli {
    /// Catalog database file (created and migrated on first use)
    #[arg(long, env = "SPRINGBOX_DB", default_value = "springbox.sqlite3", global = true)]
    pub db: PathBuf,

    /// Absolute directory for rotating log files; logging is off when omitted
    #[arg(long, env = "SPRINGBOX_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level used when --log-dir is set (defaults by build mode)
    #[arg(short = 'l', long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a movie and print it with its assigned id
    Add { title: String },
    /// Print one movie by id
    Get { id: i64 },
    /// Replace the title of an existing movie
    Rename { id: i64, title: String },
    /// Delete a movie by id
    Delete { id: i64 },
    /// Print the number of movies
    Count,
    /// Print one page of the catalog
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = springbox_core::repo::paging::DEFAULT_PAGE_SIZE)]
        size: u32,
        #[arg(long, value_enum, default_value_t = SortKey::Id)]
        sort: SortKey,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Movies titled exactly TITLE
    FindByTitle { title: String },
    /// Movies matching TITLE as a LIKE pattern (use % and _ as wildcards)
    FindByTitleLike { title: String },
    /// Movies whose title contains TITLE
    FindByTitleContaining { title: String },
    /// Movies whose title starts with TITLE
    FindByTitleStartingWith { title: String },
    /// Movies whose title contains "199"
    Nineties,
    /// Movies whose title contains "198"
    Eighties,
    /// Movies whose (YYYY) release year falls in the decade starting at YEAR
    Decade { year: u16 },
}

pub fn sort_from_args(key: SortKey, desc: bool) -> Sort {
    let field = match key {
        SortKey::Id => MovieSortField::Id,
        SortKey::Title => MovieSortField::Title,
    };
    let direction = if desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    Sort::by(field, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_find_by_title_with_global_db() {
        let cli = Cli::try_parse_from([
            "springbox",
            "--db",
            "/tmp/catalog.sqlite3",
            "find-by-title",
            "Heat (1995)",
        ])
        .unwrap();
        assert_eq!(cli.db, PathBuf::from("/tmp/catalog.sqlite3"));
        assert!(matches!(cli.command, Commands::FindByTitle { title } if title == "Heat (1995)"));
    }

    #[test]
    fn list_sort_flags_map_to_sort() {
        let sort = sort_from_args(SortKey::Title, true);
        assert_eq!(sort.field, MovieSortField::Title);
        assert_eq!(sort.direction, SortDirection::Desc);
    }
}
