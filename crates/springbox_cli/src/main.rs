//! Springbox catalog CLI.
//!
//! Every subcommand maps to one catalog operation and prints JSON on stdout.

mod commands;

use clap::Parser;
use commands::{sort_from_args, Cli, Commands};
use serde::Serialize;
use springbox_core::db::open_db;
use springbox_core::{
    default_log_level, init_logging, CatalogService, MovieId, PageRequest, RepoError,
    SqliteMovieRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .map_or_else(default_log_level, |level| level.as_str());
        init_logging(level, log_dir)?;
    }

    let conn = open_db(&cli.db)?;
    let catalog = CatalogService::new(SqliteMovieRepository::new(&conn));

    match cli.command {
        Commands::Add { title } => print_json(&catalog.add_movie(title)?),
        Commands::Get { id } => {
            let id = MovieId(id);
            let movie = catalog.get_movie(id)?.ok_or(RepoError::NotFound(id))?;
            print_json(&movie)
        }
        Commands::Rename { id, title } => print_json(&catalog.rename_movie(MovieId(id), title)?),
        Commands::Delete { id } => {
            catalog.delete_movie(MovieId(id))?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        Commands::Count => print_json(&serde_json::json!({ "count": catalog.count_movies()? })),
        Commands::List {
            page,
            size,
            sort,
            desc,
        } => {
            let request = PageRequest::of(page, size).with_sort(sort_from_args(sort, desc));
            print_json(&catalog.list_movies_page(&request)?)
        }
        Commands::FindByTitle { title } => print_json(&catalog.find_by_title(&title)?),
        Commands::FindByTitleLike { title } => print_json(&catalog.find_by_title_like(&title)?),
        Commands::FindByTitleContaining { title } => {
            print_json(&catalog.find_by_title_containing(&title)?)
        }
        Commands::FindByTitleStartingWith { title } => {
            print_json(&catalog.find_by_title_starting_with(&title)?)
        }
        Commands::Nineties => print_json(&catalog.find_nineties_movies()?),
        Commands::Eighties => print_json(&catalog.find_eighties_movies()?),
        Commands::Decade { year } => print_json(&catalog.find_by_release_decade(year)?),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
