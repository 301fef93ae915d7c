use rusqlite::Connection;
use springbox_core::db::open_db_in_memory;
use springbox_core::{Movie, MovieId, MovieRepository, NewMovie, RepoError, SqliteMovieRepository};

fn seed(conn: &Connection, titles: &[&str]) -> Vec<MovieId> {
    let repo = SqliteMovieRepository::new(conn);
    titles
        .iter()
        .map(|title| repo.insert_movie(&NewMovie::new(*title)).unwrap())
        .collect()
}

fn ids(movies: &[Movie]) -> Vec<i64> {
    movies.iter().map(|movie| movie.id.get()).collect()
}

#[test]
fn sample_catalog_scenario() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["Toy Story (1995)", "Heat (1995)", "Jaws (1975)"]);
    let repo = SqliteMovieRepository::new(&conn);

    assert_eq!(ids(&repo.find_nineties_movies().unwrap()), vec![1, 2]);
    assert_eq!(ids(&repo.find_by_title_starting_with("Toy").unwrap()), vec![1]);
    assert_eq!(ids(&repo.find_by_title("Heat (1995)").unwrap()), vec![2]);
    assert!(repo.find_eighties_movies().unwrap().is_empty());
}

#[test]
fn find_by_title_is_exact_and_returns_every_duplicate() {
    let conn = open_db_in_memory().unwrap();
    seed(
        &conn,
        &["Hamlet (1996)", "Hamlet (1990)", "Hamlet (1996)", "hamlet (1996)"],
    );
    let repo = SqliteMovieRepository::new(&conn);

    let hits = repo.find_by_title("Hamlet (1996)").unwrap();
    assert_eq!(ids(&hits), vec![1, 3]);
    assert!(hits.iter().all(|movie| movie.title == "Hamlet (1996)"));

    assert!(repo.find_by_title("Hamlet").unwrap().is_empty());
}

#[test]
fn find_by_title_like_uses_caller_wildcards() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["Toy Story (1995)", "Toy Story 2 (1999)", "Heat (1995)"]);
    let repo = SqliteMovieRepository::new(&conn);

    assert_eq!(ids(&repo.find_by_title_like("Toy Story%").unwrap()), vec![1, 2]);
    assert_eq!(ids(&repo.find_by_title_like("%(199_)").unwrap()), vec![1, 2, 3]);
    assert_eq!(ids(&repo.find_by_title_like("Heat (1995)").unwrap()), vec![3]);
    assert!(repo.find_by_title_like("Heat").unwrap().is_empty());
}

#[test]
fn containing_matches_substrings_and_treats_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    seed(
        &conn,
        &["Toy Story (1995)", "Story of Us (1999)", "100% Arabica (1997)", "1000 Days (2001)"],
    );
    let repo = SqliteMovieRepository::new(&conn);

    assert_eq!(ids(&repo.find_by_title_containing("Story").unwrap()), vec![1, 2]);
    assert_eq!(ids(&repo.find_by_title_containing("100%").unwrap()), vec![3]);
    assert!(repo.find_by_title_containing("_").unwrap().is_empty());
}

#[test]
fn containing_is_superset_of_starting_with() {
    let conn = open_db_in_memory().unwrap();
    seed(
        &conn,
        &["Alien (1979)", "Aliens (1986)", "Cowboys & Aliens (2011)", "Heat (1995)"],
    );
    let repo = SqliteMovieRepository::new(&conn);

    let starting = ids(&repo.find_by_title_starting_with("Alien").unwrap());
    let containing = ids(&repo.find_by_title_containing("Alien").unwrap());
    assert_eq!(starting, vec![1, 2]);
    assert_eq!(containing, vec![1, 2, 3]);
    assert!(starting.iter().all(|id| containing.contains(id)));
}

#[test]
fn starting_with_escapes_underscore() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["M_A_S_H (1970)", "MxAxSxH (1970)"]);
    let repo = SqliteMovieRepository::new(&conn);

    assert_eq!(ids(&repo.find_by_title_starting_with("M_A").unwrap()), vec![1]);
}

#[test]
fn decade_filters_match_literal_substrings() {
    let conn = open_db_in_memory().unwrap();
    seed(
        &conn,
        &[
            "Heat (1995)",
            "Back to the Future (1985)",
            "1984 (1956)",
            "1990: The Bronx Warriors (1982)",
            "Jaws (1975)",
        ],
    );
    let repo = SqliteMovieRepository::new(&conn);

    let nineties = ids(&repo.find_nineties_movies().unwrap());
    let eighties = ids(&repo.find_eighties_movies().unwrap());
    assert_eq!(nineties, vec![1, 4]);
    assert_eq!(eighties, vec![2, 3, 4]);

    // Only a title containing both substrings lands in both sets.
    let shared: Vec<i64> = nineties
        .iter()
        .copied()
        .filter(|id| eighties.contains(id))
        .collect();
    assert_eq!(shared, vec![4]);
}

#[test]
fn queries_are_idempotent_on_unchanged_store() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["Toy Story (1995)", "Heat (1995)", "Jaws (1975)"]);
    let repo = SqliteMovieRepository::new(&conn);

    assert_eq!(
        repo.find_by_title_containing("a").unwrap(),
        repo.find_by_title_containing("a").unwrap()
    );
    assert_eq!(
        repo.find_nineties_movies().unwrap(),
        repo.find_nineties_movies().unwrap()
    );
}

#[test]
fn empty_store_returns_empty_lists() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::new(&conn);

    assert!(repo.find_by_title("Heat (1995)").unwrap().is_empty());
    assert!(repo.find_by_title_like("%").unwrap().is_empty());
    assert!(repo.find_by_title_containing("Heat").unwrap().is_empty());
    assert!(repo.find_by_title_starting_with("H").unwrap().is_empty());
    assert!(repo.find_nineties_movies().unwrap().is_empty());
    assert!(repo.find_eighties_movies().unwrap().is_empty());
}

#[test]
fn oversized_like_pattern_is_reported_as_invalid_pattern() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["Heat (1995)"]);
    let repo = SqliteMovieRepository::new(&conn);

    let pattern = "%".repeat(60_000);
    let err = repo.find_by_title_like(&pattern).unwrap_err();
    assert!(matches!(err, RepoError::InvalidPattern { .. }), "got {err:?}");
}

#[test]
fn rows_written_outside_the_repository_are_returned_as_stored() {
    let conn = open_db_in_memory().unwrap();
    let long_title = format!("{} (1995)", "A".repeat(600));
    conn.execute(
        "INSERT INTO movies (title) VALUES (?1), ('Heat (1995)'), ('   ');",
        [long_title.as_str()],
    )
    .unwrap();
    let repo = SqliteMovieRepository::new(&conn);

    let exact = repo.find_by_title(&long_title).unwrap();
    assert_eq!(exact, vec![Movie::new(MovieId(1), long_title.clone())]);
    assert_eq!(ids(&repo.find_nineties_movies().unwrap()), vec![1, 2]);
    assert_eq!(ids(&repo.find_by_title_like("%").unwrap()), vec![1, 2, 3]);
    assert_eq!(repo.get_movie(MovieId(3)).unwrap().unwrap().title, "   ");
}

#[test]
fn exact_match_is_case_sensitive_while_like_queries_fold_ascii_only() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["Heat (1995)", "Amélie (2001)"]);
    let repo = SqliteMovieRepository::new(&conn);

    assert!(repo.find_by_title("heat (1995)").unwrap().is_empty());
    assert_eq!(ids(&repo.find_by_title_like("heat (1995)").unwrap()), vec![1]);
    assert_eq!(ids(&repo.find_by_title_containing("heat").unwrap()), vec![1]);
    assert_eq!(ids(&repo.find_by_title_starting_with("HEAT").unwrap()), vec![1]);

    // ASCII letters fold, `é`/`É` do not.
    assert_eq!(ids(&repo.find_by_title_containing("AMéLIE").unwrap()), vec![2]);
    assert!(repo.find_by_title_containing("AMÉLIE").unwrap().is_empty());
}
