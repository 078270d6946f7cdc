use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{BookRepository, BookSearchQuery, NewBook, RepoError, SqliteBookRepository};
use rusqlite::Connection;

fn seeded_catalog() -> Connection {
    let conn = open_db_in_memory().unwrap();
    {
        let repo = SqliteBookRepository::new(&conn);
        repo.add_book(&NewBook::new("War and Peace", "Leo Tolstoy", 1869))
            .unwrap();
        repo.add_book(&NewBook::new("Warehouse Logistics", "Pat Reeve", 2003))
            .unwrap();
        repo.add_book(&NewBook::new("1984", "George Orwell", 1949))
            .unwrap();
        repo.add_book(&NewBook::new("Animal Farm", "George Orwell", 1945))
            .unwrap();
    }
    conn
}

#[test]
fn search_without_criteria_is_rejected() {
    let conn = seeded_catalog();
    let repo = SqliteBookRepository::new(&conn);

    let err = repo.search_books(&BookSearchQuery::default()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidQuery));
}

#[test]
fn empty_string_filters_count_as_absent() {
    let conn = seeded_catalog();
    let repo = SqliteBookRepository::new(&conn);

    let query = BookSearchQuery {
        title: Some(String::new()),
        author: Some(String::new()),
        year: None,
    };
    let err = repo.search_books(&query).unwrap_err();
    assert!(matches!(err, RepoError::InvalidQuery));
}

#[test]
fn title_filter_matches_substring() {
    let conn = seeded_catalog();
    let repo = SqliteBookRepository::new(&conn);

    let query = BookSearchQuery {
        title: Some("War".to_string()),
        ..BookSearchQuery::default()
    };
    let hits = repo.search_books(&query).unwrap();

    let titles: Vec<&str> = hits.iter().map(|book| book.title.as_str()).collect();
    assert_eq!(titles, vec!["War and Peace", "Warehouse Logistics"]);
}

#[test]
fn title_filter_is_case_sensitive() {
    let conn = seeded_catalog();
    let repo = SqliteBookRepository::new(&conn);

    let query = BookSearchQuery {
        title: Some("war".to_string()),
        ..BookSearchQuery::default()
    };
    assert!(repo.search_books(&query).unwrap().is_empty());
}

#[test]
fn provided_filters_combine_with_and() {
    let conn = seeded_catalog();
    let repo = SqliteBookRepository::new(&conn);

    // The author filter narrows the "War" prefix down to Tolstoy.
    let query = BookSearchQuery {
        title: Some("War".to_string()),
        author: Some("Tolstoy".to_string()),
        year: None,
    };
    let hits = repo.search_books(&query).unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "War and Peace");
}

#[test]
fn author_filter_matches_substring() {
    let conn = seeded_catalog();
    let repo = SqliteBookRepository::new(&conn);

    let query = BookSearchQuery {
        author: Some("Orwell".to_string()),
        ..BookSearchQuery::default()
    };
    let hits = repo.search_books(&query).unwrap();

    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|book| book.author == "George Orwell"));
}

#[test]
fn year_filter_is_exact_match() {
    let conn = seeded_catalog();
    let repo = SqliteBookRepository::new(&conn);

    let exact = BookSearchQuery {
        year: Some(1949),
        ..BookSearchQuery::default()
    };
    let hits = repo.search_books(&exact).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "1984");

    // A numeric prefix of a stored year is not a match.
    let prefix = BookSearchQuery {
        year: Some(194),
        ..BookSearchQuery::default()
    };
    assert!(repo.search_books(&prefix).unwrap().is_empty());
}

#[test]
fn all_three_filters_can_be_combined() {
    let conn = seeded_catalog();
    let repo = SqliteBookRepository::new(&conn);

    let query = BookSearchQuery {
        title: Some("Farm".to_string()),
        author: Some("George".to_string()),
        year: Some(1945),
    };
    let hits = repo.search_books(&query).unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Animal Farm");
}

#[test]
fn unmatched_search_returns_empty_vec() {
    let conn = seeded_catalog();
    let repo = SqliteBookRepository::new(&conn);

    let query = BookSearchQuery {
        title: Some("Solaris".to_string()),
        ..BookSearchQuery::default()
    };
    assert!(repo.search_books(&query).unwrap().is_empty());
}

#[test]
fn has_criteria_reflects_usable_filters() {
    assert!(!BookSearchQuery::default().has_criteria());

    let blank_strings = BookSearchQuery {
        title: Some(String::new()),
        author: Some(String::new()),
        year: None,
    };
    assert!(!blank_strings.has_criteria());

    let year_only = BookSearchQuery {
        year: Some(1949),
        ..BookSearchQuery::default()
    };
    assert!(year_only.has_criteria());
}
