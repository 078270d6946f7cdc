//! Interactive menu front end for the catalog.
//!
//! # Responsibility
//! - Collect raw field values from the user and validate their shape.
//! - Call one store operation per action and render the returned records.
//!
//! # Invariants
//! - Non-numeric ids and years never reach the store.
//! - A failed action aborts itself; the menu loop keeps running.

use bookshelf_core::{
    default_log_level, init_logging, open_db, Book, BookPatch, BookRepository, BookSearchQuery,
    NewBook, RepoError, SqliteBookRepository,
};
use dialoguer::Input;
use log::error;

/// The catalog lives in a single local file in the working directory.
const DB_FILE: &str = "bookshelf.db";
const LOG_DIR: &str = "logs";

const MENU: &str = "--------------------------------\n\
    1 - add a book\n\
    2 - search books\n\
    3 - delete a book\n\
    4 - edit a book\n\
    5 - list all books\n\
    0 - exit";

fn main() {
    // Logging is best-effort; a broken log directory must not block the
    // catalog itself.
    if let Ok(cwd) = std::env::current_dir() {
        if let Err(err) = init_logging(default_log_level(), cwd.join(LOG_DIR)) {
            eprintln!("Logging unavailable: {err}");
        }
    }

    let conn = match open_db(DB_FILE) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("Failed to open the catalog database: {err}");
            std::process::exit(1);
        }
    };
    let repo = SqliteBookRepository::new(&conn);

    if let Err(err) = run_menu(&repo) {
        eprintln!("Failed to read input: {err}");
        std::process::exit(1);
    }
}

fn run_menu(repo: &dyn BookRepository) -> dialoguer::Result<()> {
    loop {
        println!("{MENU}");
        let choice = prompt_action()?;
        println!("--------------------------------");

        match choice {
            0 => {
                println!("Goodbye");
                std::process::exit(1);
            }
            1 => add_book(repo)?,
            2 => search_books(repo)?,
            3 => delete_book(repo)?,
            4 => edit_book(repo)?,
            5 => list_books(repo),
            _ => unreachable!("prompt_action only returns menu choices"),
        }
    }
}

fn prompt_action() -> dialoguer::Result<u8> {
    loop {
        let raw: String = Input::new().with_prompt("Choose an action").interact_text()?;

        match raw.trim().parse::<u8>() {
            Ok(choice) if choice <= 5 => return Ok(choice),
            Ok(_) => println!("That choice is not on the menu"),
            Err(_) => println!("Please enter a digit"),
        }
    }
}

fn prompt_field(label: &str) -> dialoguer::Result<String> {
    Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
}

/// Asks for the three book fields; empty answers stay empty.
fn prompt_book_fields() -> dialoguer::Result<(String, String, String)> {
    let title = prompt_field("Title")?;
    let author = prompt_field("Author")?;
    let year = prompt_field("Publication year")?;
    Ok((title, author, year))
}

fn add_book(repo: &dyn BookRepository) -> dialoguer::Result<()> {
    let (title, author, year) = prompt_book_fields()?;

    let Some(year) = parse_year(&year) else {
        println!("That input doesn't look right");
        return Ok(());
    };
    if title.is_empty() || author.is_empty() {
        println!("That input doesn't look right");
        return Ok(());
    }

    match repo.add_book(&NewBook::new(title, author, year)) {
        Ok(book) => println!("Added to the catalog with ID {}", book.id),
        Err(err) => report_failure("add", &err),
    }
    Ok(())
}

fn search_books(repo: &dyn BookRepository) -> dialoguer::Result<()> {
    println!("Enter what you know about the book; leave unknown fields empty");
    let (title, author, year) = prompt_book_fields()?;

    let year = match year.as_str() {
        "" => None,
        raw => match parse_year(raw) {
            Some(year) => Some(year),
            None => {
                println!("That input doesn't look right");
                return Ok(());
            }
        },
    };

    let query = BookSearchQuery {
        title: Some(title),
        author: Some(author),
        year,
    };

    match repo.search_books(&query) {
        Ok(books) if books.is_empty() => println!("Nothing matched"),
        Ok(books) => show_books(&books),
        Err(RepoError::InvalidQuery) => println!("Please provide at least one field"),
        Err(err) => report_failure("search", &err),
    }
    Ok(())
}

fn delete_book(repo: &dyn BookRepository) -> dialoguer::Result<()> {
    let Some(id) = prompt_id()? else {
        return Ok(());
    };

    match repo.delete_book(id) {
        Ok(()) => println!("If that book existed, it is gone now"),
        Err(err) => report_failure("delete", &err),
    }
    Ok(())
}

fn edit_book(repo: &dyn BookRepository) -> dialoguer::Result<()> {
    let Some(id) = prompt_id()? else {
        return Ok(());
    };

    println!("Enter new values; leave a field empty to keep the current one");
    let (title, author, year) = prompt_book_fields()?;

    let year = match year.as_str() {
        "" => None,
        raw => match parse_year(raw) {
            Some(year) => Some(year),
            None => {
                println!("That input doesn't look right");
                return Ok(());
            }
        },
    };

    let patch = BookPatch {
        title: (!title.is_empty()).then_some(title),
        author: (!author.is_empty()).then_some(author),
        year,
    };
    if patch.is_empty() {
        println!("Please provide at least one field to change");
        return Ok(());
    }

    match repo.edit_book(id, &patch) {
        Ok(book) => show_books(std::slice::from_ref(&book)),
        Err(RepoError::NotFound(_)) => println!("No book with that ID in the catalog"),
        Err(err) => report_failure("edit", &err),
    }
    Ok(())
}

fn list_books(repo: &dyn BookRepository) {
    match repo.list_books() {
        Ok(books) if books.is_empty() => println!("The catalog is empty"),
        Ok(books) => show_books(&books),
        Err(err) => report_failure("list", &err),
    }
}

fn prompt_id() -> dialoguer::Result<Option<i64>> {
    let raw: String = Input::new()
        .with_prompt("Numeric book ID")
        .interact_text()?;

    match raw.trim().parse::<i64>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("That input doesn't look right");
            Ok(None)
        }
    }
}

fn parse_year(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|year| *year >= 0)
}

fn show_books(books: &[Book]) {
    for book in books {
        println!("--------------------------");
        println!("ID: {}", book.id);
        println!("Title: {}", book.title);
        println!("Author: {}", book.author);
        println!("Year: {}", book.year);
    }
}

fn report_failure(action: &str, err: &RepoError) {
    error!("event=action module=cli action={action} status=error error={err}");
    println!("The catalog storage failed; the action was aborted");
}
