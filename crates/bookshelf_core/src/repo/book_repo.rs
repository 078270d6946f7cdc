//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the catalog's create/search/edit/delete/list operations.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Ids are assigned as max existing id + 1, or 1 on an empty catalog.
//!   Deleting the newest record frees its id for the next insert; lower
//!   freed ids are never handed out again.
//! - Each operation autocommits; durability boundary is the call return.

use crate::db::DbError;
use crate::model::book::{Book, BookId, BookPatch, NewBook};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT id, name, author, year FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Search was invoked without any filter criteria.
    InvalidQuery,
    /// Edit targeted an id that is not in the catalog.
    NotFound(BookId),
    /// Underlying storage fault; callers abort the current action.
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuery => {
                write!(f, "search needs at least one of title, author or year")
            }
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidQuery => None,
            Self::NotFound(_) => None,
            Self::Db(err) => Some(err),
        }
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

/// Filter criteria for searching the catalog.
///
/// Title and author are case-sensitive substring filters; year matches
/// exactly. Provided filters are AND-combined. An empty string counts as
/// "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSearchQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i64>,
}

impl BookSearchQuery {
    /// Returns whether at least one usable filter is present.
    pub fn has_criteria(&self) -> bool {
        filled(self.title.as_deref()).is_some()
            || filled(self.author.as_deref()).is_some()
            || self.year.is_some()
    }
}

fn filled(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// Repository interface for catalog operations.
pub trait BookRepository {
    fn add_book(&self, draft: &NewBook) -> RepoResult<Book>;
    fn search_books(&self, query: &BookSearchQuery) -> RepoResult<Vec<Book>>;
    fn edit_book(&self, id: BookId, patch: &BookPatch) -> RepoResult<Book>;
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
    fn list_books(&self) -> RepoResult<Vec<Book>>;
}

/// SQLite-backed book repository.
///
/// Borrows the connection; the caller owns the handle for the process
/// lifetime and decides when it goes away.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn fetch_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn add_book(&self, draft: &NewBook) -> RepoResult<Book> {
        // Max+1 rather than AUTOINCREMENT: deleting the newest record
        // frees its id for the next insert.
        let max_id: i64 =
            self.conn
                .query_row("SELECT COALESCE(MAX(id), 0) FROM books;", [], |row| {
                    row.get(0)
                })?;
        let id = max_id + 1;

        self.conn.execute(
            "INSERT INTO books (id, name, author, year) VALUES (?1, ?2, ?3, ?4);",
            params![id, draft.title, draft.author, draft.year],
        )?;

        Ok(Book {
            id,
            title: draft.title.clone(),
            author: draft.author.clone(),
            year: draft.year,
        })
    }

    fn search_books(&self, query: &BookSearchQuery) -> RepoResult<Vec<Book>> {
        if !query.has_criteria() {
            return Err(RepoError::InvalidQuery);
        }

        let mut sql = format!("{BOOK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = filled(query.title.as_deref()) {
            sql.push_str(" AND name LIKE ?");
            bind_values.push(Value::Text(format!("%{title}%")));
        }

        if let Some(author) = filled(query.author.as_deref()) {
            sql.push_str(" AND author LIKE ?");
            bind_values.push(Value::Text(format!("%{author}%")));
        }

        if let Some(year) = query.year {
            sql.push_str(" AND year = ?");
            bind_values.push(Value::Integer(year));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn edit_book(&self, id: BookId, patch: &BookPatch) -> RepoResult<Book> {
        let current = self.fetch_book(id)?.ok_or(RepoError::NotFound(id))?;

        let title = patch.title.clone().unwrap_or(current.title);
        let author = patch.author.clone().unwrap_or(current.author);
        let year = patch.year.unwrap_or(current.year);

        // All three mutable columns are rewritten in one statement, even
        // the ones the patch left untouched.
        self.conn.execute(
            "UPDATE books SET name = ?1, author = ?2, year = ?3 WHERE id = ?4;",
            params![title, author, year, id],
        )?;

        Ok(Book {
            id,
            title,
            author,
            year,
        })
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        // Deleting an absent id is a silent no-op, so the affected row
        // count is deliberately ignored.
        self.conn
            .execute("DELETE FROM books WHERE id = ?1;", params![id])?;

        Ok(())
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!("{BOOK_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    Ok(Book {
        id: row.get("id")?,
        title: row.get("name")?,
        author: row.get("author")?,
        year: row.get("year")?,
    })
}
