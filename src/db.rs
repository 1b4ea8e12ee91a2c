// 🗄️ Record Store - SQLite persistence for book records
//
// The store exclusively owns the connection. Callers receive owned `Book`
// copies, never a handle into the table.

use chrono::{Local, NaiveDate};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::book::{parse_date, validate_fields, Book, Genre, NewBook, DATE_FORMAT};
use crate::error::{CatalogError, CatalogResult};

pub struct BookStore {
    conn: Connection,
}

impl BookStore {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn open(path: &Path) -> CatalogResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        setup_database(&conn)?;
        info!(path = %path.display(), "opened book store");

        Ok(BookStore { conn })
    }

    pub fn open_in_memory() -> CatalogResult<Self> {
        let conn = Connection::open_in_memory()?;
        setup_database(&conn)?;
        Ok(BookStore { conn })
    }

    /// Add a book dated today (local time).
    pub fn add(&self, title: &str, author: &str, genre: Genre) -> CatalogResult<Book> {
        self.add_on(title, author, genre, Local::now().date_naive())
    }

    /// Add a book with an explicit `added_on` date. Validation runs before
    /// any write, so a rejected book leaves the table untouched.
    pub fn add_on(
        &self,
        title: &str,
        author: &str,
        genre: Genre,
        added_on: NaiveDate,
    ) -> CatalogResult<Book> {
        validate_fields(title, author)?;

        let book = Book::new(title, author, genre, added_on);
        insert_book(&self.conn, &book)?;

        info!(id = %book.id, title = %book.title, genre = %book.genre, "book added");
        Ok(book)
    }

    /// Insert several books in one transaction: either all land or none do.
    pub fn add_batch(&self, new_books: &[NewBook]) -> CatalogResult<Vec<Book>> {
        for new_book in new_books {
            validate_fields(&new_book.title, &new_book.author)?;
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut added = Vec::with_capacity(new_books.len());
        for new_book in new_books {
            let book = Book::new(
                &new_book.title,
                &new_book.author,
                new_book.genre,
                new_book.added_on,
            );
            insert_book(&tx, &book)?;
            added.push(book);
        }
        tx.commit()?;

        info!(count = added.len(), "batch of books added");
        Ok(added)
    }

    /// All live records in insertion order.
    pub fn list_all(&self) -> CatalogResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, author, genre, added_on
             FROM books
             ORDER BY seq",
        )?;

        let books = stmt
            .query_map([], book_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = books.len(), "listed books");
        Ok(books)
    }

    pub fn get(&self, id: &str) -> CatalogResult<Option<Book>> {
        let book = self
            .conn
            .query_row(
                "SELECT id, title, author, genre, added_on FROM books WHERE id = ?1",
                [id],
                book_from_row,
            )
            .optional()?;

        Ok(book)
    }

    /// Remove a record. Unknown ids yield `NotFound` and change nothing.
    pub fn delete(&self, id: &str) -> CatalogResult<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1", [id])?;

        if deleted == 0 {
            return Err(CatalogError::NotFound { id: id.to_string() });
        }

        info!(id = %id, "book deleted");
        Ok(())
    }

    pub fn count(&self) -> CatalogResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;

        Ok(count as usize)
    }
}

fn setup_database(conn: &Connection) -> CatalogResult<()> {
    // WAL keeps single-statement writes crash safe
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // `seq` carries insertion order; `id` is the public identity
    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT UNIQUE NOT NULL,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            genre TEXT NOT NULL,
            added_on TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_books_genre ON books(genre)",
        [],
    )?;

    Ok(())
}

fn insert_book(conn: &Connection, book: &Book) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO books (id, title, author, genre, added_on)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            book.id,
            book.title,
            book.author,
            book.genre.as_str(),
            book.added_on.format(DATE_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    let genre_str: String = row.get(3)?;
    let added_on_str: String = row.get(4)?;

    let genre = genre_str
        .parse::<Genre>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    let added_on = parse_date(&added_on_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        genre,
        added_on,
    })
}
