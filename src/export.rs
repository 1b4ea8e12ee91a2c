// 📤 Export - CSV download of the catalog, and import of the same format

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::info;

use crate::book::{parse_date, validate_fields, Book, NewBook, DATE_FORMAT};
use crate::db::BookStore;
use crate::error::{CatalogError, CatalogResult};

pub const EXPORT_FILE_NAME: &str = "library_collection.csv";
pub const EXPORT_MIME_TYPE: &str = "text/csv";
pub const CSV_HEADER: [&str; 4] = ["Title", "Author", "Genre", "Added On"];

/// One CSV row. Field names double as the header labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Title")]
    title: String,

    #[serde(rename = "Author")]
    author: String,

    #[serde(rename = "Genre")]
    genre: String,

    #[serde(rename = "Added On")]
    added_on: String,
}

impl From<&Book> for CsvRecord {
    fn from(book: &Book) -> Self {
        CsvRecord {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.to_string(),
            added_on: book.added_on.format(DATE_FORMAT).to_string(),
        }
    }
}

impl CsvRecord {
    fn into_new_book(self) -> CatalogResult<NewBook> {
        validate_fields(&self.title, &self.author)?;
        Ok(NewBook {
            genre: self.genre.parse()?,
            added_on: parse_date(&self.added_on)?,
            title: self.title,
            author: self.author,
        })
    }
}

// ============================================================================
// EXPORT
// ============================================================================

/// Write the CSV document (header always present) to any writer.
pub fn write_csv_to<W: Write>(books: &[Book], writer: W) -> CatalogResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for book in books {
        wtr.serialize(CsvRecord::from(book))?;
    }
    wtr.flush()?;

    Ok(())
}

pub fn to_csv_bytes(books: &[Book]) -> CatalogResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv_to(books, &mut buf)?;
    Ok(buf)
}

pub fn to_csv(books: &[Book]) -> CatalogResult<String> {
    let bytes = to_csv_bytes(books)?;
    String::from_utf8(bytes)
        .map_err(|e| CatalogError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

pub fn write_csv(books: &[Book], path: &Path) -> CatalogResult<()> {
    let file = File::create(path)?;
    write_csv_to(books, file)?;
    info!(path = %path.display(), count = books.len(), "exported books to CSV");
    Ok(())
}

// ============================================================================
// IMPORT
// ============================================================================

/// Parse an exported document. Every row is checked before anything is
/// returned; the first bad row aborts with its 1-based row number.
pub fn from_csv<R: Read>(reader: R) -> CatalogResult<Vec<NewBook>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let mut rows = Vec::new();
    for (index, result) in rdr.deserialize::<CsvRecord>().enumerate() {
        let row = index + 1;
        let new_book = result
            .map_err(CatalogError::from)
            .and_then(CsvRecord::into_new_book)
            .map_err(|source| CatalogError::Import {
                row,
                source: Box::new(source),
            })?;
        rows.push(new_book);
    }

    Ok(rows)
}

/// Load a CSV file into the store in a single transaction.
pub fn import_csv(store: &BookStore, path: &Path) -> CatalogResult<Vec<Book>> {
    let file = File::open(path)?;
    let rows = from_csv(file)?;
    let added = store.add_batch(&rows)?;

    info!(path = %path.display(), count = added.len(), "imported books from CSV");
    Ok(added)
}
