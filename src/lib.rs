// Library Catalog - Core Library
// Exposes the store, aggregation and export layers for the CLI, API server, and tests

pub mod book;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod filter;
pub mod logging;
pub mod stats;

// Only compile the HTTP layer when the server feature is enabled
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use book::{parse_date, Book, Genre, NewBook, DATE_FORMAT};
pub use config::Config;
pub use db::BookStore;
pub use error::{CatalogError, CatalogResult};
pub use export::{
    from_csv, import_csv, to_csv, to_csv_bytes, write_csv, write_csv_to, CSV_HEADER,
    EXPORT_FILE_NAME, EXPORT_MIME_TYPE,
};
pub use filter::{filter_books, genre_options, GenreFilter, ALL_OPTION};
pub use logging::init_logging;
pub use stats::{count_by_genre, summary, GenreCount, GenreCounts, Summary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
