// 📖 Book Entity - fixed-shape catalog record
//
// Identity: `id` (UUID) is assigned by the store and never changes.
// Values: title, author, genre, added_on are immutable once stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CatalogError, CatalogResult};

/// Date format used in storage, CSV and the API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// GENRE
// ============================================================================

/// Fixed set of genres a book can be tagged with. Declaration order is the
/// canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-fiction")]
    NonFiction,
    Mystery,
    Fantasy,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Biography,
    History,
    Other,
}

impl Genre {
    pub const ALL: [Genre; 8] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Mystery,
        Genre::Fantasy,
        Genre::SciFi,
        Genre::Biography,
        Genre::History,
        Genre::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-fiction",
            Genre::Mystery => "Mystery",
            Genre::Fantasy => "Fantasy",
            Genre::SciFi => "Sci-Fi",
            Genre::Biography => "Biography",
            Genre::History => "History",
            Genre::Other => "Other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = CatalogError;

    /// Labels match case-insensitively, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Genre::ALL
            .iter()
            .copied()
            .find(|genre| genre.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CatalogError::InvalidGenre(s.to_string()))
    }
}

// ============================================================================
// BOOK
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Stable identity (UUID) - assigned on insert, never reused
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub added_on: NaiveDate,
}

impl Book {
    /// Build a new record with a fresh id. Callers go through
    /// `BookStore::add`, which validates first.
    pub(crate) fn new(title: &str, author: &str, genre: Genre, added_on: NaiveDate) -> Self {
        Book {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            author: author.to_string(),
            genre,
            added_on,
        }
    }

    /// `Title by Author`, the label used in listings.
    pub fn display_title(&self) -> String {
        format!("{} by {}", self.title, self.author)
    }
}

/// A book that has not been stored yet (no id). Produced by CSV import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub added_on: NaiveDate,
}

/// Reject empty or whitespace-only required fields.
pub fn validate_fields(title: &str, author: &str) -> CatalogResult<()> {
    if title.trim().is_empty() {
        return Err(CatalogError::validation("title", "Required field is empty"));
    }
    if author.trim().is_empty() {
        return Err(CatalogError::validation("author", "Required field is empty"));
    }
    Ok(())
}

pub fn parse_date(s: &str) -> CatalogResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| CatalogError::InvalidDate(s.to_string()))
}
