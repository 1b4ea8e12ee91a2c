// 🔎 Genre Filter - "All" plus exact genre match over a fetched list

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::book::{Book, Genre};
use crate::error::CatalogError;

pub const ALL_OPTION: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Only(Genre),
}

impl GenreFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Only(genre) => book.genre == *genre,
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => f.write_str(ALL_OPTION),
            GenreFilter::Only(genre) => write!(f, "{genre}"),
        }
    }
}

impl FromStr for GenreFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_OPTION) {
            Ok(GenreFilter::All)
        } else {
            s.parse().map(GenreFilter::Only)
        }
    }
}

/// Books matching `filter`, order preserved.
pub fn filter_books(books: &[Book], filter: GenreFilter) -> Vec<Book> {
    books
        .iter()
        .filter(|book| filter.matches(book))
        .cloned()
        .collect()
}

/// Selector options: "All" followed by the genres present in `books`.
pub fn genre_options(books: &[Book]) -> Vec<String> {
    let observed: BTreeSet<Genre> = books.iter().map(|book| book.genre).collect();

    std::iter::once(ALL_OPTION.to_string())
        .chain(observed.into_iter().map(|genre| genre.to_string()))
        .collect()
}
