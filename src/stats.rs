// 📊 Aggregation - genre distribution and dashboard counts

use serde::Serialize;
use std::collections::BTreeMap;

use crate::book::{Book, Genre};

/// Genre -> count, holding only genres that actually occur.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreCounts {
    counts: BTreeMap<Genre, usize>,
}

impl GenreCounts {
    pub fn get(&self, genre: Genre) -> usize {
        self.counts.get(&genre).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Entries in canonical genre order.
    pub fn iter(&self) -> impl Iterator<Item = (Genre, usize)> + '_ {
        self.counts.iter().map(|(genre, count)| (*genre, *count))
    }

    /// Entries by count descending, ties in genre order. This is the bar
    /// chart ordering.
    pub fn ranked(&self) -> Vec<GenreCount> {
        let mut entries: Vec<GenreCount> = self
            .iter()
            .map(|(genre, count)| GenreCount { genre, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.genre.cmp(&b.genre)));
        entries
    }

    pub fn as_map(&self) -> &BTreeMap<Genre, usize> {
        &self.counts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: Genre,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub unique_genres: usize,
}

pub fn count_by_genre(books: &[Book]) -> GenreCounts {
    let mut counts = BTreeMap::new();
    for book in books {
        *counts.entry(book.genre).or_insert(0) += 1;
    }
    GenreCounts { counts }
}

pub fn summary(books: &[Book]) -> Summary {
    Summary {
        total: books.len(),
        unique_genres: count_by_genre(books).len(),
    }
}
