//! Per-category counts

use serde::Serialize;

use super::filter::FilterKind;
use crate::models::Book;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub available: usize,
    pub borrowed: usize,
    pub physical: usize,
    pub digital: usize,
    pub audio: usize,
}

impl Summary {
    pub fn count(&self, kind: FilterKind) -> usize {
        match kind {
            FilterKind::All => self.total,
            FilterKind::Available => self.available,
            FilterKind::Borrowed => self.borrowed,
            FilterKind::Physical => self.physical,
            FilterKind::Digital => self.digital,
            FilterKind::Audio => self.audio,
        }
    }
}

/// Recomputed from scratch on every call, using the filter predicates
pub fn summarize(books: &[Book]) -> Summary {
    books.iter().fold(
        Summary {
            total: books.len(),
            ..Default::default()
        },
        |mut s, book| {
            s.available += FilterKind::Available.matches(book) as usize;
            s.borrowed += FilterKind::Borrowed.matches(book) as usize;
            s.physical += FilterKind::Physical.matches(book) as usize;
            s.digital += FilterKind::Digital.matches(book) as usize;
            s.audio += FilterKind::Audio.matches(book) as usize;
            s
        },
    )
}
