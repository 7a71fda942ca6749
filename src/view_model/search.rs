//! Local search over the loaded collection

use crate::models::Book;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult<'a> {
    /// Nothing has been loaded, so there is nothing to search yet
    NotLoaded,
    Matches(Vec<&'a Book>),
}

impl SearchResult<'_> {
    pub fn is_not_loaded(&self) -> bool {
        matches!(self, SearchResult::NotLoaded)
    }

    pub fn len(&self) -> usize {
        match self {
            SearchResult::NotLoaded => 0,
            SearchResult::Matches(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Title and authors match case-insensitively, the ISBN exactly as typed
pub fn matches(book: &Book, query: &str) -> bool {
    let needle = query.to_lowercase();
    book.title.to_lowercase().contains(&needle)
        || book
            .authors
            .iter()
            .any(|a| a.to_lowercase().contains(&needle))
        || book.isbn.contains(query)
}

pub fn search<'a>(books: &'a [Book], query: &str) -> SearchResult<'a> {
    if books.is_empty() {
        return SearchResult::NotLoaded;
    }
    SearchResult::Matches(books.iter().filter(|b| matches(b, query)).collect())
}
