//! List view-model: the loaded collection plus the filter and page cursor
//! the user is looking at.
//!
//! Everything here is synchronous and side-effect free apart from the state
//! held in [`ListViewModel`]; network access lives in the services.

pub mod filter;
pub mod pagination;
pub mod search;
pub mod summary;

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::Book;

pub use filter::{filter, FilterKind};
pub use pagination::{paginate, total_pages, Page};
pub use search::{search, SearchResult};
pub use summary::{summarize, Summary};

const DEFAULT_PAGE_SIZE: usize = 15;

/// Handed out when a list fetch starts; only the latest one may be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { count: usize },
    /// A newer fetch was started after this one; its response was dropped
    Stale { ticket: u64, latest: u64 },
}

/// What the presentation layer renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView<'a> {
    pub items: Vec<&'a Book>,
    pub filter: FilterKind,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Books matching the active filter across all pages
    pub matching: usize,
    pub summary: Summary,
}

impl ListView<'_> {
    /// The "no books found" state: nothing matches the active filter
    pub fn is_empty(&self) -> bool {
        self.matching == 0
    }
}

#[derive(Debug, Clone)]
pub struct ListViewModel {
    collection: Vec<Book>,
    active_filter: FilterKind,
    current_page: usize,
    page_size: NonZeroUsize,
    last_issued: u64,
}

impl Default for ListViewModel {
    fn default() -> Self {
        Self {
            collection: Vec::new(),
            active_filter: FilterKind::All,
            current_page: 1,
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            last_issued: 0,
        }
    }
}

impl ListViewModel {
    pub fn new(page_size: NonZeroUsize, active_filter: FilterKind) -> Self {
        Self {
            page_size,
            active_filter,
            ..Default::default()
        }
    }

    pub fn collection(&self) -> &[Book] {
        &self.collection
    }

    pub fn active_filter(&self) -> FilterKind {
        self.active_filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn find(&self, isbn: &str) -> Option<&Book> {
        self.collection.iter().find(|b| b.isbn == isbn)
    }

    /// Books matching the active filter
    pub fn filtered(&self) -> Vec<&Book> {
        filter(&self.collection, self.active_filter)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.collection)
    }

    pub fn search(&self, query: &str) -> SearchResult<'_> {
        search(&self.collection, query)
    }

    pub fn set_filter(&mut self, kind: FilterKind) {
        self.active_filter = kind;
        self.current_page = 1;
    }

    pub fn set_page_size(&mut self, size: usize) -> AppResult<()> {
        let size = NonZeroUsize::new(size)
            .ok_or_else(|| AppError::Validation("Page size must be at least 1".to_string()))?;
        self.page_size = size;
        self.current_page = 1;
        Ok(())
    }

    /// Move to `page`, clamped into `[1, total_pages]`. Returns the page landed on.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.current_page = page.clamp(1, self.total_pages());
        self.current_page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.current_page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    pub fn view(&self) -> ListView<'_> {
        let subset = self.filtered();
        let page = paginate(&subset, self.current_page, self.page_size);

        ListView {
            items: page.items.to_vec(),
            filter: self.active_filter,
            page: self.current_page,
            page_size: self.page_size.get(),
            total_pages: page.total_pages,
            matching: subset.len(),
            summary: self.summary(),
        }
    }

    /// Start a list fetch. Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_issued += 1;
        FetchTicket(self.last_issued)
    }

    /// Sequence number of the most recently started fetch
    pub fn latest_fetch(&self) -> u64 {
        self.last_issued
    }

    /// Whether no fetch was started after `ticket`
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.last_issued
    }

    /// Replace the collection with a fetched list, unless a newer fetch was
    /// started since `ticket` was issued.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, books: Vec<Book>) -> FetchOutcome {
        if !self.is_current(ticket) {
            tracing::warn!(
                "Dropping stale book list (fetch #{}, latest #{})",
                ticket.0,
                self.last_issued
            );
            return FetchOutcome::Stale {
                ticket: ticket.0,
                latest: self.last_issued,
            };
        }

        let count = books.len();
        self.collection = books;
        self.current_page = self.current_page.clamp(1, self.total_pages());
        tracing::debug!("Applied book list #{} ({} books)", ticket.0, count);
        FetchOutcome::Applied { count }
    }
}
