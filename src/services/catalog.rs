//! Catalog management service

use std::sync::Arc;

use validator::Validate;

use crate::{
    api::BooksApi,
    error::{AppError, AppResult},
    models::{Book, BookUpdate, ConnectionStatus, ManualBook, NewBookByIsbn},
    view_model::{FetchOutcome, FilterKind, SearchResult},
};

use super::{refresh_collection, require_isbn, Mutation, RefreshOutcome, SharedViewModel};

/// Owned result of a local search
#[derive(Debug, Clone, PartialEq)]
pub enum LocalSearch {
    /// The collection is empty; the caller should offer to (re)load it
    NotLoaded,
    Matches(Vec<Book>),
}

#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn BooksApi>,
    view: SharedViewModel,
}

impl CatalogService {
    pub fn new(api: Arc<dyn BooksApi>, view: SharedViewModel) -> Self {
        Self { api, view }
    }

    /// The view-model this service keeps in sync
    pub fn view_model(&self) -> &SharedViewModel {
        &self.view
    }

    /// Re-fetch the whole collection
    pub async fn refresh(&self) -> AppResult<FetchOutcome> {
        refresh_collection(self.api.as_ref(), &self.view).await
    }

    async fn refresh_after_mutation(&self) -> RefreshOutcome {
        RefreshOutcome::from(self.refresh().await)
    }

    /// Ask the server for one book. A 404 comes back as `AppError::NotFound`,
    /// anything else keeps the server's message.
    pub async fn lookup(&self, isbn: &str) -> AppResult<Book> {
        let isbn = require_isbn(isbn)?;
        let book = self.api.get_book(isbn).await?;
        tracing::info!("Found book: {}", book.title);
        Ok(book)
    }

    /// Add a book by ISBN, letting the server fill in the bibliographic data
    pub async fn add_by_isbn(&self, request: NewBookByIsbn) -> AppResult<Mutation<Book>> {
        request.validate()?;
        let created = self.api.add_by_isbn(&request).await?;
        tracing::info!("Successfully added book: {}", created.title);

        Ok(Mutation {
            value: created,
            refresh: self.refresh_after_mutation().await,
        })
    }

    /// Add a book with user-supplied bibliographic data
    pub async fn add_manual(&self, request: ManualBook) -> AppResult<Mutation<Book>> {
        request.validate()?;
        let created = self.api.add_manual(&request).await?;
        tracing::info!("Successfully added manual book: {}", created.title);

        Ok(Mutation {
            value: created,
            refresh: self.refresh_after_mutation().await,
        })
    }

    pub async fn update(&self, isbn: &str, request: BookUpdate) -> AppResult<Mutation<Book>> {
        let isbn = require_isbn(isbn)?;
        let request = request.cleaned();
        request.validate()?;
        let updated = self.api.update_book(isbn, &request).await?;
        tracing::info!("Successfully updated book: {}", updated.title);

        Ok(Mutation {
            value: updated,
            refresh: self.refresh_after_mutation().await,
        })
    }

    /// Delete a book. The collection only changes through the refresh that
    /// follows, like every other mutation.
    pub async fn delete(&self, isbn: &str) -> AppResult<Mutation<()>> {
        let isbn = require_isbn(isbn)?;
        self.api.delete_book(isbn).await?;
        tracing::info!("Successfully deleted book with ISBN: {}", isbn);

        Ok(Mutation {
            value: (),
            refresh: self.refresh_after_mutation().await,
        })
    }

    /// Search the loaded collection. Blank queries are refused.
    pub async fn search(&self, query: &str) -> AppResult<LocalSearch> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("Please enter a search term".to_string()));
        }

        let vm = self.view.read().await;
        Ok(match vm.search(query) {
            SearchResult::NotLoaded => LocalSearch::NotLoaded,
            SearchResult::Matches(found) => {
                LocalSearch::Matches(found.into_iter().cloned().collect())
            }
        })
    }

    /// Online/offline indicator from `GET /health`
    pub async fn connection_status(&self) -> ConnectionStatus {
        match self.api.health().await {
            Ok(health) => ConnectionStatus::Online {
                total_books: health.total_books,
                api_version: health.api_version,
            },
            Err(e) => {
                tracing::warn!("Catalog service unreachable: {}", e);
                ConnectionStatus::Offline {
                    reason: e.user_message(),
                }
            }
        }
    }

    pub async fn set_filter(&self, kind: FilterKind) {
        self.view.write().await.set_filter(kind);
    }

    pub async fn set_page_size(&self, size: usize) -> AppResult<()> {
        self.view.write().await.set_page_size(size)
    }

    pub async fn go_to_page(&self, page: usize) -> usize {
        self.view.write().await.go_to_page(page)
    }

    pub async fn next_page(&self) -> usize {
        self.view.write().await.next_page()
    }

    pub async fn previous_page(&self) -> usize {
        self.view.write().await.previous_page()
    }
}
