//! Catalog operations on top of the REST client and the list view-model

pub mod catalog;
pub mod loans;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    api::BooksApi,
    error::{AppError, AppResult},
    view_model::{FetchOutcome, ListViewModel},
};

/// View-model shared by every service; locks are never held across a request
pub type SharedViewModel = Arc<RwLock<ListViewModel>>;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services around one API client and one view-model
    pub fn new(api: Arc<dyn BooksApi>, view_model: ListViewModel) -> Self {
        let view: SharedViewModel = Arc::new(RwLock::new(view_model));
        Self {
            catalog: catalog::CatalogService::new(api.clone(), view.clone()),
            loans: loans::LoansService::new(api, view),
        }
    }
}

/// State of the list re-fetch that follows a successful mutation
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Applied { count: usize },
    /// A newer fetch superseded this one
    Superseded,
    /// The mutation went through but the list could not be re-fetched; the
    /// previous collection is still displayed
    Failed(AppError),
}

impl From<AppResult<FetchOutcome>> for RefreshOutcome {
    fn from(result: AppResult<FetchOutcome>) -> Self {
        match result {
            Ok(FetchOutcome::Applied { count }) => RefreshOutcome::Applied { count },
            Ok(FetchOutcome::Stale { .. }) => RefreshOutcome::Superseded,
            Err(e) => RefreshOutcome::Failed(e),
        }
    }
}

/// Result of a mutation: the server's answer plus the refresh that followed it
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<T> {
    pub value: T,
    pub refresh: RefreshOutcome,
}

/// Fetch the full list and hand it to the view-model if it is still the
/// latest fetch. A failed fetch leaves the collection untouched.
pub(crate) async fn refresh_collection(
    api: &dyn BooksApi,
    view: &SharedViewModel,
) -> AppResult<FetchOutcome> {
    let ticket = view.write().await.begin_fetch();

    match api.list_books().await {
        Ok(books) => Ok(view.write().await.apply_fetch(ticket, books)),
        Err(e) => {
            let vm = view.read().await;
            if !vm.is_current(ticket) {
                // Someone else's fetch owns the display now
                tracing::debug!("Ignoring failure of superseded fetch #{}", ticket.sequence());
                return Ok(FetchOutcome::Stale {
                    ticket: ticket.sequence(),
                    latest: vm.latest_fetch(),
                });
            }
            tracing::warn!("Failed to load books: {}", e);
            Err(e)
        }
    }
}

/// Blank identifiers are refused before any request goes out
pub(crate) fn require_isbn(isbn: &str) -> AppResult<&str> {
    let isbn = isbn.trim();
    if isbn.is_empty() {
        return Err(AppError::Validation("Please enter an ISBN".to_string()));
    }
    Ok(isbn)
}
