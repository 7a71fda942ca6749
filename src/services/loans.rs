//! Loan management service

use std::sync::Arc;

use crate::{
    api::BooksApi,
    error::{AppError, AppResult},
    models::{Book, BorrowAction},
};

use super::{refresh_collection, require_isbn, Mutation, RefreshOutcome, SharedViewModel};

#[derive(Clone)]
pub struct LoansService {
    api: Arc<dyn BooksApi>,
    view: SharedViewModel,
}

impl LoansService {
    pub fn new(api: Arc<dyn BooksApi>, view: SharedViewModel) -> Self {
        Self { api, view }
    }

    /// Borrow a book. The server refuses books that are already out.
    pub async fn borrow(&self, isbn: &str) -> AppResult<Mutation<Book>> {
        self.send(isbn, BorrowAction::Borrow).await
    }

    /// Return a borrowed book
    pub async fn return_book(&self, isbn: &str) -> AppResult<Mutation<Book>> {
        self.send(isbn, BorrowAction::Return).await
    }

    /// Borrow or return depending on the loaded state of the book
    pub async fn toggle(&self, isbn: &str) -> AppResult<Mutation<Book>> {
        let isbn = require_isbn(isbn)?;
        let action = {
            let vm = self.view.read().await;
            let book = vm
                .find(isbn)
                .ok_or_else(|| AppError::NotFound(format!("Book with ISBN {} is not loaded", isbn)))?;
            BorrowAction::toggling(book.is_borrowed)
        };
        self.send(isbn, action).await
    }

    async fn send(&self, isbn: &str, action: BorrowAction) -> AppResult<Mutation<Book>> {
        let isbn = require_isbn(isbn)?;
        let book = self.api.borrow(isbn, action).await?;
        tracing::info!("Book {} ({}): {}", book.title, book.isbn, action);

        let refresh = RefreshOutcome::from(refresh_collection(self.api.as_ref(), &self.view).await);
        Ok(Mutation {
            value: book,
            refresh,
        })
    }
}
