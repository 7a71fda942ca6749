//! REST client for the catalog service endpoints

pub mod books;
pub mod health;
pub mod loans;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult},
    models::{Book, BookUpdate, BorrowAction, HealthStatus, ManualBook, NewBookByIsbn},
};

/// Operations the catalog service offers.
///
/// Every mutation returns the server's view of the book; callers re-fetch the
/// list afterwards rather than patching local state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksApi: Send + Sync {
    async fn list_books(&self) -> AppResult<Vec<Book>>;
    async fn get_book(&self, isbn: &str) -> AppResult<Book>;
    async fn add_by_isbn(&self, request: &NewBookByIsbn) -> AppResult<Book>;
    async fn add_manual(&self, request: &ManualBook) -> AppResult<Book>;
    async fn update_book(&self, isbn: &str, request: &BookUpdate) -> AppResult<Book>;
    async fn delete_book(&self, isbn: &str) -> AppResult<()>;
    async fn borrow(&self, isbn: &str, action: BorrowAction) -> AppResult<Book>;
    async fn health(&self) -> AppResult<HealthStatus>;
}

/// Error body the service sends with non-2xx responses.
/// `detail` is usually a string; request validation failures send a list.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// [`BooksApi`] over HTTP
#[derive(Clone)]
pub struct HttpBooksApi {
    client: Client,
    base_url: Url,
}

impl HttpBooksApi {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::Config(format!("Invalid API base URL {}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "API base URL cannot be a base: {}",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

/// Turn a response into `T`, or into the error its status and body describe
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(error_from_body(status, &body));
    }
    Ok(serde_json::from_slice(&body)?)
}

/// Like [`decode`] for endpoints that answer with an empty body
pub(crate) async fn expect_empty(response: Response) -> AppResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.bytes().await?;
    Err(error_from_body(status, &body))
}

fn error_from_body(status: StatusCode, body: &[u8]) -> AppError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| match b.detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
    tracing::debug!("Catalog service answered {}: {:?}", status, detail);
    AppError::from_status(status, detail)
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        books::list_books(self).await
    }

    async fn get_book(&self, isbn: &str) -> AppResult<Book> {
        books::get_book(self, isbn).await
    }

    async fn add_by_isbn(&self, request: &NewBookByIsbn) -> AppResult<Book> {
        books::add_by_isbn(self, request).await
    }

    async fn add_manual(&self, request: &ManualBook) -> AppResult<Book> {
        books::add_manual(self, request).await
    }

    async fn update_book(&self, isbn: &str, request: &BookUpdate) -> AppResult<Book> {
        books::update_book(self, isbn, request).await
    }

    async fn delete_book(&self, isbn: &str) -> AppResult<()> {
        books::delete_book(self, isbn).await
    }

    async fn borrow(&self, isbn: &str, action: BorrowAction) -> AppResult<Book> {
        loans::borrow(self, isbn, action).await
    }

    async fn health(&self) -> AppResult<HealthStatus> {
        health::health_check(self).await
    }
}
