//! Borrow/return endpoint

use crate::{
    error::AppResult,
    models::{Book, BorrowAction, BorrowRequest},
};

use super::{decode, HttpBooksApi};

/// `POST /books/{isbn}/borrow`.
///
/// The server owns the precondition: borrowing a lent book or returning one
/// on the shelf comes back as a 400 with a `detail` message.
pub async fn borrow(api: &HttpBooksApi, isbn: &str, action: BorrowAction) -> AppResult<Book> {
    let url = api.endpoint(&["books", isbn, "borrow"]);
    tracing::info!("Book {} request for ISBN {}", action, isbn);

    let response = api
        .client()
        .post(url)
        .json(&BorrowRequest { action })
        .send()
        .await?;
    decode(response).await
}
