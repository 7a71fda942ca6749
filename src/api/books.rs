//! Book catalog endpoints

use crate::{
    error::AppResult,
    models::{Book, BookUpdate, ManualBook, NewBookByIsbn},
};

use super::{decode, expect_empty, HttpBooksApi};

/// `GET /books`: the whole collection, in server order
pub async fn list_books(api: &HttpBooksApi) -> AppResult<Vec<Book>> {
    let url = api.endpoint(&["books"]);
    tracing::debug!("GET {}", url);

    let response = api.client().get(url).send().await?;
    let books: Vec<Book> = decode(response).await?;

    tracing::info!("Fetched {} books", books.len());
    Ok(books)
}

/// `GET /books/{isbn}`
pub async fn get_book(api: &HttpBooksApi, isbn: &str) -> AppResult<Book> {
    let url = api.endpoint(&["books", isbn]);
    tracing::debug!("GET {}", url);

    let response = api.client().get(url).send().await?;
    decode(response).await
}

/// `POST /books`: the server fills in title and authors from the ISBN
pub async fn add_by_isbn(api: &HttpBooksApi, request: &NewBookByIsbn) -> AppResult<Book> {
    let url = api.endpoint(&["books"]);
    tracing::info!("Adding book by ISBN {} ({})", request.isbn, request.format.tag());

    let response = api.client().post(url).json(request).send().await?;
    decode(response).await
}

/// `POST /books/manual`
pub async fn add_manual(api: &HttpBooksApi, request: &ManualBook) -> AppResult<Book> {
    let url = api.endpoint(&["books", "manual"]);
    tracing::info!(
        "Adding manual book: {} by {}",
        request.title,
        request.authors.join(", ")
    );

    let response = api.client().post(url).json(request).send().await?;
    decode(response).await
}

/// `PUT /books/{isbn}`
pub async fn update_book(api: &HttpBooksApi, isbn: &str, request: &BookUpdate) -> AppResult<Book> {
    let url = api.endpoint(&["books", isbn]);
    tracing::info!("Updating book {}", isbn);

    let response = api.client().put(url).json(request).send().await?;
    decode(response).await
}

/// `DELETE /books/{isbn}`: answers 204 with no body
pub async fn delete_book(api: &HttpBooksApi, isbn: &str) -> AppResult<()> {
    let url = api.endpoint(&["books", isbn]);
    tracing::info!("Deleting book {}", isbn);

    let response = api.client().delete(url).send().await?;
    expect_empty(response).await
}
