//! HTTP client integration tests against an in-process catalog stub

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use catalog_client::{
    api::{BooksApi, HttpBooksApi},
    config::ApiConfig,
    models::{BookFormat, BookUpdate, BorrowAction, FileFormat, ManualBook, NewBookByIsbn},
    services::{RefreshOutcome, Services},
    view_model::{FilterKind, ListViewModel},
    AppError,
};

type Shelf = Arc<Mutex<Vec<Value>>>;

fn detail(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

async fn list_books(State(shelf): State<Shelf>) -> Json<Value> {
    Json(Value::Array(shelf.lock().unwrap().clone()))
}

async fn get_book(State(shelf): State<Shelf>, Path(isbn): Path<String>) -> Response {
    match isbn.as_str() {
        "broken" => {
            return detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred while retrieving the book".into(),
            )
        }
        "garbled" => return (StatusCode::OK, "<html>definitely not json</html>").into_response(),
        _ => {}
    }

    let shelf = shelf.lock().unwrap();
    match shelf.iter().find(|b| b["isbn"] == isbn.as_str()) {
        Some(book) => Json(book.clone()).into_response(),
        None => detail(StatusCode::NOT_FOUND, format!("Book with ISBN {} not found", isbn)),
    }
}

async fn add_by_isbn(State(shelf): State<Shelf>, Json(mut body): Json<Value>) -> Response {
    let mut shelf = shelf.lock().unwrap();
    let isbn = body["isbn"].as_str().unwrap_or_default().to_string();
    if shelf.iter().any(|b| b["isbn"] == isbn.as_str()) {
        return detail(
            StatusCode::BAD_REQUEST,
            format!("Book with ISBN {} already exists", isbn),
        );
    }

    body["title"] = json!("Fetched Title");
    body["authors"] = json!(["Fetched Author"]);
    body["is_borrowed"] = json!(false);
    shelf.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn add_manual(State(shelf): State<Shelf>, Json(mut body): Json<Value>) -> Response {
    body["is_borrowed"] = json!(false);
    shelf.lock().unwrap().push(body.clone());
    Json(body).into_response()
}

async fn update_book(
    State(shelf): State<Shelf>,
    Path(isbn): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut shelf = shelf.lock().unwrap();
    match shelf.iter_mut().find(|b| b["isbn"] == isbn.as_str()) {
        Some(book) => {
            body["isbn"] = json!(isbn);
            *book = body.clone();
            Json(body).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, format!("Book with ISBN {} not found", isbn)),
    }
}

async fn delete_book(State(shelf): State<Shelf>, Path(isbn): Path<String>) -> Response {
    let mut shelf = shelf.lock().unwrap();
    let before = shelf.len();
    shelf.retain(|b| b["isbn"] != isbn.as_str());
    if shelf.len() == before {
        return detail(StatusCode::NOT_FOUND, format!("Book with ISBN {} not found", isbn));
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn borrow_book(
    State(shelf): State<Shelf>,
    Path(isbn): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut shelf = shelf.lock().unwrap();
    let Some(book) = shelf.iter_mut().find(|b| b["isbn"] == isbn.as_str()) else {
        return detail(StatusCode::NOT_FOUND, format!("Book with ISBN {} not found", isbn));
    };

    let borrowed = book["is_borrowed"].as_bool().unwrap_or(false);
    match (body["action"].as_str(), borrowed) {
        (Some("borrow"), true) => detail(StatusCode::BAD_REQUEST, "Book is already borrowed".into()),
        (Some("return"), false) => detail(StatusCode::BAD_REQUEST, "Book is not borrowed".into()),
        (Some("borrow"), false) | (Some("return"), true) => {
            book["is_borrowed"] = json!(!borrowed);
            Json(book.clone()).into_response()
        }
        _ => detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            "action must be 'borrow' or 'return'".into(),
        ),
    }
}

async fn health(State(shelf): State<Shelf>) -> Json<Value> {
    let total = shelf.lock().unwrap().len();
    Json(json!({ "status": "healthy", "api_version": "1.0.0", "total_books": total }))
}

/// Start a stub catalog service on an ephemeral port
async fn spawn_stub(books: Vec<Value>) -> (HttpBooksApi, Shelf) {
    let shelf: Shelf = Arc::new(Mutex::new(books));
    let app = Router::new()
        .route("/books", get(list_books).post(add_by_isbn))
        .route("/books/manual", post(add_manual))
        .route("/books/:isbn", get(get_book).put(update_book).delete(delete_book))
        .route("/books/:isbn/borrow", post(borrow_book))
        .route("/health", get(health))
        .with_state(shelf.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api = HttpBooksApi::new(&ApiConfig {
        base_url: format!("http://{}", addr),
        request_timeout_secs: Some(5),
    })
    .unwrap();
    (api, shelf)
}

fn seed() -> Vec<Value> {
    vec![
        json!({
            "isbn": "9780261103573",
            "title": "The Fellowship of the Ring",
            "authors": ["J.R.R. Tolkien"],
            "is_borrowed": false,
            "book_type": "Physical",
            "shelf_location": "A3"
        }),
        json!({
            "isbn": "456",
            "title": "Dune",
            "authors": ["Frank Herbert"],
            "is_borrowed": true,
            "book_type": "Audio",
            "duration_minutes": 1280,
            "narrator": "Scott Brick"
        }),
        json!({
            "isbn": "978 0/1",
            "title": "Odd Identifier",
            "authors": [],
            "is_borrowed": false
        }),
    ]
}

#[tokio::test]
async fn test_list_books_decodes_formats() {
    let (api, _) = spawn_stub(seed()).await;

    let books = api.list_books().await.unwrap();
    assert_eq!(books.len(), 3);
    assert_eq!(
        books[1].format,
        BookFormat::Audio {
            duration_minutes: Some(1280),
            narrator: Some("Scott Brick".into())
        }
    );
    assert_eq!(books[2].format, BookFormat::physical());
    assert_eq!(books[2].primary_author(), "Unknown Author");
}

#[tokio::test]
async fn test_get_book_with_reserved_characters() {
    let (api, _) = spawn_stub(seed()).await;

    let book = api.get_book("978 0/1").await.unwrap();
    assert_eq!(book.title, "Odd Identifier");
}

#[tokio::test]
async fn test_get_book_failures_are_distinguished() {
    let (api, _) = spawn_stub(seed()).await;

    let err = api.get_book("nope").await.unwrap_err();
    assert_eq!(err, AppError::NotFound("Book with ISBN nope not found".into()));
    assert_eq!(err.user_message(), "Book not found");

    let err = api.get_book("broken").await.unwrap_err();
    assert_eq!(
        err,
        AppError::Server {
            status: 500,
            detail: "An unexpected error occurred while retrieving the book".into()
        }
    );

    let err = api.get_book("garbled").await.unwrap_err();
    assert!(matches!(err, AppError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_add_by_isbn_and_duplicate() {
    let (api, _) = spawn_stub(seed()).await;

    let request = NewBookByIsbn::new(
        "978-0-553-29335-7",
        BookFormat::Digital {
            file_size_mb: Some(1.5),
            file_format: Some(FileFormat::Epub),
        },
    );
    let book = api.add_by_isbn(&request).await.unwrap();
    assert_eq!(book.isbn, "978-0-553-29335-7");
    assert_eq!(book.title, "Fetched Title");
    assert_eq!(
        book.format,
        BookFormat::Digital {
            file_size_mb: Some(1.5),
            file_format: Some(FileFormat::Epub),
        }
    );

    let err = api.add_by_isbn(&request).await.unwrap_err();
    assert_eq!(
        err,
        AppError::Rejected {
            status: 400,
            detail: "Book with ISBN 978-0-553-29335-7 already exists".into()
        }
    );
}

#[tokio::test]
async fn test_manual_update_and_delete() {
    let (api, shelf) = spawn_stub(vec![]).await;

    let manual = ManualBook::new(
        "111",
        "The Left Hand of Darkness",
        &["Ursula K. Le Guin"],
        BookFormat::Physical {
            shelf_location: Some("B2".into()),
        },
    );
    let created = api.add_manual(&manual).await.unwrap();
    assert_eq!(created.authors, vec!["Ursula K. Le Guin".to_string()]);
    assert_eq!(shelf.lock().unwrap()[0]["shelf_location"], "B2");

    let mut update = BookUpdate::from(&created);
    update.title = "The Dispossessed".into();
    update.format = BookFormat::audio();
    let updated = api.update_book("111", &update).await.unwrap();
    assert_eq!(updated.title, "The Dispossessed");
    assert_eq!(updated.format, BookFormat::audio());
    assert!(shelf.lock().unwrap()[0].get("shelf_location").is_none());

    api.delete_book("111").await.unwrap();
    assert!(shelf.lock().unwrap().is_empty());
    assert!(matches!(
        api.delete_book("111").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_borrow_state_is_validated_by_server() {
    let (api, _) = spawn_stub(seed()).await;

    let err = api.borrow("456", BorrowAction::Borrow).await.unwrap_err();
    assert_eq!(
        err,
        AppError::Rejected {
            status: 400,
            detail: "Book is already borrowed".into()
        }
    );

    let returned = api.borrow("456", BorrowAction::Return).await.unwrap();
    assert!(!returned.is_borrowed);
}

#[tokio::test]
async fn test_health() {
    let (api, _) = spawn_stub(seed()).await;

    let health = api.health().await.unwrap();
    assert_eq!(health.total_books, 3);
    assert_eq!(health.status.as_deref(), Some("healthy"));
}

#[tokio::test]
async fn test_unreachable_service_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpBooksApi::new(&ApiConfig {
        base_url: format!("http://{}", addr),
        request_timeout_secs: Some(2),
    })
    .unwrap();

    assert!(matches!(api.list_books().await, Err(AppError::Network(_))));
}

#[tokio::test]
async fn test_services_over_http() {
    let (api, _) = spawn_stub(seed()).await;
    let services = Services::new(Arc::new(api), ListViewModel::default());

    services.catalog.refresh().await.unwrap();
    services.catalog.set_filter(FilterKind::Borrowed).await;

    let mutation = services.catalog.delete("456").await.unwrap();
    assert_eq!(mutation.refresh, RefreshOutcome::Applied { count: 2 });

    let vm = services.catalog.view_model().read().await;
    let view = vm.view();
    assert!(view.is_empty());
    assert_eq!(view.summary.borrowed, 0);
    assert_eq!(view.summary.total, 2);
}
