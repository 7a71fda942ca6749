//! Request bodies for catalog mutations

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use validator::{Validate, ValidationError};

use super::book::{validate_format, Book, BookFormat};

/// Digits, `X`, hyphens and spaces, the characters an ISBN-10/13 is written with
static ISBN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9Xx\- ]+$").unwrap());

fn validate_authors(authors: &[String]) -> Result<(), ValidationError> {
    if authors.iter().all(|a| a.trim().is_empty()) {
        let mut err = ValidationError::new("authors");
        err.message = Some("At least one author is required".into());
        return Err(err);
    }
    Ok(())
}

fn validate_isbn_present(isbn: &str) -> Result<(), ValidationError> {
    if isbn.trim().is_empty() {
        let mut err = ValidationError::new("isbn");
        err.message = Some("ISBN is required".into());
        return Err(err);
    }
    Ok(())
}

/// Trim each author and drop empty entries
pub fn clean_authors<I, S>(authors: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    authors
        .into_iter()
        .map(|a| a.as_ref().trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}

/// `POST /books`: the server looks the ISBN up in its bibliographic source
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewBookByIsbn {
    #[validate(
        length(min = 10, max = 17, message = "ISBN must be 10 to 17 characters"),
        regex(path = *ISBN_PATTERN, message = "ISBN may only contain digits, X, hyphens and spaces")
    )]
    pub isbn: String,
    #[serde(flatten)]
    #[validate(custom(function = "validate_format"))]
    pub format: BookFormat,
}

impl NewBookByIsbn {
    pub fn new(isbn: &str, format: BookFormat) -> Self {
        Self {
            isbn: isbn.trim().to_string(),
            format,
        }
    }
}

/// `POST /books/manual`: every bibliographic field supplied by the user
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ManualBook {
    #[validate(custom(function = "validate_isbn_present"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "validate_authors"))]
    pub authors: Vec<String>,
    #[serde(flatten)]
    #[validate(custom(function = "validate_format"))]
    pub format: BookFormat,
}

impl ManualBook {
    pub fn new<S: AsRef<str>>(isbn: &str, title: &str, authors: &[S], format: BookFormat) -> Self {
        Self {
            isbn: isbn.trim().to_string(),
            title: title.trim().to_string(),
            authors: clean_authors(authors),
            format,
        }
    }
}

/// `PUT /books/{isbn}`: full replacement of the editable fields
#[derive(Debug, Clone, Serialize, Validate)]
pub struct BookUpdate {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "validate_authors"))]
    pub authors: Vec<String>,
    pub is_borrowed: bool,
    #[serde(flatten)]
    #[validate(custom(function = "validate_format"))]
    pub format: BookFormat,
}

impl From<&Book> for BookUpdate {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            authors: book.authors.clone(),
            is_borrowed: book.is_borrowed,
            format: book.format.clone(),
        }
    }
}

impl BookUpdate {
    /// Normalise user input the same way manual creation does
    pub fn cleaned(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.authors = clean_authors(&self.authors);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::FileFormat;

    #[test]
    fn test_isbn_request_validation() {
        assert!(NewBookByIsbn::new("978-0199535675", BookFormat::physical())
            .validate()
            .is_ok());
        assert!(NewBookByIsbn::new("12345", BookFormat::physical())
            .validate()
            .is_err());
        assert!(NewBookByIsbn::new("97801995356ab", BookFormat::physical())
            .validate()
            .is_err());
    }

    #[test]
    fn test_manual_book_cleans_authors() {
        let book = ManualBook::new(
            " 123 ",
            " Title ",
            &["  Ursula K. Le Guin ", "", "   "],
            BookFormat::physical(),
        );
        assert_eq!(book.isbn, "123");
        assert_eq!(book.title, "Title");
        assert_eq!(book.authors, vec!["Ursula K. Le Guin".to_string()]);
        assert!(book.validate().is_ok());
    }

    #[test]
    fn test_manual_book_requires_an_author() {
        let book = ManualBook::new("123", "Title", &["  "], BookFormat::physical());
        assert!(book.validate().is_err());

        let no_title = ManualBook::new("123", "   ", &["A"], BookFormat::physical());
        assert!(no_title.validate().is_err());
    }

    #[test]
    fn test_update_body_is_flat() {
        let book = Book::new("42", "Neuromancer", vec!["William Gibson".into()]).with_format(
            BookFormat::Digital {
                file_size_mb: Some(2.5),
                file_format: Some(FileFormat::Epub),
            },
        );

        let body = serde_json::to_value(BookUpdate::from(&book)).unwrap();
        assert_eq!(body["title"], "Neuromancer");
        assert_eq!(body["is_borrowed"], false);
        assert_eq!(body["book_type"], "Digital");
        assert_eq!(body["file_format"], "EPUB");
        assert_eq!(body["file_size_mb"], 2.5);
        assert!(body.get("isbn").is_none());
        assert!(body.get("narrator").is_none());
    }

    #[test]
    fn test_update_rejects_negative_file_size() {
        let mut update = BookUpdate::from(&Book::new("1", "T", vec!["A".into()]));
        update.format = BookFormat::Digital {
            file_size_mb: Some(-3.0),
            file_format: None,
        };
        assert!(update.validate().is_err());
    }
}
