//! Book model and its wire representation.
//!
//! The service sends the type-specific attributes as flat optional fields next
//! to a `book_type` tag. On the client they are folded into [`BookFormat`], so a
//! book only ever carries the attributes of its own type.

use serde::{Deserialize, Serialize};
use validator::ValidationError;

use super::enums::{BookKind, FileFormat};

/// Type tag plus the attributes that only exist for that type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FormatFields", into = "FormatFields")]
pub enum BookFormat {
    Physical {
        shelf_location: Option<String>,
    },
    Digital {
        file_size_mb: Option<f64>,
        file_format: Option<FileFormat>,
    },
    Audio {
        duration_minutes: Option<u32>,
        narrator: Option<String>,
    },
    /// Tag sent by the server that this client does not know
    Unrecognized(String),
}

impl BookFormat {
    pub fn physical() -> Self {
        BookFormat::Physical {
            shelf_location: None,
        }
    }

    pub fn digital() -> Self {
        BookFormat::Digital {
            file_size_mb: None,
            file_format: None,
        }
    }

    pub fn audio() -> Self {
        BookFormat::Audio {
            duration_minutes: None,
            narrator: None,
        }
    }

    /// `None` for an unrecognized tag
    pub fn kind(&self) -> Option<BookKind> {
        match self {
            BookFormat::Physical { .. } => Some(BookKind::Physical),
            BookFormat::Digital { .. } => Some(BookKind::Digital),
            BookFormat::Audio { .. } => Some(BookKind::Audio),
            BookFormat::Unrecognized(_) => None,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            BookFormat::Unrecognized(tag) => tag.as_str(),
            other => other.kind().map(|k| k.as_str()).unwrap_or_default(),
        }
    }
}

impl Default for BookFormat {
    fn default() -> Self {
        BookFormat::physical()
    }
}

/// Flat wire shape of a [`BookFormat`], shared by responses and request bodies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelf_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_mb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_format: Option<FileFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrator: Option<String>,
}

impl From<FormatFields> for BookFormat {
    fn from(f: FormatFields) -> Self {
        let Some(tag) = f.book_type else {
            return BookFormat::Physical {
                shelf_location: f.shelf_location,
            };
        };

        match BookKind::parse(&tag) {
            Some(BookKind::Physical) => BookFormat::Physical {
                shelf_location: f.shelf_location,
            },
            Some(BookKind::Digital) => BookFormat::Digital {
                file_size_mb: f.file_size_mb,
                file_format: f.file_format,
            },
            Some(BookKind::Audio) => BookFormat::Audio {
                duration_minutes: f.duration_minutes,
                narrator: f.narrator,
            },
            None => BookFormat::Unrecognized(tag),
        }
    }
}

impl From<BookFormat> for FormatFields {
    fn from(format: BookFormat) -> Self {
        FormatFields::from(&format)
    }
}

impl From<&BookFormat> for FormatFields {
    fn from(format: &BookFormat) -> Self {
        let mut fields = FormatFields {
            book_type: Some(format.tag().to_string()),
            ..Default::default()
        };
        match format {
            BookFormat::Physical { shelf_location } => {
                fields.shelf_location = shelf_location.clone();
            }
            BookFormat::Digital {
                file_size_mb,
                file_format,
            } => {
                fields.file_size_mb = *file_size_mb;
                fields.file_format = file_format.clone();
            }
            BookFormat::Audio {
                duration_minutes,
                narrator,
            } => {
                fields.duration_minutes = *duration_minutes;
                fields.narrator = narrator.clone();
            }
            BookFormat::Unrecognized(_) => {}
        }
        fields
    }
}

/// Checks the numeric attributes of a format before it is sent
pub fn validate_format(format: &BookFormat) -> Result<(), ValidationError> {
    if let BookFormat::Digital {
        file_size_mb: Some(size),
        ..
    } = format
    {
        if !size.is_finite() || *size < 0.0 {
            let mut err = ValidationError::new("file_size_mb");
            err.message = Some("File size must be a non-negative number".into());
            return Err(err);
        }
    }
    if let BookFormat::Unrecognized(tag) = format {
        let mut err = ValidationError::new("book_type");
        err.message = Some(format!("Unknown book type: {}", tag).into());
        return Err(err);
    }
    Ok(())
}

/// Book as received from the catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub is_borrowed: bool,
    #[serde(flatten)]
    pub format: BookFormat,
}

impl Book {
    pub fn new(isbn: impl Into<String>, title: impl Into<String>, authors: Vec<String>) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            authors,
            is_borrowed: false,
            format: BookFormat::default(),
        }
    }

    pub fn with_format(mut self, format: BookFormat) -> Self {
        self.format = format;
        self
    }

    pub fn borrowed(mut self, is_borrowed: bool) -> Self {
        self.is_borrowed = is_borrowed;
        self
    }

    /// `None` when the server sent a type tag this client does not know
    pub fn kind(&self) -> Option<BookKind> {
        self.format.kind()
    }

    pub fn primary_author(&self) -> &str {
        self.authors
            .first()
            .map(String::as_str)
            .unwrap_or("Unknown Author")
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let authors = if self.authors.is_empty() {
            "Unknown Author".to_string()
        } else {
            self.authors.join(", ")
        };
        write!(f, "{} by {} (ISBN: {})", self.title, authors, self.isbn)
    }
}
