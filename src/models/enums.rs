//! Shared domain enums

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BookKind
// ---------------------------------------------------------------------------

/// Book type tag as sent in the `book_type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookKind {
    Physical,
    Digital,
    Audio,
}

impl BookKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookKind::Physical => "Physical",
            BookKind::Digital => "Digital",
            BookKind::Audio => "Audio",
        }
    }

    /// Parse a wire tag. Unknown tags return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Physical" => Some(BookKind::Physical),
            "Digital" => Some(BookKind::Digital),
            "Audio" => Some(BookKind::Audio),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FileFormat
// ---------------------------------------------------------------------------

/// File format of a digital book. Formats the client does not know are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileFormat {
    Pdf,
    Epub,
    Mobi,
    Azw3,
    Txt,
    Other(String),
}

impl FileFormat {
    pub fn as_str(&self) -> &str {
        match self {
            FileFormat::Pdf => "PDF",
            FileFormat::Epub => "EPUB",
            FileFormat::Mobi => "MOBI",
            FileFormat::Azw3 => "AZW3",
            FileFormat::Txt => "TXT",
            FileFormat::Other(s) => s,
        }
    }
}

impl From<&str> for FileFormat {
    fn from(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "PDF" => FileFormat::Pdf,
            "EPUB" => FileFormat::Epub,
            "MOBI" => FileFormat::Mobi,
            "AZW3" => FileFormat::Azw3,
            "TXT" => FileFormat::Txt,
            _ => FileFormat::Other(s.to_string()),
        }
    }
}

impl From<String> for FileFormat {
    fn from(s: String) -> Self {
        FileFormat::from(s.as_str())
    }
}

impl From<FileFormat> for String {
    fn from(f: FileFormat) -> Self {
        f.as_str().to_string()
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
