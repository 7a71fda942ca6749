//! Filter predicates over the loaded collection

use serde::{Deserialize, Serialize};

use crate::models::{Book, BookKind};

/// Which subset of the collection is on display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    All,
    Available,
    Borrowed,
    Physical,
    Digital,
    Audio,
}

impl FilterKind {
    pub const ALL: [FilterKind; 6] = [
        FilterKind::All,
        FilterKind::Available,
        FilterKind::Borrowed,
        FilterKind::Physical,
        FilterKind::Digital,
        FilterKind::Audio,
    ];

    pub fn matches(&self, book: &Book) -> bool {
        match self {
            FilterKind::All => true,
            FilterKind::Available => !book.is_borrowed,
            FilterKind::Borrowed => book.is_borrowed,
            FilterKind::Physical => book.kind() == Some(BookKind::Physical),
            FilterKind::Digital => book.kind() == Some(BookKind::Digital),
            FilterKind::Audio => book.kind() == Some(BookKind::Audio),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::All => "all",
            FilterKind::Available => "available",
            FilterKind::Borrowed => "borrowed",
            FilterKind::Physical => "physical",
            FilterKind::Digital => "digital",
            FilterKind::Audio => "audio",
        }
    }
}

impl std::str::FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown filter: {}", s))
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Books matching `kind`, in collection order
pub fn filter(books: &[Book], kind: FilterKind) -> Vec<&Book> {
    books.iter().filter(|b| kind.matches(b)).collect()
}
