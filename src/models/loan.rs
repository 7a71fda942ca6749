//! Borrow/return request types

use serde::{Deserialize, Serialize};

/// Action sent to `POST /books/{isbn}/borrow`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorrowAction {
    Borrow,
    Return,
}

impl BorrowAction {
    /// Action that flips the given borrowed state
    pub fn toggling(is_borrowed: bool) -> Self {
        if is_borrowed {
            BorrowAction::Return
        } else {
            BorrowAction::Borrow
        }
    }
}

impl std::fmt::Display for BorrowAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BorrowAction::Borrow => write!(f, "borrow"),
            BorrowAction::Return => write!(f, "return"),
        }
    }
}

/// Borrow/return request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowRequest {
    pub action: BorrowAction,
}
