//! Data models for the catalog client

pub mod book;
pub mod enums;
pub mod health;
pub mod loan;
pub mod notification;
pub mod requests;

// Re-export commonly used types
pub use book::{Book, BookFormat};
pub use enums::{BookKind, FileFormat};
pub use health::{ConnectionStatus, HealthStatus};
pub use loan::{BorrowAction, BorrowRequest};
pub use notification::{Notification, NotificationLevel};
pub use requests::{BookUpdate, ManualBook, NewBookByIsbn};
