//! Service health and connection status

use serde::{Deserialize, Serialize};

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    pub total_books: u64,
}

/// What the client shows as its connection indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Online {
        total_books: u64,
        api_version: Option<String>,
    },
    Offline {
        reason: String,
    },
}

impl ConnectionStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, ConnectionStatus::Online { .. })
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Online {
                total_books,
                api_version: Some(version),
            } => write!(f, "online (API {}, {} books)", version, total_books),
            ConnectionStatus::Online { total_books, .. } => {
                write!(f, "online ({} books)", total_books)
            }
            ConnectionStatus::Offline { .. } => write!(f, "offline"),
        }
    }
}
