//! Book catalog client
//!
//! Talks to a book-catalog REST service and keeps a filtered, paginated,
//! searchable view of the collection in sync with it.

use std::sync::Arc;

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod view_model;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use api::HttpBooksApi;
use view_model::ListViewModel;

/// Client state: configuration plus the services sharing one view-model
#[derive(Clone)]
pub struct CatalogClient {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl CatalogClient {
    /// Build an HTTP-backed client from configuration
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let api = HttpBooksApi::new(&config.api)?;

        let mut view_model = ListViewModel::default();
        view_model.set_page_size(config.view.page_size)?;
        view_model.set_filter(config.view.filter);

        Ok(Self {
            services: Arc::new(services::Services::new(Arc::new(api), view_model)),
            config: Arc::new(config),
        })
    }
}
