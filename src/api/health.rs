//! Health check endpoint

use crate::{error::AppResult, models::HealthStatus};

use super::{decode, HttpBooksApi};

/// `GET /health`
pub async fn health_check(api: &HttpBooksApi) -> AppResult<HealthStatus> {
    let url = api.endpoint(&["health"]);
    tracing::debug!("GET {}", url);

    let response = api.client().get(url).send().await?;
    decode(response).await
}
