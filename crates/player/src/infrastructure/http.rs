//! HTTP document-API adapter
//!
//! Talks to the JSON document backend:
//! - `GET  {base}/steps/{id}`
//! - `PUT  {base}/steps/{id}`
//! - `GET  {base}/modules/{id}/steps`
//!
//! Steps serialize with their `type` tag and camelCase fields, matching the
//! stored document shape, so no DTO layer is needed here.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use ethicsbowl_domain::{ModuleId, Step, StepId};

use crate::ports::outbound::{RepositoryError, StepRepositoryPort};

pub struct DocumentApiAdapter {
    base_url: String,
    client: reqwest::Client,
}

impl DocumentApiAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        RepositoryError::RequestFailed(err.to_string())
    }
}

#[async_trait]
impl StepRepositoryPort for DocumentApiAdapter {
    async fn fetch_step(&self, id: StepId) -> Result<Step, RepositoryError> {
        let url = format!("{}/steps/{id}", self.base_url);
        debug!(%url, "GET step");
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound(id));
        }
        let response = response
            .error_for_status()
            .map_err(|e| RepositoryError::RequestFailed(e.to_string()))?;
        Ok(response.json::<Step>().await?)
    }

    async fn save_step(&self, step: &Step) -> Result<(), RepositoryError> {
        let url = format!("{}/steps/{}", self.base_url, step.id());
        debug!(%url, "PUT step");
        let response = self.client.put(&url).json(step).send().await?;
        if response.status().is_client_error() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Rejected(format!("{status}: {body}")));
        }
        response
            .error_for_status()
            .map_err(|e| RepositoryError::RequestFailed(e.to_string()))?;
        Ok(())
    }

    async fn list_steps(&self, module_id: ModuleId) -> Result<Vec<Step>, RepositoryError> {
        let url = format!("{}/modules/{module_id}/steps", self.base_url);
        debug!(%url, "GET module steps");
        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| RepositoryError::RequestFailed(e.to_string()))?;
        Ok(response.json::<Vec<Step>>().await?)
    }
}
