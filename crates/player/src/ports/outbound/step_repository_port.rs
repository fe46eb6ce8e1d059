//! Step Repository Port - persistence interface for learning steps
//!
//! The application layer loads and saves steps through this trait without
//! knowing whether the backing store is the HTTP document API or an
//! in-memory map.

use async_trait::async_trait;

use ethicsbowl_domain::{ModuleId, Step, StepId};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Step not found: {0}")]
    NotFound(StepId),
    #[error("Save rejected: {0}")]
    Rejected(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StepRepositoryPort: Send + Sync {
    /// Load a single step by id.
    async fn fetch_step(&self, id: StepId) -> Result<Step, RepositoryError>;

    /// Persist a step, creating or replacing the stored document.
    async fn save_step(&self, step: &Step) -> Result<(), RepositoryError>;

    /// List a module's steps in authored order.
    async fn list_steps(&self, module_id: ModuleId) -> Result<Vec<Step>, RepositoryError>;
}
