//! Application-level error type.

use ethicsbowl_domain::DomainError;
use thiserror::Error;

use crate::ports::outbound::RepositoryError;

/// Errors surfaced by application services to the presentation layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Short message suitable for an inline error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Repository(RepositoryError::NotFound(_)) => {
                "That step no longer exists.".to_string()
            }
            Self::Repository(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Domain(err) => err.to_string(),
            Self::Validation(msg) => msg.clone(),
        }
    }
}
