//! Step Service - use cases for loading and saving learning steps

use std::sync::Arc;

use tracing::{debug, info, warn};

use ethicsbowl_domain::{ModuleId, Step, StepContent, StepId};

use crate::application::ServiceError;
use crate::ports::outbound::StepRepositoryPort;

/// Thin use-case layer over the step repository.
///
/// Content invariants are re-checked here before save so no adapter can
/// persist an invalid sorting definition, whatever the UI did.
#[derive(Clone)]
pub struct StepService {
    repository: Arc<dyn StepRepositoryPort>,
}

impl StepService {
    pub fn new(repository: Arc<dyn StepRepositoryPort>) -> Self {
        Self { repository }
    }

    pub async fn fetch_step(&self, id: StepId) -> Result<Step, ServiceError> {
        debug!(step_id = %id, "Fetching step");
        Ok(self.repository.fetch_step(id).await?)
    }

    pub async fn save_step(&self, step: &Step) -> Result<(), ServiceError> {
        if let StepContent::Sorting(definition) = step.content() {
            definition.validate()?;
        }
        if step.title().trim().is_empty() {
            return Err(ServiceError::validation("Step title cannot be empty"));
        }
        match self.repository.save_step(step).await {
            Ok(()) => {
                info!(step_id = %step.id(), kind = ?step.kind(), "Saved step");
                Ok(())
            }
            Err(err) => {
                warn!(step_id = %step.id(), error = %err, "Failed to save step");
                Err(err.into())
            }
        }
    }

    /// A module's steps, ordered by their authored position.
    pub async fn list_steps(&self, module_id: ModuleId) -> Result<Vec<Step>, ServiceError> {
        let mut steps = self.repository.list_steps(module_id).await?;
        steps.sort_by_key(Step::order);
        Ok(steps)
    }
}
