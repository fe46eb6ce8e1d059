//! In-memory step repository for tests and offline development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use ethicsbowl_domain::{ModuleId, Step, StepId};

use crate::ports::outbound::{RepositoryError, StepRepositoryPort};

#[derive(Default)]
pub struct InMemoryStepRepository {
    steps: Mutex<HashMap<StepId, Step>>,
}

impl InMemoryStepRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a step, for demo and test setup.
    pub fn seed(&self, step: Step) {
        self.lock().insert(step.id(), step);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<StepId, Step>> {
        // Poisoning only happens after a panic in another holder; steps are
        // plain data, so the map is still usable.
        match self.steps.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl StepRepositoryPort for InMemoryStepRepository {
    async fn fetch_step(&self, id: StepId) -> Result<Step, RepositoryError> {
        self.lock()
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn save_step(&self, step: &Step) -> Result<(), RepositoryError> {
        self.lock().insert(step.id(), step.clone());
        Ok(())
    }

    async fn list_steps(&self, module_id: ModuleId) -> Result<Vec<Step>, RepositoryError> {
        Ok(self
            .lock()
            .values()
            .filter(|s| s.module_id() == module_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ethicsbowl_domain::{StepContent, UserId};

    #[tokio::test]
    async fn test_list_filters_by_module() {
        let repo = InMemoryStepRepository::new();
        let module_a = ModuleId::new();
        let module_b = ModuleId::new();

        for module in [module_a, module_a, module_b] {
            let step = Step::new(
                module,
                "Watch this",
                UserId::new(),
                StepContent::Video {
                    youtube_url: "https://youtu.be/x".into(),
                    thumbnail_url: None,
                    duration_sec: None,
                },
                Utc::now(),
            );
            repo.save_step(&step).await.expect("save");
        }

        assert_eq!(repo.list_steps(module_a).await.expect("list").len(), 2);
        assert_eq!(repo.list_steps(module_b).await.expect("list").len(), 1);
    }
}
