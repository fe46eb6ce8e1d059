//! Service providers for the presentation layer
//!
//! The composition root builds the service bundle and provides it via
//! Dioxus context; components reach services through the hooks below and
//! never touch infrastructure types directly.

use std::sync::Arc;

use dioxus::prelude::*;

use crate::application::services::StepService;

/// All services wrapped for context provision.
#[derive(Clone)]
pub struct Services {
    pub steps: Arc<StepService>,
}

/// Hook to access the StepService from context.
pub fn use_step_service() -> Arc<StepService> {
    let services = use_context::<Services>();
    services.steps.clone()
}
