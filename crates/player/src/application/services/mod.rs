//! Application services
//!
//! Services implement use cases over the outbound ports. The presentation
//! layer talks to services only, never to adapters directly.

pub mod step_service;

pub use step_service::StepService;
