//! Application layer - sorting logic and services over the outbound ports.

pub mod error;
pub mod services;
pub mod sorting;

pub use error::ServiceError;
