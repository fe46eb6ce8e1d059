//! Ethics Bowl Academy domain layer.
//!
//! Pure types and invariants shared by the learner and authoring clients.
//! This crate has no knowledge of persistence, rendering, or transport;
//! adapters translate at the edges.

extern crate self as ethicsbowl_domain;

pub mod entities;
pub mod error;
pub mod ids;

pub use entities::{
    Flashcard, Module, PollOption, QuizQuestion, Resource, ResourceKind, ResourceList,
    SortingBucket, SortingCard, SortingDefinition, Step, StepContent, StepKind, StudyMode,
};

pub use error::DomainError;
pub use ids::{BucketId, CardId, ModuleId, OptionId, ResourceId, StepId, UserId};
