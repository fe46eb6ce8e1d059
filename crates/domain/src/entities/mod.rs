//! Domain entities - Core business objects with identity

mod module;
mod resources;
mod sorting;
mod step;

pub use module::Module;
pub use resources::{Resource, ResourceKind, ResourceList};
pub use sorting::{has_duplicates, SortingBucket, SortingCard, SortingDefinition};
pub use step::{Flashcard, PollOption, QuizQuestion, Step, StepContent, StepKind, StudyMode};
