//! Sorting step logic - interaction engine, drag lifecycle, editor draft.

mod drag;
mod editor;
mod interaction;

pub use drag::DragController;
pub use editor::{DraftErrors, SortingDraft, MIN_BUCKETS, MIN_CARDS};
pub use interaction::{
    BucketGrade, CardGrade, Container, InteractionEvent, SortingInteraction,
};
