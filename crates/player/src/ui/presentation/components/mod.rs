//! UI components

pub mod sorting_editor_modal;
pub mod sorting_step_view;

pub use sorting_editor_modal::SortingEditorModal;
pub use sorting_step_view::SortingStepView;
