//! UI root
//!
//! The app renders a module's first sorting question for a learner and
//! lets an author open the editor over it. Navigation past the question is
//! gated on submission.

use dioxus::prelude::*;

use ethicsbowl_domain::{ModuleId, Step, StepKind, UserId};

pub mod presentation;

use presentation::components::{SortingEditorModal, SortingStepView};
use presentation::services::use_step_service;

/// Which module and author identity the UI operates as.
/// Provided by the composition root (see `main.rs`).
#[derive(Clone, Copy, PartialEq)]
pub struct SessionContext {
    pub module_id: ModuleId,
    pub author: UserId,
}

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    rsx! {
        div { class: "min-h-screen bg-dark-bg text-white",
            header { class: "p-4 border-b border-gray-700",
                h1 { class: "text-2xl m-0", "Ethics Bowl Academy" }
            }
            SortingWorkbench {}
        }
    }
}

#[component]
fn SortingWorkbench() -> Element {
    let session = use_context::<SessionContext>();
    let step_service = use_step_service();

    let mut submitted = use_signal(|| false);
    let mut show_editor = use_signal(|| false);
    let mut editing_step: Signal<Option<Step>> = use_signal(|| None);

    let mut steps = use_resource(move || {
        let service = step_service.clone();
        async move { service.list_steps(session.module_id).await }
    });

    let loaded = steps.read_unchecked();
    let sorting_step: Option<Step> = match &*loaded {
        Some(Ok(list)) => list.iter().find(|s| s.kind() == StepKind::Sorting).cloned(),
        _ => None,
    };
    let load_error = matches!(&*loaded, Some(Err(_)));
    let loading = loaded.is_none();
    drop(loaded);

    rsx! {
        div { class: "max-w-3xl mx-auto p-4 flex flex-col gap-4",
            if loading {
                div { class: "text-gray-400", "Loading steps…" }
            } else if load_error {
                div { class: "text-red-500", "Could not load this module's steps." }
            } else if let Some(step) = sorting_step.clone() {
                div { class: "flex justify-between items-center",
                    h2 { class: "text-xl m-0", "{step.title()}" }
                    button {
                        class: "px-3 py-1 border border-gray-600 rounded text-gray-300",
                        onclick: {
                            let step = step.clone();
                            move |_| {
                                editing_step.set(Some(step.clone()));
                                show_editor.set(true);
                            }
                        },
                        "Edit"
                    }
                }

                SortingStepView {
                    step: step.clone(),
                    on_submitted_change: move |value| submitted.set(value),
                    on_placements_change: move |_| {},
                }

                div { class: "flex justify-end",
                    button {
                        class: "px-4 py-2 bg-blue-600 rounded text-white disabled:opacity-50",
                        disabled: !submitted(),
                        "Next"
                    }
                }
            } else {
                div { class: "flex flex-col items-start gap-3",
                    div { class: "text-gray-400", "This module has no sorting question yet." }
                    button {
                        class: "px-4 py-2 bg-blue-600 rounded text-white",
                        onclick: move |_| {
                            editing_step.set(None);
                            show_editor.set(true);
                        },
                        "New sorting question"
                    }
                }
            }

            if show_editor() {
                SortingEditorModal {
                    module_id: session.module_id,
                    author: session.author,
                    step: editing_step(),
                    on_saved: move |_| {
                        show_editor.set(false);
                        steps.restart();
                    },
                    on_close: move |_| show_editor.set(false),
                }
            }
        }
    }
}
