//! Sorting Editor Modal - create and edit sorting questions
//!
//! Form over a `SortingDraft`. Validation messages are gated on the draft's
//! touched flag so a freshly opened blank form shows no errors; Save stays
//! disabled while any rule fails. A failed save keeps the modal open with
//! the draft intact.

use dioxus::prelude::*;
use uuid::Uuid;

use ethicsbowl_domain::{BucketId, ModuleId, Step, UserId};

use crate::application::sorting::{SortingDraft, MIN_BUCKETS, MIN_CARDS};
use crate::ui::presentation::services::use_step_service;

const INPUT_CLASS: &str =
    "w-full p-2 bg-dark-bg border border-gray-700 rounded text-white";
const ERROR_CLASS: &str = "text-red-500 text-sm";

#[component]
fn FieldError(show: bool, message: String) -> Element {
    rsx! {
        if show {
            div { class: ERROR_CLASS, "{message}" }
        }
    }
}

/// Modal form for authoring a sorting step.
///
/// Pass `step: Some(..)` to edit an existing sorting step; `None` creates a
/// new one in the given module.
#[component]
pub fn SortingEditorModal(
    module_id: ModuleId,
    author: UserId,
    step: Option<Step>,
    on_saved: EventHandler<Step>,
    on_close: EventHandler<()>,
) -> Element {
    let step_service = use_step_service();

    let mut draft = use_signal(move || match &step {
        Some(step) => SortingDraft::edit(step)
            .unwrap_or_else(|_| SortingDraft::new(module_id, author)),
        None => SortingDraft::new(module_id, author),
    });
    let mut is_saving = use_signal(|| false);
    let mut save_error: Signal<Option<String>> = use_signal(|| None);

    let form = draft.read();
    let errors = form.validate();
    let show_errors = form.touched();
    let can_save = !errors.any() && !is_saving();
    let is_edit = form.is_edit();
    let title = form.title().to_string();
    let prompt = form.prompt().to_string();
    let is_optional = form.is_optional();
    let buckets: Vec<(BucketId, String)> = form
        .buckets()
        .iter()
        .map(|b| (b.id, b.label.clone()))
        .collect();
    let usable_buckets: Vec<(BucketId, String)> = buckets
        .iter()
        .filter(|(_, label)| !label.trim().is_empty())
        .cloned()
        .collect();
    let cards: Vec<(ethicsbowl_domain::CardId, String, Option<BucketId>)> = form
        .cards()
        .iter()
        .map(|c| (c.id, c.text.clone(), form.answer_for(c.id)))
        .collect();
    drop(form);

    let on_save = move |_| {
        let built = draft.write().build(chrono::Utc::now());
        let step = match built {
            Ok(step) => step,
            Err(_) => return,
        };
        let service = step_service.clone();
        is_saving.set(true);
        save_error.set(None);
        spawn(async move {
            match service.save_step(&step).await {
                Ok(()) => {
                    is_saving.set(false);
                    on_saved.call(step);
                }
                Err(err) => {
                    is_saving.set(false);
                    save_error.set(Some(err.user_message()));
                }
            }
        });
    };

    rsx! {
        div { class: "fixed inset-0 bg-black/60 flex items-center justify-center z-50",
            div { class: "bg-dark-surface rounded-lg w-full max-w-2xl max-h-[90vh] \
                          overflow-y-auto flex flex-col",

                // Header
                div { class: "flex justify-between items-center p-4 border-b border-gray-700",
                    h2 { class: "text-white text-xl m-0",
                        if is_edit { "Edit Sorting Question" } else { "New Sorting Question" }
                    }
                    button {
                        class: "px-2 py-1 bg-transparent text-gray-400 border-none cursor-pointer text-xl",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }

                if let Some(message) = save_error() {
                    div { class: "px-4 py-3 bg-red-500/10 border-b border-red-500/30 text-red-500 text-sm",
                        "{message}"
                    }
                }

                div { class: "flex flex-col gap-4 p-4",
                    // Title
                    div {
                        label { class: "text-gray-300 text-sm", "Title" }
                        input {
                            class: INPUT_CLASS,
                            value: "{title}",
                            oninput: move |evt| draft.write().set_title(evt.value()),
                        }
                        FieldError {
                            show: show_errors && errors.title_empty,
                            message: "Title is required",
                        }
                    }

                    // Prompt
                    div {
                        label { class: "text-gray-300 text-sm", "Prompt" }
                        textarea {
                            class: INPUT_CLASS,
                            value: "{prompt}",
                            oninput: move |evt| draft.write().set_prompt(evt.value()),
                        }
                        FieldError {
                            show: show_errors && errors.prompt_empty,
                            message: "Prompt is required",
                        }
                    }

                    label { class: "flex items-center gap-2 text-gray-300 text-sm",
                        input {
                            r#type: "checkbox",
                            checked: is_optional,
                            onchange: move |evt| draft.write().set_is_optional(evt.checked()),
                        }
                        "Optional step"
                    }

                    // Buckets
                    div {
                        div { class: "text-gray-300 text-sm mb-1", "Buckets" }
                        for (bucket_id, label) in buckets {
                            div { key: "{bucket_id}", class: "flex gap-2 mb-2",
                                input {
                                    class: INPUT_CLASS,
                                    value: "{label}",
                                    placeholder: "Bucket label",
                                    oninput: move |evt| {
                                        draft.write().update_bucket_label(bucket_id, evt.value());
                                    },
                                }
                                button {
                                    class: "px-3 text-red-400 border border-gray-700 rounded",
                                    onclick: move |_| draft.write().remove_bucket(bucket_id),
                                    "Remove"
                                }
                            }
                        }
                        button {
                            class: "px-3 py-1 border border-gray-600 rounded text-gray-300",
                            onclick: move |_| {
                                draft.write().add_bucket();
                            },
                            "Add bucket"
                        }
                        FieldError {
                            show: show_errors && errors.bucket_label_empty,
                            message: "Every bucket needs a label",
                        }
                        FieldError {
                            show: show_errors && errors.duplicate_bucket_labels,
                            message: "Bucket labels must be unique",
                        }
                        FieldError {
                            show: show_errors && errors.too_few_buckets,
                            message: "At least {MIN_BUCKETS} buckets are required",
                        }
                    }

                    // Cards, each with its correct-bucket selector
                    div {
                        div { class: "text-gray-300 text-sm mb-1", "Cards" }
                        for (card_id, text, answer) in cards {
                            div { key: "{card_id}", class: "flex gap-2 mb-2",
                                input {
                                    class: INPUT_CLASS,
                                    value: "{text}",
                                    placeholder: "Card text",
                                    oninput: move |evt| {
                                        draft.write().update_card_text(card_id, evt.value());
                                    },
                                }
                                select {
                                    class: "p-2 bg-dark-bg border border-gray-700 rounded text-white",
                                    value: answer.map(|b| b.to_string()).unwrap_or_default(),
                                    onchange: move |evt| {
                                        let parsed = Uuid::parse_str(&evt.value())
                                            .ok()
                                            .map(BucketId::from_uuid);
                                        draft.write().set_answer(card_id, parsed);
                                    },
                                    option { value: "", "Correct bucket…" }
                                    for (bucket_id, label) in usable_buckets.clone() {
                                        option {
                                            key: "{bucket_id}",
                                            value: "{bucket_id}",
                                            selected: answer == Some(bucket_id),
                                            "{label}"
                                        }
                                    }
                                }
                                button {
                                    class: "px-3 text-red-400 border border-gray-700 rounded",
                                    onclick: move |_| draft.write().remove_card(card_id),
                                    "Remove"
                                }
                            }
                        }
                        button {
                            class: "px-3 py-1 border border-gray-600 rounded text-gray-300",
                            onclick: move |_| {
                                draft.write().add_card();
                            },
                            "Add card"
                        }
                        FieldError {
                            show: show_errors && errors.card_text_empty,
                            message: "Every card needs text",
                        }
                        FieldError {
                            show: show_errors && errors.duplicate_card_texts,
                            message: "Card texts must be unique",
                        }
                        FieldError {
                            show: show_errors && errors.too_few_cards,
                            message: "At least {MIN_CARDS} cards are required",
                        }
                        FieldError {
                            show: show_errors && errors.missing_answers,
                            message: "Pick a correct bucket for every card",
                        }
                    }
                }

                // Footer
                div { class: "flex justify-end gap-2 p-4 border-t border-gray-700",
                    button {
                        class: "px-4 py-2 border border-gray-600 rounded text-gray-300",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "px-4 py-2 bg-blue-600 rounded text-white disabled:opacity-50",
                        disabled: !can_save,
                        onclick: on_save,
                        if is_saving() { "Saving…" } else { "Save" }
                    }
                }
            }
        }
    }
}
