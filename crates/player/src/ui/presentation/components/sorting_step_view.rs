//! Sorting Step View - learner-facing sorting question
//!
//! Renders the card bank and bucket drop zones from a `SortingInteraction`
//! held in a signal, and wires pointer events to the `DragController`. All
//! decisions (move legality, submit gating, grading) live in the engine;
//! this component only renders state and forwards events.

use dioxus::prelude::*;

use ethicsbowl_domain::{SortingBucket, SortingCard, SortingDefinition, Step, StepId};

use crate::application::sorting::{
    BucketGrade, CardGrade, Container, DragController, InteractionEvent, SortingInteraction,
};

/// Drain the engine's queued notifications and forward them to the parent.
fn forward_events(
    mut interaction: Signal<SortingInteraction>,
    on_submitted_change: EventHandler<bool>,
    on_placements_change: EventHandler<()>,
) {
    let events = interaction.write().drain_events();
    for event in events {
        match event {
            InteractionEvent::SubmittedChanged(submitted) => on_submitted_change.call(submitted),
            InteractionEvent::PlacementsChanged => on_placements_change.call(()),
        }
    }
}

fn zone_class(grade: BucketGrade, highlighted: bool) -> &'static str {
    if highlighted {
        return "border-2 border-blue-400 bg-blue-500/10 rounded-lg p-3 min-h-24";
    }
    match grade {
        BucketGrade::Neutral => "border-2 border-gray-600 rounded-lg p-3 min-h-24",
        BucketGrade::Success => "border-2 border-green-500 bg-green-500/10 rounded-lg p-3 min-h-24",
        BucketGrade::Error => "border-2 border-red-500 bg-red-500/10 rounded-lg p-3 min-h-24",
    }
}

fn card_class(grade: CardGrade, dragging: bool) -> &'static str {
    if dragging {
        return "px-3 py-2 bg-dark-surface border border-blue-400 rounded shadow-lg \
                cursor-grabbing select-none opacity-70";
    }
    match grade {
        CardGrade::Unknown => {
            "px-3 py-2 bg-dark-surface border border-gray-600 rounded cursor-grab select-none"
        }
        CardGrade::Correct => {
            "px-3 py-2 bg-dark-surface border border-green-500 rounded cursor-grab select-none"
        }
        CardGrade::Incorrect => {
            "px-3 py-2 bg-dark-surface border border-red-500 rounded cursor-grab select-none"
        }
    }
}

#[component]
fn CardChip(
    card: SortingCard,
    grade: CardGrade,
    dragging: bool,
    can_interact: bool,
    drag: Signal<DragController>,
) -> Element {
    let card_id = card.id;
    rsx! {
        div {
            class: card_class(grade, dragging),
            onmousedown: move |_| {
                if can_interact {
                    drag.write().drag_start(card_id);
                }
            },
            "{card.text}"
        }
    }
}

/// Learner view of one sorting step.
///
/// `on_submitted_change` gates outer navigation; it fires with the current
/// submitted state on mount and on every change, including when the
/// rendered step switches.
#[component]
pub fn SortingStepView(
    step: Step,
    #[props(default = false)] lock_after_submit: bool,
    on_submitted_change: EventHandler<bool>,
    on_placements_change: EventHandler<()>,
) -> Element {
    let definition = step.sorting().cloned();
    let step_id = step.id();

    // Hooks run unconditionally; the non-sorting fallback returns below.
    let mut rendered_id: Signal<StepId> = use_signal(|| step_id);
    let mut interaction = {
        let definition = definition
            .clone()
            .unwrap_or_else(|| SortingDefinition::new(""));
        use_signal(move || SortingInteraction::new(definition, lock_after_submit))
    };
    let mut drag = use_signal(DragController::new);

    let Some(definition) = definition else {
        return rsx! {
            div { class: "p-4 text-red-500", "This step is not a sorting question." }
        };
    };

    // A different step id means a different question: rebuild the engine so
    // the previous step's placements never leak into this one.
    if *rendered_id.peek() != step.id() {
        rendered_id.set(step.id());
        interaction.set(SortingInteraction::new(definition.clone(), lock_after_submit));
        drag.set(DragController::new());
    }

    // Deliver the construction-time notification once the component is live.
    use_effect(move || {
        let _ = rendered_id();
        forward_events(interaction, on_submitted_change, on_placements_change);
    });

    let prompt = definition.prompt().to_string();
    let buckets: Vec<SortingBucket> = definition.buckets().to_vec();

    let engine = interaction.read();
    let controller = drag.read();
    let submitted = engine.submitted();
    let can_interact = engine.can_interact();
    let can_submit = engine.all_placed() && !submitted;
    let dragging_card = controller.active_card();
    let hover = controller.hover_target();
    let bank_cards: Vec<SortingCard> = engine
        .cards_in(Container::Bank)
        .into_iter()
        .cloned()
        .collect();
    let bank_grade = engine.bank_grade();
    let bucket_contents: Vec<(SortingBucket, BucketGrade, Vec<(SortingCard, CardGrade)>)> =
        buckets
            .into_iter()
            .map(|bucket| {
                let grade = engine.bucket_grade(bucket.id);
                let cards = engine
                    .cards_in(Container::Bucket(bucket.id))
                    .into_iter()
                    .map(|card| (card.clone(), engine.card_grade(card.id)))
                    .collect();
                (bucket, grade, cards)
            })
            .collect();
    drop(engine);
    drop(controller);

    // Resolve a release over a drop zone; the controller already tracks
    // which zone the pointer is over.
    let resolve_drop = move |_| {
        if let Some((card, target)) = drag.write().release() {
            interaction.write().move_card(card, target);
            forward_events(interaction, on_submitted_change, on_placements_change);
        }
    };

    rsx! {
        div {
            class: "sorting-step flex flex-col gap-4 p-4",
            // Releasing outside every drop zone cancels the drag.
            onmouseup: move |_| {
                if drag.peek().is_dragging() && drag.peek().hover_target().is_none() {
                    drag.write().cancel();
                }
            },

            p { class: "text-lg text-white", "{prompt}" }

            // Card bank
            div {
                class: zone_class(bank_grade, hover == Some(Container::Bank)),
                onmouseenter: move |_| drag.write().drag_over(Some(Container::Bank)),
                onmouseleave: move |_| drag.write().drag_over(None),
                onmouseup: resolve_drop,

                div { class: "text-sm text-gray-400 mb-2", "Unsorted cards" }
                div { class: "flex flex-wrap gap-2",
                    for card in bank_cards {
                        CardChip {
                            key: "{card.id}",
                            card: card.clone(),
                            grade: CardGrade::Unknown,
                            dragging: dragging_card == Some(card.id),
                            can_interact,
                            drag,
                        }
                    }
                }
            }

            // Buckets
            div { class: "grid grid-cols-2 gap-3",
                for (bucket, grade, cards) in bucket_contents {
                    div {
                        key: "{bucket.id}",
                        class: zone_class(grade, hover == Some(Container::Bucket(bucket.id))),
                        onmouseenter: {
                            let bucket_id = bucket.id;
                            move |_| drag.write().drag_over(Some(Container::Bucket(bucket_id)))
                        },
                        onmouseleave: move |_| drag.write().drag_over(None),
                        onmouseup: resolve_drop,

                        div { class: "font-semibold text-white mb-2", "{bucket.label}" }
                        div { class: "flex flex-col gap-2",
                            for (card, card_grade) in cards {
                                CardChip {
                                    key: "{card.id}",
                                    card: card.clone(),
                                    grade: card_grade,
                                    dragging: dragging_card == Some(card.id),
                                    can_interact,
                                    drag,
                                }
                            }
                        }
                    }
                }
            }

            // Controls
            div { class: "flex gap-2 justify-end",
                button {
                    class: "px-4 py-2 border border-gray-600 rounded text-gray-300 \
                            disabled:opacity-50",
                    disabled: !can_interact,
                    onclick: move |_| {
                        interaction.write().reset();
                        drag.write().cancel();
                        forward_events(interaction, on_submitted_change, on_placements_change);
                    },
                    "Reset"
                }
                button {
                    class: "px-4 py-2 bg-blue-600 rounded text-white disabled:opacity-50",
                    disabled: !can_submit,
                    onclick: move |_| {
                        interaction.write().submit();
                        forward_events(interaction, on_submitted_change, on_placements_change);
                    },
                    if submitted { "Submitted" } else { "Submit" }
                }
            }
        }
    }
}
