//! Sorting interaction engine
//!
//! A synchronous state machine over one rendered sorting question: card
//! placements, submission gating, and grading against the optional answer
//! key. The engine owns its placement state for the lifetime of one step;
//! the presentation layer constructs a fresh engine whenever the rendered
//! step's identity changes, so a prior question's placements never leak.
//!
//! Mutations queue `InteractionEvent`s instead of invoking callbacks
//! directly; the caller drains the queue after each operation and forwards
//! the notifications. That keeps the engine pure and the event order exact.

use std::collections::BTreeMap;

use ethicsbowl_domain::{BucketId, CardId, SortingCard, SortingDefinition};

/// Where a card currently sits: the unplaced bank or one of the buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Container {
    Bank,
    Bucket(BucketId),
}

/// Notification queued by engine mutations.
///
/// `SubmittedChanged` maps to the external submission callback used to gate
/// "Next" navigation; `PlacementsChanged` to the observational placement
/// callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    SubmittedChanged(bool),
    PlacementsChanged,
}

/// Grading verdict for a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardGrade {
    /// Not submitted yet, or no answer key entry for this card.
    Unknown,
    Correct,
    Incorrect,
}

/// Grading verdict for a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketGrade {
    Neutral,
    Success,
    Error,
}

/// State machine for one rendered sorting question.
#[derive(Debug, Clone)]
pub struct SortingInteraction {
    definition: SortingDefinition,
    /// Sanitized once at construction; dangling entries grade as Unknown.
    answer_key: BTreeMap<CardId, BucketId>,
    lock_after_submit: bool,
    placements: BTreeMap<CardId, Container>,
    submitted: bool,
    events: Vec<InteractionEvent>,
}

impl SortingInteraction {
    /// Start a fresh interaction: every card in the bank, not submitted.
    ///
    /// Queues `SubmittedChanged(false)` so the caller re-gates navigation
    /// immediately, including when switching from an already-submitted step.
    pub fn new(definition: SortingDefinition, lock_after_submit: bool) -> Self {
        let answer_key = definition.sanitized_answer_key();
        let placements = definition
            .cards()
            .iter()
            .map(|c| (c.id, Container::Bank))
            .collect();
        Self {
            definition,
            answer_key,
            lock_after_submit,
            placements,
            submitted: false,
            events: vec![InteractionEvent::SubmittedChanged(false)],
        }
    }

    /// Drain queued notifications in the order they were produced.
    pub fn drain_events(&mut self) -> Vec<InteractionEvent> {
        std::mem::take(&mut self.events)
    }

    // === Queries ===

    pub fn definition(&self) -> &SortingDefinition {
        &self.definition
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// Submitted and locked: no further moves or resets.
    pub fn is_locked(&self) -> bool {
        self.submitted && self.lock_after_submit
    }

    pub fn can_interact(&self) -> bool {
        !self.is_locked()
    }

    pub fn placements(&self) -> &BTreeMap<CardId, Container> {
        &self.placements
    }

    pub fn container_of(&self, card: CardId) -> Option<Container> {
        self.placements.get(&card).copied()
    }

    /// Cards currently in the given container, in definition order.
    pub fn cards_in(&self, container: Container) -> Vec<&SortingCard> {
        self.definition
            .cards()
            .iter()
            .filter(|c| self.placements.get(&c.id) == Some(&container))
            .collect()
    }

    pub fn bank_count(&self) -> usize {
        self.placements
            .values()
            .filter(|c| **c == Container::Bank)
            .count()
    }

    /// The submit gate: every card placed in a bucket.
    pub fn all_placed(&self) -> bool {
        self.bank_count() == 0
    }

    pub fn has_answer_key(&self) -> bool {
        !self.answer_key.is_empty()
    }

    // === Mutations ===

    /// Move a card to a target container.
    ///
    /// Unknown card or target ids are ignored silently: drop targets are
    /// constrained by the render surface, so a mismatch is a stale render,
    /// not a user error. Dropping a card onto its current container is a
    /// no-op. Moving a card after submission withdraws the submission
    /// unless the interaction is locked, in which case the move is refused.
    pub fn move_card(&mut self, card: CardId, target: Container) {
        if self.is_locked() {
            return;
        }
        if !self.placements.contains_key(&card) {
            tracing::debug!(%card, "move ignored: unknown card");
            return;
        }
        if let Container::Bucket(bucket) = target {
            if !self.definition.has_bucket(bucket) {
                tracing::debug!(%card, %bucket, "move ignored: unknown bucket");
                return;
            }
        }
        if self.placements.get(&card) == Some(&target) {
            return;
        }

        self.placements.insert(card, target);
        self.events.push(InteractionEvent::PlacementsChanged);

        // Editing after submission withdraws the submitted status so the
        // completeness gate applies again before the next submit.
        if self.submitted {
            self.submitted = false;
            self.events.push(InteractionEvent::SubmittedChanged(false));
        }
    }

    /// Submit the current placements. No-op while any card is in the bank
    /// or when already submitted.
    pub fn submit(&mut self) {
        if self.submitted || !self.all_placed() {
            return;
        }
        self.submitted = true;
        self.events.push(InteractionEvent::SubmittedChanged(true));
    }

    /// Return every card to the bank and withdraw any submission.
    /// Refused while locked.
    pub fn reset(&mut self) {
        if self.is_locked() {
            return;
        }
        for slot in self.placements.values_mut() {
            *slot = Container::Bank;
        }
        self.submitted = false;
        self.events.push(InteractionEvent::PlacementsChanged);
        self.events.push(InteractionEvent::SubmittedChanged(false));
    }

    // === Grading (derived, never mutates) ===

    /// Verdict for one card. Only meaningful after submission and only for
    /// cards with a (still valid) answer key entry.
    pub fn card_grade(&self, card: CardId) -> CardGrade {
        if !self.submitted {
            return CardGrade::Unknown;
        }
        let Some(expected) = self.answer_key.get(&card) else {
            return CardGrade::Unknown;
        };
        match self.container_of(card) {
            Some(Container::Bucket(bucket)) if bucket == *expected => CardGrade::Correct,
            // A keyed card left in the bank is wrong, not ungraded.
            _ => CardGrade::Incorrect,
        }
    }

    /// Verdict for a bucket: success only when it holds at least one card
    /// and none of its cards graded incorrect.
    pub fn bucket_grade(&self, bucket: BucketId) -> BucketGrade {
        if !self.submitted || !self.has_answer_key() {
            return BucketGrade::Neutral;
        }
        let cards = self.cards_in(Container::Bucket(bucket));
        if cards.is_empty() {
            return BucketGrade::Neutral;
        }
        if cards
            .iter()
            .any(|c| self.card_grade(c.id) == CardGrade::Incorrect)
        {
            BucketGrade::Error
        } else {
            BucketGrade::Success
        }
    }

    /// Verdict for the bank: after a graded submission, an empty bank is
    /// success and a non-empty one is error.
    pub fn bank_grade(&self) -> BucketGrade {
        if !self.submitted || !self.has_answer_key() {
            return BucketGrade::Neutral;
        }
        if self.bank_count() == 0 {
            BucketGrade::Success
        } else {
            BucketGrade::Error
        }
    }
}
