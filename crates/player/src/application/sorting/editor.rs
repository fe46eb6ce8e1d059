//! Sorting definition editor draft
//!
//! Form state for authoring or editing a sorting step. The draft owns its
//! working copies of buckets, cards, and the answer key until `build`
//! produces an immutable `Step`; closing without saving discards
//! everything. Validation is pure and re-run by the view on every change;
//! per-field messages only show once the form has been touched.
//!
//! The answer key is re-derived after every bucket or card mutation rather
//! than filtered once, so repeated add/remove cycles cannot leave stale
//! entries behind.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ethicsbowl_domain::{
    entities::has_duplicates, BucketId, CardId, DomainError, ModuleId, SortingBucket, SortingCard,
    SortingDefinition, Step, StepContent, UserId,
};

/// Editor policy: a sorting question needs at least two buckets and two
/// cards to be a meaningful exercise, and every card must have a designated
/// correct bucket so submissions can be graded.
pub const MIN_BUCKETS: usize = 2;
pub const MIN_CARDS: usize = 2;

/// Aggregate validation result, one flag per rule.
///
/// Never an `Err`: the view renders these inline and disables Save while
/// any flag is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftErrors {
    pub title_empty: bool,
    pub prompt_empty: bool,
    pub bucket_label_empty: bool,
    pub card_text_empty: bool,
    pub duplicate_bucket_labels: bool,
    pub duplicate_card_texts: bool,
    pub too_few_buckets: bool,
    pub too_few_cards: bool,
    pub missing_answers: bool,
}

impl DraftErrors {
    pub fn any(&self) -> bool {
        self.title_empty
            || self.prompt_empty
            || self.bucket_label_empty
            || self.card_text_empty
            || self.duplicate_bucket_labels
            || self.duplicate_card_texts
            || self.too_few_buckets
            || self.too_few_cards
            || self.missing_answers
    }
}

#[derive(Debug, Clone, PartialEq)]
enum DraftMode {
    Create { module_id: ModuleId, author: UserId },
    /// Keeps the original step so Save preserves identity, ordering, and
    /// creation metadata.
    Edit { original: Box<Step> },
}

/// Working state of the sorting editor form.
#[derive(Debug, Clone, PartialEq)]
pub struct SortingDraft {
    mode: DraftMode,
    title: String,
    prompt: String,
    is_optional: bool,
    buckets: Vec<SortingBucket>,
    cards: Vec<SortingCard>,
    answer_key: BTreeMap<CardId, BucketId>,
    touched: bool,
}

impl SortingDraft {
    /// Start a create-mode draft, seeded with one empty bucket and card so
    /// the form never opens on an empty list.
    pub fn new(module_id: ModuleId, author: UserId) -> Self {
        Self {
            mode: DraftMode::Create { module_id, author },
            title: "Sorting Question".to_string(),
            prompt: String::new(),
            is_optional: false,
            buckets: vec![SortingBucket::new("")],
            cards: vec![SortingCard::new("")],
            answer_key: BTreeMap::new(),
            touched: false,
        }
    }

    /// Start an edit-mode draft prefilled from an existing sorting step.
    pub fn edit(step: &Step) -> Result<Self, DomainError> {
        let Some(definition) = step.sorting() else {
            return Err(DomainError::constraint(
                "Cannot open the sorting editor on a non-sorting step",
            ));
        };
        Ok(Self {
            mode: DraftMode::Edit {
                original: Box::new(step.clone()),
            },
            title: step.title().to_string(),
            prompt: definition.prompt().to_string(),
            is_optional: step.is_optional(),
            buckets: definition.buckets().to_vec(),
            cards: definition.cards().to_vec(),
            answer_key: definition.sanitized_answer_key(),
            touched: false,
        })
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, DraftMode::Edit { .. })
    }

    // === Accessors ===

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    pub fn buckets(&self) -> &[SortingBucket] {
        &self.buckets
    }

    pub fn cards(&self) -> &[SortingCard] {
        &self.cards
    }

    pub fn answer_for(&self, card: CardId) -> Option<BucketId> {
        self.answer_key.get(&card).copied()
    }

    /// Whether the user has interacted with the form yet. Validation
    /// messages stay hidden on a freshly opened blank form.
    pub fn touched(&self) -> bool {
        self.touched
    }

    /// No bucket has a usable label yet, so the answer selectors have
    /// nothing to offer.
    pub fn no_usable_buckets(&self) -> bool {
        self.buckets.iter().all(|b| b.label.trim().is_empty())
    }

    // === Field mutations ===

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.touched = true;
        self.title = title.into();
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.touched = true;
        self.prompt = prompt.into();
    }

    pub fn set_is_optional(&mut self, is_optional: bool) {
        self.touched = true;
        self.is_optional = is_optional;
    }

    // === Bucket mutations ===

    pub fn add_bucket(&mut self) -> BucketId {
        self.touched = true;
        let bucket = SortingBucket::new("");
        let id = bucket.id;
        self.buckets.push(bucket);
        id
    }

    pub fn remove_bucket(&mut self, id: BucketId) {
        self.touched = true;
        self.buckets.retain(|b| b.id != id);
        self.resync_answer_key();
    }

    pub fn update_bucket_label(&mut self, id: BucketId, label: impl Into<String>) {
        self.touched = true;
        if let Some(bucket) = self.buckets.iter_mut().find(|b| b.id == id) {
            bucket.label = label.into();
        }
    }

    // === Card mutations ===

    pub fn add_card(&mut self) -> CardId {
        self.touched = true;
        let card = SortingCard::new("");
        let id = card.id;
        self.cards.push(card);
        id
    }

    pub fn remove_card(&mut self, id: CardId) {
        self.touched = true;
        self.cards.retain(|c| c.id != id);
        self.resync_answer_key();
    }

    pub fn update_card_text(&mut self, id: CardId, text: impl Into<String>) {
        self.touched = true;
        if let Some(card) = self.cards.iter_mut().find(|c| c.id == id) {
            card.text = text.into();
        }
    }

    // === Answer key ===

    /// Record or clear the designated correct bucket for a card. Unknown
    /// card or bucket ids are ignored; the selector only offers existing
    /// buckets, so a mismatch is a stale render.
    pub fn set_answer(&mut self, card: CardId, bucket: Option<BucketId>) {
        self.touched = true;
        match bucket {
            Some(bucket) => {
                if self.cards.iter().any(|c| c.id == card)
                    && self.buckets.iter().any(|b| b.id == bucket)
                {
                    self.answer_key.insert(card, bucket);
                }
            }
            None => {
                self.answer_key.remove(&card);
            }
        }
    }

    /// Re-derive the answer key from the current card and bucket sets.
    fn resync_answer_key(&mut self) {
        let mut next = BTreeMap::new();
        for card in &self.cards {
            if let Some(bucket) = self.answer_key.get(&card.id) {
                if self.buckets.iter().any(|b| b.id == *bucket) {
                    next.insert(card.id, *bucket);
                }
            }
        }
        self.answer_key = next;
    }

    // === Validation & build ===

    /// Pure aggregate validation; the view re-runs this on every change.
    pub fn validate(&self) -> DraftErrors {
        DraftErrors {
            title_empty: self.title.trim().is_empty(),
            prompt_empty: self.prompt.trim().is_empty(),
            bucket_label_empty: self.buckets.iter().any(|b| b.label.trim().is_empty()),
            card_text_empty: self.cards.iter().any(|c| c.text.trim().is_empty()),
            duplicate_bucket_labels: has_duplicates(self.buckets.iter().map(|b| b.label.as_str())),
            duplicate_card_texts: has_duplicates(self.cards.iter().map(|c| c.text.as_str())),
            too_few_buckets: self.buckets.len() < MIN_BUCKETS,
            too_few_cards: self.cards.len() < MIN_CARDS,
            missing_answers: self
                .cards
                .iter()
                .any(|c| !self.answer_key.contains_key(&c.id)),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.validate().any()
    }

    /// Produce the immutable step for persistence.
    ///
    /// Trims every text field, re-sanitizes the answer key against the
    /// final id sets, and either mints a new step (create mode) or carries
    /// the original identity and creation metadata forward (edit mode).
    pub fn build(&mut self, now: DateTime<Utc>) -> Result<Step, DomainError> {
        self.touched = true;
        if self.validate().any() {
            return Err(DomainError::validation(
                "Sorting step form has unresolved validation errors",
            ));
        }

        let buckets: Vec<SortingBucket> = self
            .buckets
            .iter()
            .map(|b| SortingBucket {
                id: b.id,
                label: b.label.trim().to_string(),
            })
            .collect();
        let cards: Vec<SortingCard> = self
            .cards
            .iter()
            .map(|c| SortingCard {
                id: c.id,
                text: c.text.trim().to_string(),
            })
            .collect();

        let mut definition = SortingDefinition::new(self.prompt.trim())
            .with_buckets(buckets)
            .with_cards(cards)
            .with_answer_key(self.answer_key.clone());
        definition.sanitize_answer_key();

        let title = self.title.trim().to_string();
        let content = StepContent::Sorting(definition);

        let step = match &self.mode {
            DraftMode::Create { module_id, author } => {
                Step::new(*module_id, title, *author, content, now)
                    .with_is_optional(self.is_optional)
            }
            DraftMode::Edit { original } => {
                let mut step = (**original).clone();
                step.rename(title, now);
                step.set_is_optional(self.is_optional, now);
                step.update_content(content, now);
                step
            }
        };
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> SortingDraft {
        let mut draft = SortingDraft::new(ModuleId::new(), UserId::new());
        draft.set_prompt("Sort each claim into its framework.");

        let b1 = draft.buckets()[0].id;
        draft.update_bucket_label(b1, "Utilitarian");
        let b2 = draft.add_bucket();
        draft.update_bucket_label(b2, "Deontological");

        let c1 = draft.cards()[0].id;
        draft.update_card_text(c1, "Maximize total happiness.");
        let c2 = draft.add_card();
        draft.update_card_text(c2, "Never lie, even if it would help.");

        draft.set_answer(c1, Some(b1));
        draft.set_answer(c2, Some(b2));
        draft
    }

    #[test]
    fn test_fresh_form_is_untouched_and_invalid() {
        let draft = SortingDraft::new(ModuleId::new(), UserId::new());
        assert!(!draft.touched());
        let errors = draft.validate();
        assert!(errors.prompt_empty);
        assert!(errors.too_few_buckets);
        assert!(errors.too_few_cards);
        assert!(errors.any());
    }

    #[test]
    fn test_filled_draft_validates() {
        let draft = filled_draft();
        assert!(draft.touched());
        assert!(draft.is_valid());
    }

    #[test]
    fn test_title_empty_fails_validation() {
        let mut draft = filled_draft();
        draft.set_title("  ");
        assert!(draft.validate().title_empty);
    }

    #[test]
    fn test_case_insensitive_duplicate_labels_flagged() {
        let mut draft = filled_draft();
        let b3 = draft.add_bucket();
        draft.update_bucket_label(b3, "utilitarian ");
        assert!(draft.validate().duplicate_bucket_labels);
    }

    #[test]
    fn test_missing_answer_flagged() {
        let mut draft = filled_draft();
        let c3 = draft.add_card();
        draft.update_card_text(c3, "What would a good person do?");
        assert!(draft.validate().missing_answers);

        draft.set_answer(c3, Some(draft.buckets()[0].id));
        assert!(!draft.validate().missing_answers);
    }

    #[test]
    fn test_remove_bucket_cascades_answer_key() {
        let mut draft = filled_draft();
        let b1 = draft.buckets()[0].id;
        let c1 = draft.cards()[0].id;
        assert_eq!(draft.answer_for(c1), Some(b1));

        draft.remove_bucket(b1);
        assert_eq!(draft.answer_for(c1), None);
    }

    #[test]
    fn test_remove_card_cascades_answer_key() {
        let mut draft = filled_draft();
        let c1 = draft.cards()[0].id;
        draft.remove_card(c1);
        assert_eq!(draft.answer_for(c1), None);
        assert_eq!(draft.cards().len(), 1);
    }

    #[test]
    fn test_cascade_survives_add_remove_cycles() {
        let mut draft = filled_draft();
        let c1 = draft.cards()[0].id;
        let b1 = draft.buckets()[0].id;

        // Remove and re-add buckets repeatedly; the key must only ever
        // reference live ids.
        for _ in 0..3 {
            let b = draft.add_bucket();
            draft.update_bucket_label(b, "Temp");
            draft.remove_bucket(b);
        }
        assert_eq!(draft.answer_for(c1), Some(b1));

        draft.remove_bucket(b1);
        draft.set_answer(c1, Some(b1));
        // b1 no longer exists, so the assignment is refused.
        assert_eq!(draft.answer_for(c1), None);
    }

    #[test]
    fn test_build_trims_and_mints_step() {
        let mut draft = filled_draft();
        draft.set_title("  Framework sorting  ");
        let step = draft.build(Utc::now()).expect("build");

        assert_eq!(step.title(), "Framework sorting");
        let def = step.sorting().expect("sorting content");
        assert_eq!(def.buckets().len(), 2);
        assert_eq!(def.answer_key().len(), 2);
        assert!(def.validate().is_ok());
    }

    #[test]
    fn test_build_fails_while_invalid() {
        let mut draft = SortingDraft::new(ModuleId::new(), UserId::new());
        assert!(draft.build(Utc::now()).is_err());
        // A failed save still counts as interaction for error display.
        assert!(draft.touched());
    }

    #[test]
    fn test_edit_round_trip_preserves_definition() {
        let mut draft = filled_draft();
        let saved = draft.build(Utc::now()).expect("build");

        let mut reopened = SortingDraft::edit(&saved).expect("edit");
        let resaved = reopened.build(Utc::now()).expect("rebuild");

        assert_eq!(resaved.id(), saved.id());
        assert_eq!(resaved.created_at(), saved.created_at());
        assert_eq!(saved.sorting(), resaved.sorting());
    }

    #[test]
    fn test_edit_rejects_non_sorting_step() {
        let step = Step::new(
            ModuleId::new(),
            "Watch this",
            UserId::new(),
            StepContent::Video {
                youtube_url: "https://youtu.be/x".into(),
                thumbnail_url: None,
                duration_sec: None,
            },
            Utc::now(),
        );
        assert!(SortingDraft::edit(&step).is_err());
    }
}
