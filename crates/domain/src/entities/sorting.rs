//! Sorting step definition - buckets, cards, and the optional answer key
//!
//! The definition is authored in the editor and later rendered by the
//! interaction engine. The two never run at the same time; this type is the
//! shape they share.
//!
//! The answer key may reference ids that no longer exist in `buckets` or
//! `cards` (a bucket or card was removed after the key was set). Both
//! consumers sanitize independently before use rather than trusting the
//! stored document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{BucketId, CardId};

/// A labeled drop target in a sorting question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingBucket {
    pub id: BucketId,
    pub label: String,
}

impl SortingBucket {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: BucketId::new(),
            label: label.into(),
        }
    }
}

/// A draggable card in a sorting question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingCard {
    pub id: CardId,
    pub text: String,
}

impl SortingCard {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: CardId::new(),
            text: text.into(),
        }
    }
}

/// The authored content of a sorting question
///
/// Invariants enforced by the editor before save (and checked again by
/// `validate`): non-empty prompt, non-empty unique labels/texts, and an
/// answer key that only references present ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingDefinition {
    prompt: String,
    buckets: Vec<SortingBucket>,
    cards: Vec<SortingCard>,
    #[serde(default)]
    answer_key: BTreeMap<CardId, BucketId>,
}

impl SortingDefinition {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            buckets: Vec::new(),
            cards: Vec::new(),
            answer_key: BTreeMap::new(),
        }
    }

    // === Accessors ===

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn buckets(&self) -> &[SortingBucket] {
        &self.buckets
    }

    pub fn cards(&self) -> &[SortingCard] {
        &self.cards
    }

    pub fn answer_key(&self) -> &BTreeMap<CardId, BucketId> {
        &self.answer_key
    }

    pub fn has_bucket(&self, id: BucketId) -> bool {
        self.buckets.iter().any(|b| b.id == id)
    }

    pub fn has_card(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    // === Builder Methods ===

    pub fn with_bucket(mut self, bucket: SortingBucket) -> Self {
        self.buckets.push(bucket);
        self
    }

    pub fn with_card(mut self, card: SortingCard) -> Self {
        self.cards.push(card);
        self
    }

    pub fn with_buckets(mut self, buckets: Vec<SortingBucket>) -> Self {
        self.buckets = buckets;
        self
    }

    pub fn with_cards(mut self, cards: Vec<SortingCard>) -> Self {
        self.cards = cards;
        self
    }

    pub fn with_answer(mut self, card: CardId, bucket: BucketId) -> Self {
        self.answer_key.insert(card, bucket);
        self
    }

    pub fn with_answer_key(mut self, answer_key: BTreeMap<CardId, BucketId>) -> Self {
        self.answer_key = answer_key;
        self
    }

    // === Answer key sanitization ===

    /// The answer key with dangling entries stripped.
    ///
    /// An entry is dangling when its card id is not in `cards` or its bucket
    /// id is not in `buckets`. Such entries are an expected consequence of
    /// editing, not an error.
    pub fn sanitized_answer_key(&self) -> BTreeMap<CardId, BucketId> {
        self.answer_key
            .iter()
            .filter(|(card, bucket)| self.has_card(**card) && self.has_bucket(**bucket))
            .map(|(card, bucket)| (*card, *bucket))
            .collect()
    }

    /// Strip dangling answer key entries in place.
    pub fn sanitize_answer_key(&mut self) {
        self.answer_key = self.sanitized_answer_key();
    }

    /// Whether any card has a known correct bucket after sanitization.
    pub fn has_answer_key(&self) -> bool {
        !self.sanitized_answer_key().is_empty()
    }

    /// The correct bucket for a card, if one is recorded and still valid.
    pub fn answer_for(&self, card: CardId) -> Option<BucketId> {
        let bucket = *self.answer_key.get(&card)?;
        (self.has_card(card) && self.has_bucket(bucket)).then_some(bucket)
    }

    /// Check the stored invariants without mutating.
    ///
    /// The editor prevents invalid definitions from being saved; this is the
    /// backstop for documents arriving from outside.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.prompt.trim().is_empty() {
            return Err(DomainError::validation("Sorting prompt cannot be empty"));
        }
        if self.buckets.iter().any(|b| b.label.trim().is_empty()) {
            return Err(DomainError::validation("Bucket labels cannot be empty"));
        }
        if self.cards.iter().any(|c| c.text.trim().is_empty()) {
            return Err(DomainError::validation("Card text cannot be empty"));
        }
        if has_duplicates(self.buckets.iter().map(|b| b.label.as_str())) {
            return Err(DomainError::validation("Bucket labels must be unique"));
        }
        if has_duplicates(self.cards.iter().map(|c| c.text.as_str())) {
            return Err(DomainError::validation("Card texts must be unique"));
        }
        Ok(())
    }
}

/// Case-insensitive, whitespace-trimmed duplicate check.
///
/// Empty values are skipped; they are reported by the emptiness checks
/// instead of doubling up as duplicates.
pub fn has_duplicates<'a>(values: impl Iterator<Item = &'a str>) -> bool {
    let cleaned: Vec<String> = values
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect();
    let unique: std::collections::BTreeSet<&String> = cleaned.iter().collect();
    unique.len() != cleaned.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> SortingDefinition {
        SortingDefinition::new("Sort each claim into its ethical framework.")
            .with_bucket(SortingBucket::new("Utilitarian"))
            .with_bucket(SortingBucket::new("Deontological"))
            .with_card(SortingCard::new("Maximize total happiness."))
            .with_card(SortingCard::new("Never lie, even if it would help."))
    }

    #[test]
    fn test_sanitize_strips_dangling_card() {
        let def = definition();
        let ghost = CardId::new();
        let bucket = def.buckets()[0].id;
        let def = def.with_answer(ghost, bucket);

        let cleaned = def.sanitized_answer_key();
        assert!(cleaned.is_empty());
    }

    #[test]
    fn test_sanitize_strips_dangling_bucket() {
        let def = definition();
        let card = def.cards()[0].id;
        let def = def.with_answer(card, BucketId::new());

        assert!(def.sanitized_answer_key().is_empty());
        assert_eq!(def.answer_for(card), None);
    }

    #[test]
    fn test_sanitize_keeps_valid_entries() {
        let def = definition();
        let card = def.cards()[0].id;
        let bucket = def.buckets()[1].id;
        let def = def.with_answer(card, bucket);

        assert_eq!(def.answer_for(card), Some(bucket));
        assert!(def.has_answer_key());
    }

    #[test]
    fn test_sanitize_in_place_is_idempotent() {
        let mut def = definition().with_answer(CardId::new(), BucketId::new());
        def.sanitize_answer_key();
        let once = def.answer_key().clone();
        def.sanitize_answer_key();
        assert_eq!(&once, def.answer_key());
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        assert!(definition().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_labels() {
        let def = SortingDefinition::new("prompt")
            .with_bucket(SortingBucket::new("Utilitarian"))
            .with_bucket(SortingBucket::new("utilitarian "));
        assert!(matches!(
            def.validate(),
            Err(DomainError::Validation(msg)) if msg.contains("unique")
        ));
    }

    #[test]
    fn test_validate_rejects_empty_prompt() {
        let def = SortingDefinition::new("   ");
        assert!(def.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip_preserves_order_and_key() {
        let def = definition();
        let card = def.cards()[0].id;
        let bucket = def.buckets()[0].id;
        let def = def.with_answer(card, bucket);

        let json = serde_json::to_string(&def).expect("serialize");
        let back: SortingDefinition = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(def, back);
        assert!(json.contains("answerKey"));
    }

    #[test]
    fn test_has_duplicates_normalizes() {
        assert!(has_duplicates(["A", " a "].into_iter()));
        assert!(!has_duplicates(["A", "B"].into_iter()));
        // Empty strings are not counted as duplicates of each other.
        assert!(!has_duplicates(["", ""].into_iter()));
    }
}
