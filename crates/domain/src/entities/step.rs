//! Step entity - a single learning activity inside a module
//!
//! A step couples shared metadata (title, ordering, authorship, timestamps)
//! with type-specific content. The persisted document carries a `type` tag
//! discriminating the content payload, mirrored here as an internally tagged
//! enum flattened into the step document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ResourceList, SortingDefinition};
use crate::ids::{ModuleId, OptionId, StepId, UserId};

/// A single multiple-choice quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
    /// Per-choice explanations, aligned by index with `choices`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice_explanations: Option<Vec<Option<String>>>,
    /// Legacy question-level explanation, kept for old documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A two-sided study card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// How a flashcard deck is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    Spaced,
    Random,
}

/// One votable option in a poll step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOption {
    pub id: OptionId,
    pub text: String,
    pub votes: u64,
}

impl PollOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: OptionId::new(),
            text: text.into(),
            votes: 0,
        }
    }
}

/// Type-specific step content, tagged by the persisted `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum StepContent {
    Video {
        youtube_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thumbnail_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_sec: Option<u32>,
    },
    Quiz {
        shuffle: bool,
        questions: Vec<QuizQuestion>,
        passing_score: u32,
    },
    Flashcards {
        cards: Vec<Flashcard>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        study_mode: Option<StudyMode>,
    },
    FreeResponse {
        prompt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sample_answer: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
    },
    Sorting(SortingDefinition),
    Poll {
        question: String,
        options: Vec<PollOption>,
        allow_multiple_choice: bool,
    },
    #[serde(rename = "additionalResources")]
    Resources { resources: ResourceList },
}

impl StepContent {
    pub fn kind(&self) -> StepKind {
        match self {
            Self::Video { .. } => StepKind::Video,
            Self::Quiz { .. } => StepKind::Quiz,
            Self::Flashcards { .. } => StepKind::Flashcards,
            Self::FreeResponse { .. } => StepKind::FreeResponse,
            Self::Sorting(_) => StepKind::Sorting,
            Self::Poll { .. } => StepKind::Poll,
            Self::Resources { .. } => StepKind::Resources,
        }
    }
}

/// Discriminant of a step's content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    Video,
    Quiz,
    Flashcards,
    FreeResponse,
    Sorting,
    Poll,
    #[serde(rename = "additionalResources")]
    Resources,
}

impl StepKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Quiz => "Quiz",
            Self::Flashcards => "Flashcards",
            Self::FreeResponse => "Free Response",
            Self::Sorting => "Sorting",
            Self::Poll => "Poll",
            Self::Resources => "Additional Resources",
        }
    }

    /// Backend subcollection name this step kind is stored under.
    pub fn collection_name(&self) -> &'static str {
        match self {
            Self::Video => "videos",
            Self::Quiz => "quizzes",
            Self::Flashcards => "flashcards",
            Self::FreeResponse => "freeResponses",
            Self::Sorting => "sorting",
            Self::Poll => "polls",
            Self::Resources => "additionalResources",
        }
    }
}

/// A learning step within a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    id: StepId,
    module_id: ModuleId,
    title: String,
    order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    estimated_minutes: Option<u32>,
    is_optional: bool,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(flatten)]
    content: StepContent,
}

impl Step {
    pub fn new(
        module_id: ModuleId,
        title: impl Into<String>,
        created_by: UserId,
        content: StepContent,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: StepId::new(),
            module_id,
            title: title.into(),
            order: 0,
            estimated_minutes: None,
            is_optional: false,
            created_by,
            created_at: now,
            updated_at: now,
            content,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> StepId {
        self.id
    }

    pub fn module_id(&self) -> ModuleId {
        self.module_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn estimated_minutes(&self) -> Option<u32> {
        self.estimated_minutes
    }

    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn content(&self) -> &StepContent {
        &self.content
    }

    pub fn kind(&self) -> StepKind {
        self.content.kind()
    }

    /// The sorting definition, when this is a sorting step.
    pub fn sorting(&self) -> Option<&SortingDefinition> {
        match &self.content {
            StepContent::Sorting(def) => Some(def),
            _ => None,
        }
    }

    // === Builder Methods ===

    /// Set the step ID (used when loading from the backend).
    pub fn with_id(mut self, id: StepId) -> Self {
        self.id = id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn with_estimated_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    pub fn with_is_optional(mut self, is_optional: bool) -> Self {
        self.is_optional = is_optional;
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    // === Mutators ===

    /// Replace the content and bump `updated_at`.
    pub fn update_content(&mut self, content: StepContent, now: DateTime<Utc>) {
        self.content = content;
        self.updated_at = now;
    }

    pub fn rename(&mut self, title: impl Into<String>, now: DateTime<Utc>) {
        self.title = title.into();
        self.updated_at = now;
    }

    pub fn set_is_optional(&mut self, is_optional: bool, now: DateTime<Utc>) {
        self.is_optional = is_optional;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{SortingBucket, SortingCard};

    fn sorting_step() -> Step {
        let def = SortingDefinition::new("Sort the claims.")
            .with_bucket(SortingBucket::new("Utilitarian"))
            .with_bucket(SortingBucket::new("Deontological"))
            .with_card(SortingCard::new("Maximize happiness."))
            .with_card(SortingCard::new("Duty above outcomes."));
        Step::new(
            ModuleId::new(),
            "Sorting Question",
            UserId::new(),
            StepContent::Sorting(def),
            Utc::now(),
        )
    }

    #[test]
    fn test_step_kind_and_collection() {
        let step = sorting_step();
        assert_eq!(step.kind(), StepKind::Sorting);
        assert_eq!(step.kind().collection_name(), "sorting");
        assert!(step.sorting().is_some());
    }

    #[test]
    fn test_step_serializes_with_type_tag() {
        let step = sorting_step();
        let json = serde_json::to_value(&step).expect("serialize");
        assert_eq!(json["type"], "sorting");
        assert!(json["buckets"].is_array());
        assert!(json["moduleId"].is_string());
    }

    #[test]
    fn test_step_round_trips() {
        let step = sorting_step().with_order(3).with_estimated_minutes(5);
        let json = serde_json::to_string(&step).expect("serialize");
        let back: Step = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(step, back);
    }

    #[test]
    fn test_resources_tag_matches_legacy_collection() {
        let step = Step::new(
            ModuleId::new(),
            "Extra reading",
            UserId::new(),
            StepContent::Resources {
                resources: ResourceList::default(),
            },
            Utc::now(),
        );
        let json = serde_json::to_value(&step).expect("serialize");
        assert_eq!(json["type"], "additionalResources");
    }

    #[test]
    fn test_update_content_bumps_updated_at() {
        let mut step = sorting_step();
        let created = step.created_at();
        let later = created + chrono::Duration::minutes(5);
        let content = step.content().clone();
        step.update_content(content, later);
        assert_eq!(step.updated_at(), later);
        assert_eq!(step.created_at(), created);
    }
}
