//! Module entity - an ordered collection of learning steps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ModuleId, UserId};

/// A published or draft learning module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    id: ModuleId,
    title: String,
    description: String,
    created_by: UserId,
    #[serde(default)]
    collaborators: Vec<UserId>,
    is_public: bool,
    #[serde(default)]
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    step_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thumbnail_url: Option<String>,
    /// Display order on the student landing page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<u32>,
}

impl Module {
    pub fn new(title: impl Into<String>, created_by: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: ModuleId::new(),
            title: title.into(),
            description: String::new(),
            created_by,
            collaborators: Vec::new(),
            is_public: false,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            step_count: 0,
            thumbnail_url: None,
            order: None,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    pub fn collaborators(&self) -> &[UserId] {
        &self.collaborators
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    pub fn order(&self) -> Option<u32> {
        self.order
    }

    /// Whether the given user may author steps in this module.
    pub fn can_edit(&self, user: UserId) -> bool {
        self.created_by == user || self.collaborators.contains(&user)
    }

    // === Builder Methods ===

    pub fn with_id(mut self, id: ModuleId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_collaborator(mut self, user: UserId) -> Self {
        self.collaborators.push(user);
        self
    }

    pub fn with_is_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_step_count(mut self, step_count: u32) -> Self {
        self.step_count = step_count;
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }
}
