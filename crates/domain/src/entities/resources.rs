//! Resource list content with legacy document tolerance
//!
//! Old resource-list documents carried a single `link` and `pdf` URL pair.
//! Newer documents carry an `all` array of named resources. Deserialization
//! normalizes either shape into the canonical `Vec<Resource>` once, at the
//! boundary; nothing downstream branches on format.

use serde::{Deserialize, Serialize};

use crate::ids::ResourceId;

/// Kind of external resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Link,
    Pdf,
}

impl ResourceKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Link => "External Link",
            Self::Pdf => "PDF Document",
        }
    }
}

/// A single named resource attached to a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

impl Resource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: ResourceId::new(),
            name: name.into(),
            url: url.into(),
            kind,
        }
    }
}

/// Canonical resource list
///
/// Always holds the normalized form; the legacy single link/pdf shape only
/// exists transiently inside deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawResourceList", rename_all = "camelCase")]
pub struct ResourceList {
    pub all: Vec<Resource>,
}

impl ResourceList {
    pub fn new(all: Vec<Resource>) -> Self {
        Self { all }
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }
}

/// Wire shape accepting both document generations.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResourceList {
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    pdf: Option<String>,
    #[serde(default)]
    all: Option<Vec<Resource>>,
}

impl From<RawResourceList> for ResourceList {
    fn from(raw: RawResourceList) -> Self {
        // The array form wins when present, even if empty: an author who
        // deleted every resource should not resurrect the legacy pair.
        if let Some(all) = raw.all {
            return Self { all };
        }

        let mut all = Vec::new();
        if let Some(link) = raw.link.filter(|l| !l.trim().is_empty()) {
            all.push(Resource::new("External Link", link, ResourceKind::Link));
        }
        if let Some(pdf) = raw.pdf.filter(|p| !p.trim().is_empty()) {
            all.push(Resource::new("PDF Document", pdf, ResourceKind::Pdf));
        }
        Self { all }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_shape_normalizes_to_list() {
        let json = r#"{"link":"https://example.org/reading","pdf":"https://example.org/case.pdf"}"#;
        let list: ResourceList = serde_json::from_str(json).expect("deserialize");

        assert_eq!(list.len(), 2);
        assert_eq!(list.all[0].kind, ResourceKind::Link);
        assert_eq!(list.all[0].url, "https://example.org/reading");
        assert_eq!(list.all[1].kind, ResourceKind::Pdf);
    }

    #[test]
    fn test_legacy_shape_skips_blank_urls() {
        let json = r#"{"link":"","pdf":"https://example.org/case.pdf"}"#;
        let list: ResourceList = serde_json::from_str(json).expect("deserialize");

        assert_eq!(list.len(), 1);
        assert_eq!(list.all[0].kind, ResourceKind::Pdf);
    }

    #[test]
    fn test_new_shape_wins_over_legacy_fields() {
        let json = r#"{"link":"https://stale.example.org","all":[]}"#;
        let list: ResourceList = serde_json::from_str(json).expect("deserialize");
        assert!(list.is_empty());
    }

    #[test]
    fn test_new_shape_round_trips() {
        let list = ResourceList::new(vec![Resource::new(
            "Case packet",
            "https://example.org/packet.pdf",
            ResourceKind::Pdf,
        )]);
        let json = serde_json::to_string(&list).expect("serialize");
        let back: ResourceList = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(list, back);
    }
}
