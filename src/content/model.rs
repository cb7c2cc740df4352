//! Content tree types as they appear in the help center document.
//!
//! The document is not validated. Missing slugs and titles read as empty
//! strings, missing collections as empty vectors.

use serde::{Deserialize, Serialize};

/// A top-level help area, e.g. "Maintenance & care"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCategory")]
pub struct Category {
    pub slug: String,
    /// Display title; documents may call this field `category` or `title`
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Call-to-action label shown on the category card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// Category as written in the document. `category` and `title` may both be
/// present; `category` wins.
#[derive(Deserialize)]
struct RawCategory {
    #[serde(default)]
    slug: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    cta: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    topics: Vec<Topic>,
}

impl From<RawCategory> for Category {
    fn from(raw: RawCategory) -> Self {
        Self {
            slug: raw.slug,
            title: raw.category.or(raw.title).unwrap_or_default(),
            subtitle: raw.subtitle,
            cta: raw.cta,
            icon: raw.icon,
            topics: raw.topics,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A single instruction within a topic. Identified by its position only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub action_type: ActionType,
    #[serde(default)]
    pub is_critical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

impl Step {
    /// Whether the step offers a done checkbox
    pub fn is_completable(&self) -> bool {
        matches!(
            self.action_type,
            ActionType::Checklist | ActionType::Diagnosis
        )
    }
}

/// Interaction affordance a step exposes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ActionType {
    #[default]
    Checklist,
    Diagnosis,
    Contact,
    Link,
}

impl From<String> for ActionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "diagnosis" => ActionType::Diagnosis,
            "contact" => ActionType::Contact,
            "link" => ActionType::Link,
            _ => ActionType::Checklist,
        }
    }
}

impl ActionType {
    /// Badge label shown next to a step
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::Checklist => "Checklist",
            ActionType::Diagnosis => "Diagnosis",
            ActionType::Contact => "Contact",
            ActionType::Link => "Link",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
