// src/model/mod.rs
//! Wire model of the Notion objects this backend reads and writes.
//!
//! Only the fields the backend needs are typed; everything else Notion
//! sends is either ignored or carried along opaquely.

mod properties;
mod schema;

pub use properties::{
    strip_unique_id_properties, DateValue, Properties, PropertyValue, SelectOption,
    TypedProperty, UniqueIdValue,
};
pub use schema::PropertySchema;

use crate::types::NotionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two kinds of named resources that can be resolved by title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Page,
    Database,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page => write!(f, "page"),
            Self::Database => write!(f, "database"),
        }
    }
}

/// Where a page or database lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parent {
    PageId { page_id: NotionId },
    DatabaseId { database_id: NotionId },
    BlockId { block_id: NotionId },
    Workspace { workspace: bool },
}

impl Parent {
    pub fn page(id: &NotionId) -> Self {
        Self::PageId {
            page_id: id.clone(),
        }
    }

    pub fn database(id: &NotionId) -> Self {
        Self::DatabaseId {
            database_id: id.clone(),
        }
    }
}

/// Text payload of a `text` rich-text segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<serde_json::Value>,
}

/// One rich-text segment. Annotations, mentions and the like are kept
/// verbatim in `rest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl RichText {
    /// A plain `text` segment, the shape Notion expects on writes.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: Some("text".to_string()),
            text: Some(TextContent {
                content: content.into(),
                link: None,
            }),
            plain_text: None,
            rest: serde_json::Map::new(),
        }
    }

    /// The visible text: `plain_text` when Notion supplied it, else the
    /// text content.
    pub fn plain(&self) -> &str {
        self.plain_text
            .as_deref()
            .or_else(|| self.text.as_ref().map(|t| t.content.as_str()))
            .unwrap_or("")
    }
}

/// Concatenates the visible text of rich-text segments.
pub fn plain_text(segments: &[RichText]) -> String {
    segments.iter().map(RichText::plain).collect()
}

/// A Notion page. Records of a database are pages whose parent is the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: NotionId,
    #[serde(default)]
    pub parent: Option<Parent>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,
}

impl Page {
    /// The text of the page's title property, if it has one.
    pub fn title(&self) -> Option<String> {
        self.properties.values().find_map(|value| match value {
            PropertyValue::Typed(TypedProperty::Title { title }) => Some(plain_text(title)),
            _ => None,
        })
    }
}

/// A Notion database with its property schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub id: NotionId,
    #[serde(default)]
    pub title: Vec<RichText>,
    #[serde(default)]
    pub parent: Option<Parent>,
    #[serde(default)]
    pub properties: indexmap::IndexMap<String, serde_json::Value>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub url: Option<String>,
}

impl Database {
    /// The database title as plain text.
    pub fn title_text(&self) -> String {
        plain_text(&self.title)
    }
}

/// Title carried by `child_page` and `child_database` blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTitle {
    #[serde(default)]
    pub title: String,
}

/// An entry of a "list block children" response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildBlock {
    pub id: NotionId,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_page: Option<ChildTitle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_database: Option<ChildTitle>,
}

impl ChildBlock {
    pub fn child_page(id: NotionId, title: impl Into<String>) -> Self {
        Self {
            id,
            block_type: "child_page".to_string(),
            child_page: Some(ChildTitle {
                title: title.into(),
            }),
            child_database: None,
        }
    }

    pub fn child_database(id: NotionId, title: impl Into<String>) -> Self {
        Self {
            id,
            block_type: "child_database".to_string(),
            child_page: None,
            child_database: Some(ChildTitle {
                title: title.into(),
            }),
        }
    }

    /// Which resolvable kind this block is, if any.
    pub fn resource_kind(&self) -> Option<ResourceKind> {
        match self.block_type.as_str() {
            "child_page" => Some(ResourceKind::Page),
            "child_database" => Some(ResourceKind::Database),
            _ => None,
        }
    }

    /// Title of a `child_page` block.
    pub fn page_title(&self) -> Option<&str> {
        self.child_page.as_ref().map(|c| c.title.as_str())
    }
}

/// The child pages every project root must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectSection {
    Datasets,
    Experiments,
    Comparisons,
}

impl ProjectSection {
    pub const ALL: [ProjectSection; 3] = [Self::Datasets, Self::Experiments, Self::Comparisons];

    /// Exact page title of the section.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Datasets => "Datasets",
            Self::Experiments => "Experiments",
            Self::Comparisons => "Comparisons",
        }
    }
}

impl fmt::Display for ProjectSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
