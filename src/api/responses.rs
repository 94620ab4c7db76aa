// src/api/responses.rs
//! Request and response bodies exchanged with the Notion API.

use crate::constants::NOTION_API_PAGE_SIZE;
use crate::model::{Parent, Properties, PropertySchema, RichText};
use serde::{Deserialize, Serialize};

// Notion's error body; parsed with notion-client's type.
pub use notion_client::objects::error::Error as NotionError;

/// Generic paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// A final page holding `results`.
    pub fn last(results: Vec<T>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: None,
            has_more: false,
        }
    }

    /// A page followed by more results at `cursor`.
    pub fn with_more(results: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: Some(cursor.into()),
            has_more: true,
        }
    }
}

/// Body of `POST /pages`, used for plain pages and database records alike.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePageRequest {
    pub parent: Parent,
    pub properties: Properties,
}

/// Body of `POST /databases`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDatabaseRequest {
    pub parent: Parent,
    pub title: Vec<RichText>,
    pub properties: PropertySchema,
}

/// Body of `PATCH /pages/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Body of `POST /databases/{id}/query`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDatabaseRequest {
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

impl Default for QueryDatabaseRequest {
    fn default() -> Self {
        Self {
            page_size: NOTION_API_PAGE_SIZE,
            filter: None,
            sorts: Vec::new(),
            start_cursor: None,
        }
    }
}
