// src/model/properties.rs
//! Property values of pages and database records.
//!
//! Notion sends and accepts properties as objects tagged by a `type`
//! marker. The markers this backend understands are typed; anything else
//! round-trips untouched through [`PropertyValue::Opaque`].

use super::RichText;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Property payload of a page, keyed by property name in insertion order.
pub type Properties = IndexMap<String, PropertyValue>;

/// Option of a `select`, `multi_select` or `status` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl SelectOption {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            color: None,
        }
    }
}

/// Date range as ISO-8601 strings; Notion mixes dates and datetimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// Value of an auto-numbered `unique_id` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueIdValue {
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub number: Option<u64>,
}

/// Properties whose `type` marker this backend knows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypedProperty {
    Title { title: Vec<RichText> },
    RichText { rich_text: Vec<RichText> },
    Number { number: Option<f64> },
    Select { select: Option<SelectOption> },
    MultiSelect { multi_select: Vec<SelectOption> },
    Status { status: Option<SelectOption> },
    Checkbox { checkbox: bool },
    Url { url: Option<String> },
    Email { email: Option<String> },
    PhoneNumber { phone_number: Option<String> },
    Date { date: Option<DateValue> },
    UniqueId { unique_id: UniqueIdValue },
}

impl TypedProperty {
    /// The Notion `type` marker of this property.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::RichText { .. } => "rich_text",
            Self::Number { .. } => "number",
            Self::Select { .. } => "select",
            Self::MultiSelect { .. } => "multi_select",
            Self::Status { .. } => "status",
            Self::Checkbox { .. } => "checkbox",
            Self::Url { .. } => "url",
            Self::Email { .. } => "email",
            Self::PhoneNumber { .. } => "phone_number",
            Self::Date { .. } => "date",
            Self::UniqueId { .. } => "unique_id",
        }
    }
}

/// A property value, typed when the marker is known and opaque otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Typed(TypedProperty),
    Opaque(serde_json::Value),
}

impl PropertyValue {
    pub fn title(text: impl Into<String>) -> Self {
        Self::Typed(TypedProperty::Title {
            title: vec![RichText::text(text)],
        })
    }

    pub fn rich_text(text: impl Into<String>) -> Self {
        Self::Typed(TypedProperty::RichText {
            rich_text: vec![RichText::text(text)],
        })
    }

    pub fn number(value: f64) -> Self {
        Self::Typed(TypedProperty::Number {
            number: Some(value),
        })
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self::Typed(TypedProperty::Select {
            select: Some(SelectOption::named(name)),
        })
    }

    pub fn checkbox(value: bool) -> Self {
        Self::Typed(TypedProperty::Checkbox { checkbox: value })
    }

    /// The `type` marker, read from the payload for opaque values.
    pub fn type_marker(&self) -> Option<&str> {
        match self {
            Self::Typed(typed) => Some(typed.type_name()),
            Self::Opaque(value) => value.get("type").and_then(|t| t.as_str()),
        }
    }

    /// Whether Notion computes this value itself and rejects writes to it.
    pub fn is_unique_id(&self) -> bool {
        self.type_marker() == Some("unique_id")
    }
}

/// Drops every `unique_id` property; Notion refuses direct writes to them.
pub fn strip_unique_id_properties(properties: Properties) -> Properties {
    properties
        .into_iter()
        .filter(|(name, value)| {
            let keep = !value.is_unique_id();
            if !keep {
                log::debug!("Dropping unique_id property '{}' from write", name);
            }
            keep
        })
        .collect()
}
