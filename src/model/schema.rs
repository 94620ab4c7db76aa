use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Property schema of a database being created: property name to type spec.
///
/// The builder methods cover the columns projects usually need; `with`
/// accepts any spec Notion understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySchema(IndexMap<String, Value>);

impl PropertySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, spec: Value) -> Self {
        self.0.insert(name.into(), spec);
        self
    }

    /// Every Notion database needs exactly one title column.
    pub fn title(self, name: impl Into<String>) -> Self {
        self.with(name, json!({ "title": {} }))
    }

    pub fn rich_text(self, name: impl Into<String>) -> Self {
        self.with(name, json!({ "rich_text": {} }))
    }

    pub fn number(self, name: impl Into<String>) -> Self {
        self.with(name, json!({ "number": { "format": "number" } }))
    }

    pub fn checkbox(self, name: impl Into<String>) -> Self {
        self.with(name, json!({ "checkbox": {} }))
    }

    pub fn url(self, name: impl Into<String>) -> Self {
        self.with(name, json!({ "url": {} }))
    }

    pub fn select<I, S>(self, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<Value> = options
            .into_iter()
            .map(|option| {
                let name: String = option.into();
                json!({ "name": name })
            })
            .collect();
        self.with(name, json!({ "select": { "options": options } }))
    }

    /// Auto-numbered ID column, optionally prefixed (e.g. `EXP-12`).
    pub fn unique_id(self, name: impl Into<String>, prefix: Option<&str>) -> Self {
        self.with(name, json!({ "unique_id": { "prefix": prefix } }))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl From<IndexMap<String, Value>> for PropertySchema {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self(map)
    }
}
