// src/backend/records.rs
//! Creating, updating and querying pages and databases.

use super::NotionBackend;
use crate::api::fetch_all_pages;
use crate::api::responses::{
    CreateDatabaseRequest, CreatePageRequest, QueryDatabaseRequest, UpdatePageRequest,
};
use crate::error::BackendError;
use crate::model::{
    strip_unique_id_properties, Database, Page, Parent, Properties, PropertySchema,
    PropertyValue, RichText,
};
use crate::types::NotionId;

/// Options for [`NotionBackend::query_database`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Notion filter object, passed through as-is.
    pub filter: Option<serde_json::Value>,
    /// Notion sort objects, passed through as-is.
    pub sorts: Vec<serde_json::Value>,
    /// Return archived records instead of live ones.
    pub archived: bool,
}

impl QueryOptions {
    pub fn with_filter(mut self, filter: serde_json::Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_sort(mut self, sort: serde_json::Value) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }
}

impl NotionBackend {
    /// Creates a child page titled `title` and returns its ID.
    ///
    /// Fails with [`BackendError::ParentNotFound`] before sending anything
    /// if the parent page cannot be retrieved.
    pub async fn create_new_page(
        &self,
        parent_page_id: &NotionId,
        title: &str,
    ) -> Result<NotionId, BackendError> {
        if !self.page_exists(parent_page_id).await {
            return Err(BackendError::ParentNotFound {
                parent_id: parent_page_id.to_string(),
            });
        }

        let mut properties = Properties::new();
        properties.insert("title".to_string(), PropertyValue::title(title));
        let request = CreatePageRequest {
            parent: Parent::page(parent_page_id),
            properties,
        };

        let page = self.transport().create_page(&request).await?;
        log::info!("Created page '{}' ({}) under {}", title, page.id, parent_page_id);
        Ok(page.id)
    }

    /// Creates a database under a page and returns its ID. The parent is
    /// not checked first.
    pub async fn create_new_database(
        &self,
        parent_page_id: &NotionId,
        title: &str,
        properties: PropertySchema,
    ) -> Result<NotionId, BackendError> {
        let request = CreateDatabaseRequest {
            parent: Parent::page(parent_page_id),
            title: vec![RichText::text(title)],
            properties,
        };

        let database = self.transport().create_database(&request).await?;
        log::info!(
            "Created database '{}' ({}) under {}",
            title,
            database.id,
            parent_page_id
        );
        Ok(database.id)
    }

    pub async fn get_database(&self, database_id: &NotionId) -> Result<Database, BackendError> {
        self.transport().retrieve_database(database_id).await
    }

    /// Adds a record to a database.
    ///
    /// `parent` overrides where the page is created; it defaults to the
    /// database itself. `unique_id` properties are dropped before sending.
    pub async fn create_page_in_database(
        &self,
        database_id: &NotionId,
        properties: Properties,
        parent: Option<Parent>,
    ) -> Result<Page, BackendError> {
        let request = CreatePageRequest {
            parent: parent.unwrap_or_else(|| Parent::database(database_id)),
            properties: strip_unique_id_properties(properties),
        };

        let page = self.transport().create_page(&request).await?;
        log::info!("Created record {} in database {}", page.id, database_id);
        Ok(page)
    }

    /// Updates a page's properties and/or archives it, in a single request.
    ///
    /// `unique_id` properties are dropped. Properties are sent only when
    /// some are given, and `archived` only when it is `true`.
    pub async fn update_page(
        &self,
        page_id: &NotionId,
        properties: Option<Properties>,
        archived: bool,
    ) -> Result<Page, BackendError> {
        let request = UpdatePageRequest {
            properties: properties
                .filter(|props| !props.is_empty())
                .map(strip_unique_id_properties),
            archived: archived.then_some(true),
        };

        let page = self.transport().update_page(page_id, &request).await?;
        log::debug!("Updated page {} (archived: {})", page.id, page.archived);
        Ok(page)
    }

    /// Returns every record of a database matching `options`.
    ///
    /// Walks all result pages, then keeps only records whose archived flag
    /// equals `options.archived`.
    pub async fn query_database(
        &self,
        database_id: &NotionId,
        options: QueryOptions,
    ) -> Result<Vec<Page>, BackendError> {
        let QueryOptions {
            filter,
            sorts,
            archived,
        } = options;
        let transport = self.transport();

        let result = fetch_all_pages(move |cursor| {
            let request = QueryDatabaseRequest {
                filter: filter.clone(),
                sorts: sorts.clone(),
                start_cursor: cursor,
                ..QueryDatabaseRequest::default()
            };
            async move { transport.query_database(database_id, &request).await }
        })
        .await?;

        let total = result.items.len();
        let records: Vec<Page> = result
            .items
            .into_iter()
            .filter(|page| page.archived == archived)
            .collect();
        log::debug!(
            "Query of {} returned {} of {} records (archived: {})",
            database_id,
            records.len(),
            total,
            archived
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_options_builder() {
        let options = QueryOptions::default()
            .with_filter(json!({ "property": "Split", "select": { "equals": "test" } }))
            .with_sort(json!({ "timestamp": "created_time", "direction": "ascending" }))
            .archived(true);

        assert!(options.archived);
        assert_eq!(options.sorts.len(), 1);
        assert_eq!(options.filter.unwrap()["select"]["equals"], "test");
    }
}
