// src/api/mod.rs
//! Notion API interaction.
//!
//! [`NotionTransport`] is the request/response contract the backend relies
//! on. [`NotionHttpClient`] fulfils it over HTTPS; tests substitute their own.

pub mod client;
mod pagination;
pub mod parser;
pub mod responses;

use crate::error::BackendError;
use crate::model::{ChildBlock, Database, Page};
use crate::types::NotionId;
use responses::{
    CreateDatabaseRequest, CreatePageRequest, PaginatedResponse, QueryDatabaseRequest,
    UpdatePageRequest,
};

/// The calls the backend makes against a Notion workspace.
///
/// One method per endpoint, no pagination or retries: callers drive cursors
/// themselves.
#[async_trait::async_trait]
pub trait NotionTransport: Send + Sync {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, BackendError>;

    async fn retrieve_database(&self, id: &NotionId) -> Result<Database, BackendError>;

    /// One page of a block's direct children, starting at `cursor`.
    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<ChildBlock>, BackendError>;

    async fn create_page(&self, request: &CreatePageRequest) -> Result<Page, BackendError>;

    async fn create_database(
        &self,
        request: &CreateDatabaseRequest,
    ) -> Result<Database, BackendError>;

    async fn update_page(
        &self,
        id: &NotionId,
        request: &UpdatePageRequest,
    ) -> Result<Page, BackendError>;

    /// One page of query results; `request.start_cursor` selects the page.
    async fn query_database(
        &self,
        id: &NotionId,
        request: &QueryDatabaseRequest,
    ) -> Result<PaginatedResponse<Page>, BackendError>;
}

pub use client::{ApiResponse, NotionHttpClient};
pub(crate) use pagination::fetch_all_pages;
