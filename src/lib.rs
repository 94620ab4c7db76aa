// src/lib.rs
//! notion-backend — Notion-backed storage for projects.
//!
//! A project is a root page with `Datasets`, `Experiments` and `Comparisons`
//! child pages, under which databases hold the actual records. The library
//! exposes:
//! - **Backend** — `NotionBackend`: title resolution, existence checks,
//!   structural validation, page/database creation, record queries/updates
//! - **Transport** — `NotionTransport`, implemented over HTTPS by `NotionHttpClient`
//! - **Model** — `Page`, `Database`, `ChildBlock`, `PropertyValue`, `PropertySchema`
//! - **Configuration** — `BackendConfig`, `ApiKey`, `NotionId`
//! - **Errors** — `BackendError`, `NotionErrorCode`, `ValidationError`

pub mod api;
mod backend;
mod config;
pub mod constants;
mod error;
pub mod model;
mod types;

// --- Backend ---
pub use crate::backend::{NotionBackend, PageLookup, QueryOptions};

// --- Configuration ---
pub use crate::config::BackendConfig;

// --- Errors ---
pub use crate::error::{BackendError, NotionErrorCode, Result};
pub use crate::types::ValidationError;

// --- Domain Types ---
pub use crate::types::{ApiKey, NotionId, ValidatedUrl};

// --- Model ---
pub use crate::model::{
    ChildBlock, Database, Page, Parent, ProjectSection, Properties, PropertySchema,
    PropertyValue, ResourceKind, RichText, TypedProperty,
};

// --- API Client ---
pub use crate::api::responses::{
    CreateDatabaseRequest, CreatePageRequest, PaginatedResponse, QueryDatabaseRequest,
    UpdatePageRequest,
};
pub use crate::api::{NotionHttpClient, NotionTransport};
