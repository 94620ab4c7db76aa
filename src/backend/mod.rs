// src/backend/mod.rs
//! The project backend: a root page plus a transport to reach it.
//!
//! Name resolution lives in [`resolver`], writes and queries in [`records`].

mod records;
mod resolver;

pub use records::QueryOptions;

use crate::api::{NotionHttpClient, NotionTransport};
use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::model::{Page, ProjectSection};
use crate::types::NotionId;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Outcome of looking a page up by ID.
#[derive(Debug, Clone, PartialEq)]
pub enum PageLookup {
    Found(Box<Page>),
    Missing,
}

/// Notion-backed storage for a project rooted at one page.
#[derive(Clone)]
pub struct NotionBackend {
    root_page_id: NotionId,
    transport: Arc<dyn NotionTransport>,
}

impl NotionBackend {
    pub fn new(root_page_id: NotionId, transport: Arc<dyn NotionTransport>) -> Self {
        Self {
            root_page_id,
            transport,
        }
    }

    /// Connects over HTTPS with the given configuration.
    pub fn connect(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = NotionHttpClient::new(config)?;
        log::debug!(
            "Connecting to {} with key {} (root {})",
            config.api_base_url,
            config.api_key,
            config.root_page_id
        );
        Ok(Self::new(config.root_page_id.clone(), Arc::new(client)))
    }

    pub fn root_page_id(&self) -> &NotionId {
        &self.root_page_id
    }

    pub(crate) fn transport(&self) -> &dyn NotionTransport {
        self.transport.as_ref()
    }

    /// Looks a page up, telling "not there" apart from failures to ask.
    pub async fn lookup_page(&self, page_id: &NotionId) -> Result<PageLookup, BackendError> {
        match self.transport.retrieve_page(page_id).await {
            Ok(page) => Ok(PageLookup::Found(Box::new(page))),
            Err(err) if err.is_not_found() => Ok(PageLookup::Missing),
            Err(err) => Err(err),
        }
    }

    /// Whether the page can be retrieved. Every failure, including
    /// transport errors, counts as "does not exist".
    pub async fn page_exists(&self, page_id: &NotionId) -> bool {
        match self.transport.retrieve_page(page_id).await {
            Ok(_) => true,
            Err(err) if err.is_not_found() => {
                log::debug!("Page {} does not exist", page_id);
                false
            }
            Err(err) => {
                log::warn!("Page {} treated as missing: {}", page_id, err);
                false
            }
        }
    }

    /// Checks that `root_page_id` exists and has the `Datasets`,
    /// `Experiments` and `Comparisons` child pages.
    ///
    /// Only the first page of children is inspected.
    pub async fn validate_project_structure(&self, root_page_id: &NotionId) -> bool {
        if !self.page_exists(root_page_id).await {
            log::warn!("Project root {} does not exist", root_page_id);
            return false;
        }

        let children = match self.transport.list_children(root_page_id, None).await {
            Ok(children) => children,
            Err(err) => {
                log::warn!("Could not list children of {}: {}", root_page_id, err);
                return false;
            }
        };

        let found: HashSet<&str> = children
            .results
            .iter()
            .filter_map(|block| block.page_title())
            .collect();

        let missing: Vec<&str> = ProjectSection::ALL
            .iter()
            .map(|section| section.title())
            .filter(|title| !found.contains(title))
            .collect();

        if !missing.is_empty() {
            log::warn!(
                "Project root {} is missing section(s): {}",
                root_page_id,
                missing.join(", ")
            );
        }
        missing.is_empty()
    }
}

impl fmt::Debug for NotionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NotionBackend(root_page_id={})", self.root_page_id)
    }
}
