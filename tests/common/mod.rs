// tests/common/mod.rs
//! In-memory Notion transport that records every call it receives.
#![allow(dead_code)]

use notion_backend::{
    BackendError, ChildBlock, CreateDatabaseRequest, CreatePageRequest, Database, NotionBackend,
    NotionErrorCode, NotionId, NotionTransport, Page, PaginatedResponse, Parent, Properties,
    QueryDatabaseRequest, RichText, UpdatePageRequest,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

/// A request as the mock saw it. Bodies are kept as serialized JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    RetrievePage(NotionId),
    RetrieveDatabase(NotionId),
    ListChildren {
        parent: NotionId,
        cursor: Option<String>,
    },
    CreatePage(serde_json::Value),
    CreateDatabase(serde_json::Value),
    UpdatePage {
        id: NotionId,
        body: serde_json::Value,
    },
    QueryDatabase {
        id: NotionId,
        body: serde_json::Value,
    },
}

#[derive(Default)]
struct MockState {
    pages: HashMap<NotionId, Page>,
    databases: HashMap<NotionId, Database>,
    children: HashMap<NotionId, Vec<Vec<ChildBlock>>>,
    records: HashMap<NotionId, Vec<Vec<Page>>>,
    broken: HashSet<NotionId>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

/// Deterministic ID for fixture number `n`.
pub fn id(n: u32) -> NotionId {
    NotionId::parse(&format!("{:032x}", n)).expect("fixture id should be valid")
}

pub fn page(id: NotionId) -> Page {
    Page {
        id,
        parent: None,
        properties: Properties::new(),
        archived: false,
        url: None,
        created_time: None,
        last_edited_time: None,
    }
}

pub fn record(id: NotionId, archived: bool) -> Page {
    Page {
        archived,
        ..page(id)
    }
}

pub fn database(id: NotionId, title: &str) -> Database {
    Database {
        id,
        title: vec![RichText::text(title)],
        parent: None,
        properties: Default::default(),
        archived: false,
        url: None,
    }
}

fn not_found(id: &NotionId) -> BackendError {
    BackendError::NotionApi {
        status: 404,
        code: NotionErrorCode::ObjectNotFound,
        message: format!("Could not find object with ID: {}", id),
        request_id: None,
    }
}

fn unavailable() -> BackendError {
    BackendError::NotionApi {
        status: 503,
        code: NotionErrorCode::ServiceUnavailable,
        message: "Notion is unavailable".to_string(),
        request_id: None,
    }
}

fn cursor_for(index: usize) -> String {
    format!("cursor-{}", index)
}

fn batch_index(cursor: Option<&str>) -> usize {
    cursor
        .and_then(|c| c.strip_prefix("cursor-"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn paginate<T: Clone>(batches: &[Vec<T>], cursor: Option<&str>) -> PaginatedResponse<T> {
    let index = batch_index(cursor);
    let results = batches.get(index).cloned().unwrap_or_default();
    if index + 1 < batches.len() {
        PaginatedResponse::with_more(results, cursor_for(index + 1))
    } else {
        PaginatedResponse::last(results)
    }
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn add_page(&self, page: Page) {
        self.state.lock().await.pages.insert(page.id.clone(), page);
    }

    pub async fn add_database(&self, database: Database) {
        self.state
            .lock()
            .await
            .databases
            .insert(database.id.clone(), database);
    }

    /// Children of `parent`, served one batch per listing page.
    pub async fn set_children(&self, parent: &NotionId, batches: Vec<Vec<ChildBlock>>) {
        self.state
            .lock()
            .await
            .children
            .insert(parent.clone(), batches);
    }

    /// Query results of `database`, served one batch per result page.
    pub async fn set_records(&self, database: &NotionId, batches: Vec<Vec<Page>>) {
        self.state
            .lock()
            .await
            .records
            .insert(database.clone(), batches);
    }

    /// Every request touching `id` fails as if Notion were down.
    pub async fn break_object(&self, id: &NotionId) {
        self.state.lock().await.broken.insert(id.clone());
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.state.lock().await.calls.clone()
    }

    pub async fn count_calls(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|c| predicate(c))
            .count()
    }
}

#[async_trait::async_trait]
impl NotionTransport for MockTransport {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, BackendError> {
        let mut state = self.state.lock().await;
        state.calls.push(Call::RetrievePage(id.clone()));
        if state.broken.contains(id) {
            return Err(unavailable());
        }
        state.pages.get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn retrieve_database(&self, id: &NotionId) -> Result<Database, BackendError> {
        let mut state = self.state.lock().await;
        state.calls.push(Call::RetrieveDatabase(id.clone()));
        if state.broken.contains(id) {
            return Err(unavailable());
        }
        state.databases.get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<ChildBlock>, BackendError> {
        let mut state = self.state.lock().await;
        state.calls.push(Call::ListChildren {
            parent: parent.clone(),
            cursor: cursor.clone(),
        });
        if state.broken.contains(parent) {
            return Err(unavailable());
        }
        let batches = state.children.get(parent).cloned().unwrap_or_default();
        Ok(paginate(&batches, cursor.as_deref()))
    }

    async fn create_page(&self, request: &CreatePageRequest) -> Result<Page, BackendError> {
        let body = serde_json::to_value(request).expect("request should serialize");
        let mut state = self.state.lock().await;
        state.calls.push(Call::CreatePage(body));

        let created = Page {
            parent: Some(request.parent.clone()),
            properties: request.properties.clone(),
            ..page(NotionId::new_v4())
        };
        state.pages.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn create_database(
        &self,
        request: &CreateDatabaseRequest,
    ) -> Result<Database, BackendError> {
        let body = serde_json::to_value(request).expect("request should serialize");
        let mut state = self.state.lock().await;
        state.calls.push(Call::CreateDatabase(body));

        let created = Database {
            parent: Some(request.parent.clone()),
            title: request.title.clone(),
            ..database(NotionId::new_v4(), "")
        };
        state.databases.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_page(
        &self,
        id: &NotionId,
        request: &UpdatePageRequest,
    ) -> Result<Page, BackendError> {
        let body = serde_json::to_value(request).expect("request should serialize");
        let mut state = self.state.lock().await;
        state.calls.push(Call::UpdatePage {
            id: id.clone(),
            body,
        });

        let current = state.pages.get_mut(id).ok_or_else(|| not_found(id))?;
        if let Some(properties) = &request.properties {
            for (name, value) in properties {
                current.properties.insert(name.clone(), value.clone());
            }
        }
        if let Some(archived) = request.archived {
            current.archived = archived;
        }
        Ok(current.clone())
    }

    async fn query_database(
        &self,
        id: &NotionId,
        request: &QueryDatabaseRequest,
    ) -> Result<PaginatedResponse<Page>, BackendError> {
        let body = serde_json::to_value(request).expect("request should serialize");
        let mut state = self.state.lock().await;
        state.calls.push(Call::QueryDatabase {
            id: id.clone(),
            body,
        });
        if state.broken.contains(id) {
            return Err(unavailable());
        }
        let batches = state.records.get(id).cloned().ok_or_else(|| not_found(id))?;
        Ok(paginate(&batches, request.start_cursor.as_deref()))
    }
}

/// A backend rooted at `root` talking to `transport`.
pub fn backend(root: NotionId, transport: &Arc<MockTransport>) -> NotionBackend {
    NotionBackend::new(root, transport.clone())
}

/// Parent of a created page as the mock received it.
pub fn parent_of(body: &serde_json::Value) -> Parent {
    serde_json::from_value(body["parent"].clone()).expect("parent should deserialize")
}
