// src/backend/resolver.rs
//! Title → ID resolution among the direct children of a page.
//!
//! Notion only guarantees unique IDs, never unique titles, so every lookup
//! walks all children and then either insists on exactly one match or
//! hands back all of them.

use super::NotionBackend;
use crate::api::{fetch_all_pages, NotionTransport};
use crate::error::BackendError;
use crate::model::{ChildBlock, ProjectSection, ResourceKind};
use crate::types::NotionId;

/// What makes a child block a match: its kind, how to read its title and
/// how titles compare.
#[async_trait::async_trait]
trait TitleMatcher: Send + Sync {
    fn kind(&self) -> ResourceKind;

    /// Title of a block of the right kind. May need a further request.
    async fn title_of(
        &self,
        transport: &dyn NotionTransport,
        block: &ChildBlock,
    ) -> Result<String, BackendError>;

    fn same_title(&self, candidate: &str, wanted: &str) -> bool;
}

/// Child pages carry their title inline; comparison is exact.
struct PageTitles;

#[async_trait::async_trait]
impl TitleMatcher for PageTitles {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Page
    }

    async fn title_of(
        &self,
        _transport: &dyn NotionTransport,
        block: &ChildBlock,
    ) -> Result<String, BackendError> {
        Ok(block.page_title().unwrap_or_default().to_string())
    }

    fn same_title(&self, candidate: &str, wanted: &str) -> bool {
        candidate == wanted
    }
}

/// Child databases are retrieved to read their title; comparison ignores case.
struct DatabaseTitles;

#[async_trait::async_trait]
impl TitleMatcher for DatabaseTitles {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Database
    }

    async fn title_of(
        &self,
        transport: &dyn NotionTransport,
        block: &ChildBlock,
    ) -> Result<String, BackendError> {
        let database = transport.retrieve_database(&block.id).await?;
        Ok(database.title_text())
    }

    fn same_title(&self, candidate: &str, wanted: &str) -> bool {
        candidate.to_lowercase() == wanted.to_lowercase()
    }
}

/// Walks every page of `parent`'s children and returns the IDs matching
/// `title`, in listing order.
async fn matching_children(
    transport: &dyn NotionTransport,
    parent: &NotionId,
    title: &str,
    matcher: &dyn TitleMatcher,
) -> Result<Vec<NotionId>, BackendError> {
    let children = fetch_all_pages(move |cursor| transport.list_children(parent, cursor)).await?;
    log::debug!(
        "Searching {} children of {} over {} page(s) for {} '{}'",
        children.items.len(),
        parent,
        children.pages_fetched,
        matcher.kind(),
        title
    );

    let mut matches = Vec::new();
    for block in children.items {
        if block.resource_kind() != Some(matcher.kind()) {
            continue;
        }
        let candidate = matcher.title_of(transport, &block).await?;
        if matcher.same_title(&candidate, title) {
            matches.push(block.id);
        }
    }
    Ok(matches)
}

/// All matches; none at all is still an error.
fn all_matches(
    kind: ResourceKind,
    title: &str,
    matches: Vec<NotionId>,
) -> Result<Vec<NotionId>, BackendError> {
    if matches.is_empty() {
        return Err(BackendError::NotFound {
            kind,
            title: title.to_string(),
        });
    }
    Ok(matches)
}

/// Exactly one match.
fn single_match(
    kind: ResourceKind,
    title: &str,
    matches: Vec<NotionId>,
) -> Result<NotionId, BackendError> {
    let mut matches = all_matches(kind, title, matches)?.into_iter();
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id),
        _ => Err(BackendError::Duplicate {
            kind,
            title: title.to_string(),
        }),
    }
}

impl NotionBackend {
    /// ID of the only child page of `parent_id` titled exactly `title`.
    pub async fn find_page_id(
        &self,
        parent_id: &NotionId,
        title: &str,
    ) -> Result<NotionId, BackendError> {
        let matches = matching_children(self.transport(), parent_id, title, &PageTitles).await?;
        single_match(ResourceKind::Page, title, matches)
    }

    /// IDs of every child page of `parent_id` titled exactly `title`.
    pub async fn find_page_ids(
        &self,
        parent_id: &NotionId,
        title: &str,
    ) -> Result<Vec<NotionId>, BackendError> {
        let matches = matching_children(self.transport(), parent_id, title, &PageTitles).await?;
        all_matches(ResourceKind::Page, title, matches)
    }

    /// ID of the only child database of `parent_id` whose title equals
    /// `title`, ignoring case.
    pub async fn find_database_id(
        &self,
        parent_id: &NotionId,
        title: &str,
    ) -> Result<NotionId, BackendError> {
        let matches =
            matching_children(self.transport(), parent_id, title, &DatabaseTitles).await?;
        single_match(ResourceKind::Database, title, matches)
    }

    /// IDs of every child database of `parent_id` whose title equals
    /// `title`, ignoring case.
    pub async fn find_database_ids(
        &self,
        parent_id: &NotionId,
        title: &str,
    ) -> Result<Vec<NotionId>, BackendError> {
        let matches =
            matching_children(self.transport(), parent_id, title, &DatabaseTitles).await?;
        all_matches(ResourceKind::Database, title, matches)
    }

    /// ID of a project section page under the root.
    pub async fn section_page_id(&self, section: ProjectSection) -> Result<NotionId, BackendError> {
        self.find_page_id(self.root_page_id(), section.title()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<NotionId> {
        (0..n).map(|_| NotionId::new_v4()).collect()
    }

    #[test]
    fn not_found_wins_over_return_all() {
        let err = all_matches(ResourceKind::Page, "Datasets", Vec::new()).unwrap_err();
        assert!(matches!(err, BackendError::NotFound { kind: ResourceKind::Page, .. }));

        let err = single_match(ResourceKind::Database, "runs", Vec::new()).unwrap_err();
        assert!(matches!(err, BackendError::NotFound { kind: ResourceKind::Database, .. }));
    }

    #[test]
    fn single_mode_rejects_duplicates() {
        let err = single_match(ResourceKind::Page, "Datasets", ids(2)).unwrap_err();
        assert!(matches!(err, BackendError::Duplicate { .. }));

        let one = ids(1);
        assert_eq!(
            single_match(ResourceKind::Page, "Datasets", one.clone()).unwrap(),
            one[0]
        );
    }

    #[test]
    fn return_all_keeps_order() {
        let three = ids(3);
        assert_eq!(
            all_matches(ResourceKind::Page, "Datasets", three.clone()).unwrap(),
            three
        );
    }

    #[test]
    fn title_comparison_rules() {
        assert!(PageTitles.same_title("Datasets", "Datasets"));
        assert!(!PageTitles.same_title("datasets", "Datasets"));
        assert!(DatabaseTitles.same_title("Eval Runs", "eval runs"));
        assert!(!DatabaseTitles.same_title("Eval Runs", "eval run"));
    }
}
