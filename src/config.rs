use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, NOTION_API_BASE_URL, NOTION_API_KEY_ENV};
use crate::error::BackendError;
use crate::types::{ApiKey, NotionId, ValidatedUrl};
use std::time::Duration;

/// Everything needed to connect a backend to a Notion workspace.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Page that holds the project's `Datasets`, `Experiments` and `Comparisons`.
    pub root_page_id: NotionId,
    pub api_key: ApiKey,
    pub api_base_url: ValidatedUrl,
    pub request_timeout: Duration,
}

impl BackendConfig {
    /// Configuration against the public Notion API with default timeouts.
    pub fn new(root_page_id: NotionId, api_key: ApiKey) -> Self {
        Self {
            root_page_id,
            api_key,
            api_base_url: Self::default_base_url(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Resolves the root from `root_input` (ID or URL) and the token from
    /// the `NOTION_API_KEY` environment variable.
    pub fn from_env(root_input: &str) -> Result<Self, BackendError> {
        let api_key_str = std::env::var(NOTION_API_KEY_ENV).map_err(|_| {
            BackendError::MissingConfiguration(format!(
                "{} environment variable not set",
                NOTION_API_KEY_ENV
            ))
        })?;

        let api_key = ApiKey::new(api_key_str)?;
        let root_page_id = NotionId::parse(root_input)?;

        Ok(Self::new(root_page_id, api_key))
    }

    pub fn with_api_base_url(mut self, url: &str) -> Result<Self, BackendError> {
        self.api_base_url = ValidatedUrl::parse(url)?;
        Ok(self)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn default_base_url() -> ValidatedUrl {
        ValidatedUrl::parse(NOTION_API_BASE_URL)
            .expect("Notion API base URL constant should be valid")
    }
}
