//! Validated configuration for a case fetch run.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;

use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.courtlistener.com";
pub const SEARCH_PATH: &str = "/api/rest/v4/search/";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_FILED_AFTER: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => panic!("invalid default filed_after date"),
};

/// CourtListener API token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub api_key: ApiKey,
    /// Site root, used both for the search endpoint and for case links.
    pub base_url: String,
    /// Lower bound on filing date for the recent-cases query.
    pub filed_after: NaiveDate,
    pub page_size: u32,
    /// Pause after every request, successful or not.
    pub request_delay: Duration,
}

impl FetchConfig {
    /// Build a config with the default endpoint and query parameters.
    ///
    /// A missing or blank key is rejected here so callers can stop before
    /// any network activity.
    pub fn new(api_key: Option<String>) -> Result<Self, ConfigError> {
        let key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        Ok(Self {
            api_key: ApiKey(key),
            base_url: DEFAULT_BASE_URL.to_string(),
            filed_after: DEFAULT_FILED_AFTER,
            page_size: DEFAULT_PAGE_SIZE,
            request_delay: DEFAULT_REQUEST_DELAY,
        })
    }

    /// Point the fetcher at another server. No trailing slash is kept.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn with_page_size(mut self, page_size: u32) -> Result<Self, ConfigError> {
        if !(1..=100).contains(&page_size) {
            return Err(ConfigError::InvalidPageSize(page_size));
        }
        self.page_size = page_size;
        Ok(self)
    }

    pub fn with_filed_after(mut self, date: NaiveDate) -> Self {
        self.filed_after = date;
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }
}
