//! CourtListener opinion search: query parameters, response shape, and the transport seam.

use async_trait::async_trait;
use chrono::NaiveDate;
use courtmap_core::{CaseRecord, CircuitCourt};
use serde::Deserialize;

use crate::{FetchConfig, SyncError};

/// Which list a query feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    /// Newest filings first, bounded below by `filed_after`.
    Recent,
    /// Most cited first, no date bound.
    MostCited,
}

impl Ordering {
    pub fn order_by(self) -> &'static str {
        match self {
            Ordering::Recent => "dateFiled desc",
            Ordering::MostCited => "citeCount desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub court: &'static str,
    pub ordering: Ordering,
    pub filed_after: Option<NaiveDate>,
    pub page_size: u32,
}

impl SearchQuery {
    pub fn recent(court: &CircuitCourt, config: &FetchConfig) -> Self {
        Self {
            court: court.id,
            ordering: Ordering::Recent,
            filed_after: Some(config.filed_after),
            page_size: config.page_size,
        }
    }

    pub fn most_cited(court: &CircuitCourt, config: &FetchConfig) -> Self {
        Self {
            court: court.id,
            ordering: Ordering::MostCited,
            filed_after: None,
            page_size: config.page_size,
        }
    }

    /// Query-string parameters, in the order they are sent.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("type", "o".to_string()), ("court", self.court.to_string())];
        if let Some(date) = self.filed_after {
            params.push(("filed_after", date.to_string()));
        }
        params.push(("order_by", self.ordering.order_by().to_string()));
        params.push(("page_size", self.page_size.to_string()));
        params.push(("q", "*".to_string()));
        params.push(("format", "json".to_string()));
        params
    }
}

/// One page of search results. Only the fields the site uses are read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub case_name: Option<String>,
    pub date_filed: Option<String>,
    pub docket_number: Option<String>,
    pub status: Option<String>,
    pub cite_count: Option<u64>,
    #[serde(default)]
    pub opinions: Vec<OpinionHit>,
    #[serde(rename = "absolute_url", default)]
    pub absolute_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpinionHit {
    pub snippet: Option<String>,
}

impl SearchResult {
    /// Flatten into a site record. `site_base` prefixes the relative case URL.
    pub fn into_record(self, court: &CircuitCourt, site_base: &str) -> CaseRecord {
        let snippet = self
            .opinions
            .into_iter()
            .next()
            .and_then(|o| o.snippet)
            .unwrap_or_default();
        CaseRecord {
            circuit: court.name.to_string(),
            circuit_id: court.id.to_string(),
            case_name: self.case_name.unwrap_or_default(),
            date_filed: self.date_filed,
            docket_number: self.docket_number,
            status: self.status,
            cite_count: self.cite_count.unwrap_or(0),
            snippet,
            url: format!("{site_base}{}", self.absolute_url),
        }
    }
}

/// Anything that can run a search query. The HTTP client implements this;
/// tests substitute scripted responses.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SyncError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtmap_core::CIRCUIT_COURTS;

    fn config() -> FetchConfig {
        FetchConfig::new(Some("k".into())).unwrap()
    }

    #[test]
    fn recent_params() {
        let query = SearchQuery::recent(&CIRCUIT_COURTS[8], &config());
        let params = query.params();
        let expected: Vec<(&str, String)> = vec![
            ("type", "o".into()),
            ("court", "ca9".into()),
            ("filed_after", "2024-01-01".into()),
            ("order_by", "dateFiled desc".into()),
            ("page_size", "20".into()),
            ("q", "*".into()),
            ("format", "json".into()),
        ];
        assert_eq!(params, expected);
    }

    #[test]
    fn most_cited_has_no_date_floor() {
        let query = SearchQuery::most_cited(&CIRCUIT_COURTS[0], &config());
        let params = query.params();
        assert!(params.iter().all(|(k, _)| *k != "filed_after"));
        assert!(params.contains(&("order_by", "citeCount desc".to_string())));
        assert!(params.contains(&("court", "ca1".to_string())));
    }

    #[test]
    fn parse_search_page() {
        let json = r#"{
            "count": 2,
            "next": null,
            "results": [
                {
                    "caseName": "United States v. Smith",
                    "dateFiled": "2024-05-02",
                    "docketNumber": "23-50123",
                    "status": "Published",
                    "citeCount": 4,
                    "opinions": [{ "snippet": "We affirm." }, { "snippet": "Dissent." }],
                    "absolute_url": "/opinion/9876/united-states-v-smith/"
                },
                {
                    "caseName": null,
                    "dateFiled": "2024-04-01",
                    "citeCount": null,
                    "opinions": [],
                    "absolute_url": "/opinion/1/x/"
                }
            ]
        }"#;
        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 2);

        let court = &CIRCUIT_COURTS[4];
        let mut records = page
            .results
            .into_iter()
            .map(|r| r.into_record(court, "https://www.courtlistener.com"));

        let first = records.next().unwrap();
        assert_eq!(first.circuit, "Fifth Circuit");
        assert_eq!(first.circuit_id, "ca5");
        assert_eq!(first.case_name, "United States v. Smith");
        assert_eq!(first.cite_count, 4);
        assert_eq!(first.snippet, "We affirm.");
        assert_eq!(
            first.url,
            "https://www.courtlistener.com/opinion/9876/united-states-v-smith/"
        );

        let second = records.next().unwrap();
        assert_eq!(second.case_name, "");
        assert_eq!(second.cite_count, 0);
        assert_eq!(second.snippet, "");
        assert!(second.docket_number.is_none());
    }

    #[test]
    fn missing_results_is_empty_page() {
        let page: SearchPage = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(page.results.is_empty());
    }
}
