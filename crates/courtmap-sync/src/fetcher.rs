//! Sequential per-circuit case fetching.

use chrono::Utc;
use courtmap_core::{CaseDataset, CaseRecord, CircuitCourt};
use tracing::{info, warn};

use crate::FetchConfig;
use crate::search::{Ordering, SearchQuery, SearchTransport};
use crate::throttle::Throttle;

/// Runs the recent and most-cited searches for each circuit, one request at a time.
///
/// A failed request is logged and contributes nothing; the loop always
/// moves on. Nothing is written until the whole run is collected.
pub struct CaseFetcher<T, P> {
    config: FetchConfig,
    transport: T,
    throttle: P,
}

impl<T: SearchTransport, P: Throttle> CaseFetcher<T, P> {
    pub fn new(config: FetchConfig, transport: T, throttle: P) -> Self {
        Self {
            config,
            transport,
            throttle,
        }
    }

    pub async fn fetch_all(&self, courts: &[CircuitCourt]) -> CaseDataset {
        let mut recent = Vec::new();
        let mut cited = Vec::new();

        for court in courts {
            recent.extend(
                self.fetch_one(court, SearchQuery::recent(court, &self.config))
                    .await,
            );
            cited.extend(
                self.fetch_one(court, SearchQuery::most_cited(court, &self.config))
                    .await,
            );
        }

        info!(
            recent = recent.len(),
            cited = cited.len(),
            circuits = courts.len(),
            "case fetch complete"
        );
        CaseDataset::new(Utc::now(), recent, cited)
    }

    async fn fetch_one(&self, court: &CircuitCourt, query: SearchQuery) -> Vec<CaseRecord> {
        let result = self.transport.search(&query).await;
        self.throttle.pause().await;

        let label = match query.ordering {
            Ordering::Recent => "recent",
            Ordering::MostCited => "most cited",
        };
        match result {
            Ok(page) => {
                let records: Vec<CaseRecord> = page
                    .results
                    .into_iter()
                    .map(|r| r.into_record(court, &self.config.base_url))
                    .collect();
                info!(circuit = court.name, count = records.len(), "fetched {label} cases");
                records
            }
            Err(e) => {
                warn!(circuit = court.name, error = %e, "skipping {label} cases");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyncError;
    use crate::search::{OpinionHit, SearchPage, SearchResult};
    use crate::throttle::{FixedDelay, NoDelay};
    use async_trait::async_trait;
    use courtmap_core::CIRCUIT_COURTS;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Answers every query with one case per court, except for courts
    /// listed in `failing`, which get a 500.
    #[derive(Default)]
    struct ScriptedTransport {
        failing: Vec<&'static str>,
        calls: Mutex<Vec<SearchQuery>>,
    }

    impl ScriptedTransport {
        fn failing(courts: &[&'static str]) -> Self {
            Self {
                failing: courts.to_vec(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<SearchQuery> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchTransport for ScriptedTransport {
        async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SyncError> {
            self.calls.lock().unwrap().push(query.clone());
            if self.failing.contains(&query.court) {
                return Err(SyncError::Server {
                    status: 500,
                    body: "upstream error".into(),
                });
            }
            Ok(SearchPage {
                results: vec![SearchResult {
                    case_name: Some(format!("{} v. {:?}", query.court, query.ordering)),
                    date_filed: Some("2024-06-01".into()),
                    docket_number: None,
                    status: Some("Published".into()),
                    cite_count: Some(1),
                    opinions: vec![OpinionHit {
                        snippet: Some("snippet".into()),
                    }],
                    absolute_url: format!("/opinion/{}/", query.court),
                }],
            })
        }
    }

    fn config() -> FetchConfig {
        FetchConfig::new(Some("test-key".into())).unwrap()
    }

    #[tokio::test]
    async fn two_queries_per_circuit_in_order() {
        let fetcher = CaseFetcher::new(config(), ScriptedTransport::default(), NoDelay);
        let dataset = fetcher.fetch_all(CIRCUIT_COURTS).await;

        assert_eq!(dataset.total_recent, 13);
        assert_eq!(dataset.total_cited, 13);

        let calls = fetcher.transport.calls();
        assert_eq!(calls.len(), 26);
        assert_eq!(calls[0].court, "ca1");
        assert_eq!(calls[0].ordering, Ordering::Recent);
        assert_eq!(calls[1].court, "ca1");
        assert_eq!(calls[1].ordering, Ordering::MostCited);
        assert_eq!(calls[25].court, "cafc");
    }

    #[tokio::test]
    async fn failing_circuit_is_skipped_and_next_still_fetched() {
        let fetcher = CaseFetcher::new(config(), ScriptedTransport::failing(&["ca5"]), NoDelay);
        let dataset = fetcher.fetch_all(CIRCUIT_COURTS).await;

        let from = |id: &str| {
            dataset
                .recent_cases
                .iter()
                .chain(&dataset.most_cited_cases)
                .filter(|c| c.circuit_id == id)
                .count()
        };
        assert_eq!(from("ca5"), 0);
        assert_eq!(from("ca6"), 2);
        assert_eq!(dataset.total_recent, 12);
        assert_eq!(dataset.total_cited, 12);
        // The failing circuit was still asked, and nothing was retried.
        assert_eq!(fetcher.transport.calls().len(), 26);
    }

    #[tokio::test]
    async fn every_circuit_failing_yields_empty_dataset() {
        let ids: Vec<&'static str> = CIRCUIT_COURTS.iter().map(|c| c.id).collect();
        let fetcher = CaseFetcher::new(config(), ScriptedTransport::failing(&ids), NoDelay);
        let dataset = fetcher.fetch_all(CIRCUIT_COURTS).await;
        assert!(dataset.recent_cases.is_empty());
        assert!(dataset.most_cited_cases.is_empty());
        assert_eq!(dataset.total_recent, 0);
    }

    #[tokio::test]
    async fn records_carry_circuit_and_absolute_url() {
        let fetcher = CaseFetcher::new(config(), ScriptedTransport::default(), NoDelay);
        let dataset = fetcher.fetch_all(&CIRCUIT_COURTS[8..9]).await;
        let case = &dataset.recent_cases[0];
        assert_eq!(case.circuit, "Ninth Circuit");
        assert_eq!(case.circuit_id, "ca9");
        assert_eq!(case.url, "https://www.courtlistener.com/opinion/ca9/");
        assert_eq!(case.snippet, "snippet");
    }

    #[tokio::test(start_paused = true)]
    async fn pauses_after_every_request_including_failures() {
        let fetcher = CaseFetcher::new(
            config(),
            ScriptedTransport::failing(&["ca2"]),
            FixedDelay::new(Duration::from_secs(1)),
        );
        let start = tokio::time::Instant::now();
        fetcher.fetch_all(&CIRCUIT_COURTS[..3]).await;
        assert!(start.elapsed() >= Duration::from_secs(6));
    }
}
