//! The `fetch-cases` command.

use std::collections::BTreeMap;
use std::time::Duration;

use courtmap_core::{CIRCUIT_COURTS, CaseDataset};
use courtmap_sync::{CaseFetcher, CourtListenerClient, FetchConfig, FixedDelay, SearchTransport};

use crate::FetchArgs;

/// Validate the configuration, then fetch every circuit in turn.
///
/// Configuration errors (no API key above all) are returned before the
/// HTTP client exists, so a bad invocation never touches the network.
pub async fn run_fetch_cases(args: &FetchArgs) -> anyhow::Result<CaseDataset> {
    fetch_with(args, CourtListenerClient::new).await
}

/// Like [`run_fetch_cases`], with the transport built by `connect` once the
/// configuration has been accepted.
async fn fetch_with<T, F>(args: &FetchArgs, connect: F) -> anyhow::Result<CaseDataset>
where
    T: SearchTransport,
    F: FnOnce(&FetchConfig) -> T,
{
    let mut config = FetchConfig::new(args.api_key.clone())?
        .with_base_url(&args.base_url)?
        .with_page_size(args.page_size)?
        .with_request_delay(Duration::from_millis(args.delay_ms));
    if let Some(date) = args.filed_after {
        config = config.with_filed_after(date);
    }

    let transport = connect(&config);
    let throttle = FixedDelay::new(config.request_delay);
    let fetcher = CaseFetcher::new(config, transport, throttle);
    Ok(fetcher.fetch_all(CIRCUIT_COURTS).await)
}

/// Per-circuit counts and totals, on stderr.
pub fn print_summary(dataset: &CaseDataset) {
    let mut per_circuit: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for case in &dataset.recent_cases {
        per_circuit.entry(case.circuit.as_str()).or_default().0 += 1;
    }
    for case in &dataset.most_cited_cases {
        per_circuit.entry(case.circuit.as_str()).or_default().1 += 1;
    }

    eprintln!();
    for court in CIRCUIT_COURTS {
        let (recent, cited) = per_circuit.get(court.name).copied().unwrap_or_default();
        eprintln!("  {:<18} {recent:>3} recent  {cited:>3} most cited", court.name);
    }
    eprintln!("  Total recent cases: {}", dataset.total_recent);
    eprintln!("  Total cited cases: {}", dataset.total_cited);
}
