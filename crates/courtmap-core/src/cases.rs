//! Case-law records published alongside the circuit pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A federal court of appeals as identified by CourtListener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitCourt {
    /// CourtListener court id, e.g. `ca9`.
    pub id: &'static str,
    /// Display name, matching the circuit boundary file's `Name` property.
    pub name: &'static str,
}

/// The thirteen courts of appeals, in the order they are fetched.
pub const CIRCUIT_COURTS: &[CircuitCourt] = &[
    CircuitCourt { id: "ca1", name: "First Circuit" },
    CircuitCourt { id: "ca2", name: "Second Circuit" },
    CircuitCourt { id: "ca3", name: "Third Circuit" },
    CircuitCourt { id: "ca4", name: "Fourth Circuit" },
    CircuitCourt { id: "ca5", name: "Fifth Circuit" },
    CircuitCourt { id: "ca6", name: "Sixth Circuit" },
    CircuitCourt { id: "ca7", name: "Seventh Circuit" },
    CircuitCourt { id: "ca8", name: "Eighth Circuit" },
    CircuitCourt { id: "ca9", name: "Ninth Circuit" },
    CircuitCourt { id: "ca10", name: "Tenth Circuit" },
    CircuitCourt { id: "ca11", name: "Eleventh Circuit" },
    CircuitCourt { id: "cadc", name: "DC Circuit" },
    CircuitCourt { id: "cafc", name: "Federal Circuit" },
];

/// One opinion cluster from a circuit search, flattened for the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub circuit: String,
    pub circuit_id: String,
    pub case_name: String,
    /// Date string exactly as the search API reports it.
    pub date_filed: Option<String>,
    pub docket_number: Option<String>,
    pub status: Option<String>,
    pub cite_count: u64,
    pub snippet: String,
    pub url: String,
}

/// Everything a fetch run produces, written once at the end of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDataset {
    pub last_updated: DateTime<Utc>,
    pub recent_cases: Vec<CaseRecord>,
    pub most_cited_cases: Vec<CaseRecord>,
    pub total_recent: usize,
    pub total_cited: usize,
}

impl CaseDataset {
    /// Stamp the collected lists with the fetch time and their counts.
    pub fn new(
        last_updated: DateTime<Utc>,
        recent_cases: Vec<CaseRecord>,
        most_cited_cases: Vec<CaseRecord>,
    ) -> Self {
        Self {
            last_updated,
            total_recent: recent_cases.len(),
            total_cited: most_cited_cases.len(),
            recent_cases,
            most_cited_cases,
        }
    }
}
