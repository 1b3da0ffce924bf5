//! Case-law sync: CourtListener search, request pacing, and the per-circuit fetch loop.

pub mod config;
mod error;
pub mod fetcher;
pub mod search;
pub mod throttle;

#[cfg(feature = "http")]
pub mod http;

pub use config::{ApiKey, FetchConfig};
pub use error::{ConfigError, SyncError};
pub use fetcher::CaseFetcher;
pub use search::{Ordering, SearchPage, SearchQuery, SearchResult, SearchTransport};
pub use throttle::{FixedDelay, NoDelay, Throttle};

#[cfg(feature = "http")]
pub use http::CourtListenerClient;
