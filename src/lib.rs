//! Solana DeFi adoption dashboard
//!
//! ```text
//! DefiLlama /protocol/{slug} → DefiLlamaClient (TvlSource)
//!     ↓
//! TvlCache (slug → SeriesLookup, optional TTL)
//!     ↓                     ↓
//! Snapshot (latest TVL)   ProtocolMetrics → score_cohort → ScoredProtocol
//!     ↓                     ↓
//! AdoptionDashboard → ui (ratatui) / plain report
//! ```

pub mod cache;
pub mod config;
pub mod dashboard;
pub mod llama;
pub mod metrics;
pub mod protocols;
pub mod series;
pub mod snapshot;
pub mod stats;
pub mod ui;

pub use cache::TvlCache;
pub use config::DashboardConfig;
pub use dashboard::{AdoptionDashboard, DashboardError, DashboardReport, VolatilityPoint};
pub use llama::{DefiLlamaClient, TvlSource};
pub use metrics::{ProtocolMetrics, ScoredProtocol};
pub use protocols::{ProtocolDescriptor, SOLANA_PROTOCOLS};
pub use series::{NoDataReason, SeriesLookup, TvlPoint, TvlSeries};
pub use snapshot::{Snapshot, SnapshotRow, SnapshotSummary};
