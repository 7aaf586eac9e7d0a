//! Dashboard facade
//!
//! Everything the presentation layer reads goes through [`AdoptionDashboard`]:
//! the snapshot table, a protocol's series by slug, its rolling volatility,
//! and the ranked adoption quality scores. All outputs are recomputed from
//! the cache on every call; only fetch results are memoized.

use {
    crate::{
        cache::TvlCache,
        config::DashboardConfig,
        llama::{DefiLlamaClient, TvlSource},
        metrics::{self, ProtocolMetrics, ScoredProtocol},
        protocols::{ProtocolDescriptor, SOLANA_PROTOCOLS},
        series::SeriesLookup,
        snapshot::{self, Snapshot, SnapshotSummary},
    },
    chrono::{DateTime, Utc},
    serde::Serialize,
    std::sync::Arc,
    thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("no Solana DeFi protocol data could be loaded")]
    NoUsableData,
}

/// One point of the per-protocol volatility chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolatilityPoint {
    pub date: DateTime<Utc>,
    /// `None` until a full rolling window is available
    pub volatility: Option<f64>,
}

/// Everything needed to render the overview screens
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub snapshot: Snapshot,
    pub summary: SnapshotSummary,
    /// Ranked by adoption quality score, highest first
    pub scores: Vec<ScoredProtocol>,
}

pub struct AdoptionDashboard {
    cache: TvlCache,
    protocols: Vec<ProtocolDescriptor>,
}

impl AdoptionDashboard {
    /// Dashboard over the tracked Solana protocols backed by DefiLlama
    pub fn from_config(config: &DashboardConfig) -> Result<Self, reqwest::Error> {
        let client = DefiLlamaClient::new(config)?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn new(source: Arc<dyn TvlSource>, config: &DashboardConfig) -> Self {
        Self::with_protocols(source, config, SOLANA_PROTOCOLS.to_vec())
    }

    pub fn with_protocols(
        source: Arc<dyn TvlSource>,
        config: &DashboardConfig,
        protocols: Vec<ProtocolDescriptor>,
    ) -> Self {
        Self {
            cache: TvlCache::new(source, config.cache_ttl()),
            protocols,
        }
    }

    pub fn protocols(&self) -> &[ProtocolDescriptor] {
        &self.protocols
    }

    pub fn cache(&self) -> &TvlCache {
        &self.cache
    }

    pub async fn snapshot(&self) -> Snapshot {
        snapshot::build_snapshot(&self.cache, &self.protocols).await
    }

    /// TVL history for one slug
    pub async fn series(&self, slug: &str) -> SeriesLookup {
        self.cache.get_or_fetch(slug).await
    }

    /// Rolling 7-day volatility aligned with the slug's series
    pub async fn rolling_volatility(&self, slug: &str) -> Option<Vec<VolatilityPoint>> {
        let lookup = self.series(slug).await;
        let series = lookup.series()?;
        let rolled = metrics::rolling_volatility(&series.values());

        Some(
            series
                .points()
                .iter()
                .zip(rolled)
                .map(|(p, volatility)| VolatilityPoint {
                    date: p.date,
                    volatility,
                })
                .collect(),
        )
    }

    /// Raw metrics for every protocol with enough history
    ///
    /// Independent of the snapshot: a protocol is attempted here even if it
    /// was skipped there.
    pub async fn adoption_metrics(&self) -> Vec<ProtocolMetrics> {
        let mut cohort = Vec::new();

        for protocol in &self.protocols {
            let lookup = self.cache.get_or_fetch(protocol.slug).await;
            let Some(series) = lookup.series() else {
                continue;
            };

            match ProtocolMetrics::compute(protocol.name, series) {
                Ok(m) => cohort.push(m),
                Err(reason) => {
                    log::debug!("Excluding {} from adoption metrics: {}", protocol.name, reason);
                }
            }
        }

        cohort
    }

    /// Adoption quality scores for the current cohort, highest first
    pub async fn scored_protocols(&self) -> Vec<ScoredProtocol> {
        let cohort = self.adoption_metrics().await;
        metrics::rank_by_score(metrics::score_cohort(&cohort))
    }

    /// Full overview, or [`DashboardError::NoUsableData`] when nothing loaded
    pub async fn report(&self) -> Result<DashboardReport, DashboardError> {
        let snapshot = self.snapshot().await;
        let summary = snapshot.summary().ok_or(DashboardError::NoUsableData)?;
        let scores = self.scored_protocols().await;

        log::info!(
            "📊 {} protocols in snapshot, {} scored",
            summary.protocols_analyzed,
            scores.len()
        );

        Ok(DashboardReport {
            snapshot,
            summary,
            scores,
        })
    }
}
