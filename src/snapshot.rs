//! Cross-protocol comparison of current TVL

use serde::Serialize;

use crate::cache::TvlCache;
use crate::protocols::ProtocolDescriptor;
use crate::series::SeriesLookup;

/// Latest TVL for one protocol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRow {
    pub name: String,
    pub slug: String,
    pub tvl: f64,
}

/// Overview figures for the snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    pub protocols_analyzed: usize,
    pub top_tvl_protocol: String,
    pub average_tvl: f64,
}

/// One row per protocol with usable data, in tracked-protocol order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    rows: Vec<SnapshotRow>,
}

impl Snapshot {
    pub fn rows(&self) -> &[SnapshotRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// No tracked protocol had usable data
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains_slug(&self, slug: &str) -> bool {
        self.rows.iter().any(|r| r.slug == slug)
    }

    /// Copy of the rows sorted by TVL, highest first
    pub fn ranked_by_tvl(&self) -> Vec<SnapshotRow> {
        let mut ranked = self.rows.clone();
        ranked.sort_by(|a, b| b.tvl.total_cmp(&a.tvl));
        ranked
    }

    pub fn summary(&self) -> Option<SnapshotSummary> {
        let top = self.rows.iter().max_by(|a, b| a.tvl.total_cmp(&b.tvl))?;
        let total: f64 = self.rows.iter().map(|r| r.tvl).sum();

        Some(SnapshotSummary {
            protocols_analyzed: self.rows.len(),
            top_tvl_protocol: top.name.clone(),
            average_tvl: total / self.rows.len() as f64,
        })
    }
}

/// Fetch every protocol through the cache and keep the ones with data
pub async fn build_snapshot(cache: &TvlCache, protocols: &[ProtocolDescriptor]) -> Snapshot {
    let mut rows = Vec::with_capacity(protocols.len());

    for protocol in protocols {
        match cache.get_or_fetch(protocol.slug).await {
            SeriesLookup::Available(series) => rows.push(SnapshotRow {
                name: protocol.name.to_string(),
                slug: protocol.slug.to_string(),
                tvl: series.latest().total_liquidity_usd,
            }),
            SeriesLookup::NoData(reason) => {
                log::info!("Skipping {} in snapshot: {}", protocol.name, reason);
            }
        }
    }

    Snapshot { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, tvl: f64) -> SnapshotRow {
        SnapshotRow {
            name: name.to_string(),
            slug: name.to_lowercase(),
            tvl,
        }
    }

    #[test]
    fn test_ranked_by_tvl() {
        let snapshot = Snapshot {
            rows: vec![row("Orca", 2.0), row("Raydium", 5.0), row("Drift", 1.0)],
        };

        let names: Vec<String> = snapshot.ranked_by_tvl().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Raydium", "Orca", "Drift"]);
        // rows keep tracked-protocol order
        assert_eq!(snapshot.rows()[0].name, "Orca");
    }

    #[test]
    fn test_summary() {
        let snapshot = Snapshot {
            rows: vec![row("Orca", 2.0), row("Raydium", 6.0), row("Drift", 1.0)],
        };

        let summary = snapshot.summary().unwrap();
        assert_eq!(summary.protocols_analyzed, 3);
        assert_eq!(summary.top_tvl_protocol, "Raydium");
        assert_eq!(summary.average_tvl, 3.0);
    }

    #[test]
    fn test_empty_snapshot_has_no_summary() {
        let snapshot = Snapshot::default();
        assert!(snapshot.is_empty());
        assert!(snapshot.summary().is_none());
    }
}
