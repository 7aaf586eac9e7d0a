//! Integration tests for the dashboard facade
//!
//! An in-memory TvlSource stands in for DefiLlama so that fetch failures,
//! short histories and cohort edge cases can be set up per slug.

#[cfg(test)]
mod dashboard_integration_tests {
    use async_trait::async_trait;
    use sol_adoption::{
        metrics::NEUTRAL_NORMALIZED, AdoptionDashboard, DashboardConfig, DashboardError,
        NoDataReason, SeriesLookup, TvlPoint, TvlSeries, TvlSource,
    };
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const SCENARIO_A: [f64; 14] = [
        100.0, 110.0, 121.0, 100.0, 90.0, 95.0, 105.0, 115.0, 120.0, 118.0, 122.0, 130.0, 128.0,
        135.0,
    ];

    /// Serves fixed lookups per slug and counts calls
    struct FixtureSource {
        lookups: HashMap<&'static str, SeriesLookup>,
        calls: AtomicUsize,
    }

    impl FixtureSource {
        fn new() -> Self {
            Self {
                lookups: HashMap::new(),
                calls: AtomicUsize::new(0),
            }
        }

        fn with_values(mut self, slug: &'static str, values: &[f64]) -> Self {
            self.lookups.insert(slug, SeriesLookup::available(series(values)));
            self
        }

        fn with_status(mut self, slug: &'static str, status: u16) -> Self {
            self.lookups
                .insert(slug, SeriesLookup::NoData(NoDataReason::HttpStatus(status)));
            self
        }
    }

    #[async_trait]
    impl TvlSource for FixtureSource {
        async fn fetch_tvl(&self, slug: &str) -> SeriesLookup {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.lookups
                .get(slug)
                .cloned()
                .unwrap_or(SeriesLookup::NoData(NoDataReason::HttpStatus(404)))
        }

        fn source_name(&self) -> &'static str {
            "fixture"
        }
    }

    fn series(values: &[f64]) -> TvlSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| TvlPoint::from_unix(1_700_000_000 + i as i64 * 86_400, *v).unwrap())
            .collect();
        TvlSeries::new(points).unwrap()
    }

    /// Linear growth from `start` by `step` per day
    fn linear(start: f64, step: f64, len: usize) -> Vec<f64> {
        (0..len).map(|i| start + step * i as f64).collect()
    }

    fn dashboard(source: FixtureSource) -> (AdoptionDashboard, Arc<FixtureSource>) {
        let source = Arc::new(source);
        let dashboard = AdoptionDashboard::new(source.clone(), &DashboardConfig::default());
        (dashboard, source)
    }

    #[tokio::test]
    async fn test_failed_fetch_excluded_everywhere() {
        let (dashboard, _) = dashboard(
            FixtureSource::new()
                .with_values("raydium", &SCENARIO_A)
                .with_values("orca", &linear(50.0, 1.0, 20))
                .with_values("jupiter", &linear(80.0, -1.0, 20))
                .with_values("marinade", &linear(30.0, 0.5, 20))
                .with_status("drift", 404),
        );

        let snapshot = dashboard.snapshot().await;
        assert_eq!(snapshot.len(), 4);
        assert!(!snapshot.contains_slug("drift"));

        let scores = dashboard.scored_protocols().await;
        assert_eq!(scores.len(), 4);
        assert!(scores.iter().all(|s| s.protocol != "Drift"));
    }

    #[tokio::test]
    async fn test_snapshot_preserves_protocol_order_and_latest_value() {
        let (dashboard, _) = dashboard(
            FixtureSource::new()
                .with_values("drift", &[5.0, 7.0])
                .with_values("orca", &[1.0, 2.0, 3.0]),
        );

        let snapshot = dashboard.snapshot().await;
        let rows: Vec<(&str, f64)> = snapshot
            .rows()
            .iter()
            .map(|r| (r.name.as_str(), r.tvl))
            .collect();
        assert_eq!(rows, vec![("Orca", 3.0), ("Drift", 7.0)]);
    }

    #[tokio::test]
    async fn test_snapshot_and_metrics_thresholds_are_independent() {
        let (dashboard, _) = dashboard(
            FixtureSource::new()
                .with_values("raydium", &SCENARIO_A)
                .with_values("orca", &SCENARIO_A[..13])
                .with_values("jupiter", &[42.0]),
        );

        let snapshot = dashboard.snapshot().await;
        assert!(snapshot.contains_slug("orca"));
        assert!(snapshot.contains_slug("jupiter"));

        let cohort = dashboard.adoption_metrics().await;
        let names: Vec<&str> = cohort.iter().map(|m| m.protocol.as_str()).collect();
        assert_eq!(names, vec!["Raydium"]);
    }

    #[tokio::test]
    async fn test_undefined_volatility_kept_in_snapshot_only() {
        let mut gapped = SCENARIO_A.to_vec();
        gapped[6] = 0.0;

        let (dashboard, _) = dashboard(
            FixtureSource::new()
                .with_values("raydium", &SCENARIO_A)
                .with_values("orca", &gapped),
        );

        let snapshot = dashboard.snapshot().await;
        assert!(snapshot.contains_slug("orca"));
        assert_eq!(snapshot.rows()[1].tvl, 135.0);

        let cohort = dashboard.adoption_metrics().await;
        let names: Vec<&str> = cohort.iter().map(|m| m.protocol.as_str()).collect();
        assert_eq!(names, vec!["Raydium"]);
    }

    #[tokio::test]
    async fn test_identical_growth_gets_neutral_normalization() {
        // both grow exactly 20% over the window with different paths
        let mut bumpy = linear(100.0, 0.0, 14);
        bumpy[5] = 130.0;
        bumpy[13] = 120.0;
        let mut steady = linear(50.0, 0.0, 14);
        steady[13] = 60.0;

        let (dashboard, _) = dashboard(
            FixtureSource::new()
                .with_values("orca", &bumpy)
                .with_values("jupiter", &steady),
        );

        let scores = dashboard.scored_protocols().await;
        assert_eq!(scores.len(), 2);
        for s in &scores {
            assert!((s.growth_rate - 0.2).abs() < 1e-12);
            assert_eq!(s.norm_growth, NEUTRAL_NORMALIZED);
            assert!(s.adoption_quality_score.is_finite());
        }
        // steadier path ranks first
        assert_eq!(scores[0].protocol, "Jupiter");
    }

    #[tokio::test]
    async fn test_each_slug_fetched_once_per_session() {
        let (dashboard, source) = dashboard(
            FixtureSource::new()
                .with_values("raydium", &SCENARIO_A)
                .with_status("drift", 500),
        );

        dashboard.report().await.unwrap();
        dashboard.report().await.unwrap();
        dashboard.series("raydium").await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_empty_cohort_is_terminal() {
        let (dashboard, _) = dashboard(FixtureSource::new());

        assert!(dashboard.snapshot().await.is_empty());
        assert_eq!(dashboard.report().await, Err(DashboardError::NoUsableData));
    }

    #[tokio::test]
    async fn test_report_is_idempotent() {
        let (dashboard, _) = dashboard(
            FixtureSource::new()
                .with_values("raydium", &SCENARIO_A)
                .with_values("orca", &linear(50.0, 1.0, 20))
                .with_values("marinade", &linear(90.0, -2.0, 30)),
        );

        let first = dashboard.report().await.unwrap();
        let second = dashboard.report().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.summary.top_tvl_protocol, "Raydium");
    }

    #[tokio::test]
    async fn test_rolling_volatility_alignment() {
        let (dashboard, _) = dashboard(FixtureSource::new().with_values("orca", &SCENARIO_A));

        let points = dashboard.rolling_volatility("orca").await.unwrap();
        assert_eq!(points.len(), SCENARIO_A.len());
        assert!(points[..7].iter().all(|p| p.volatility.is_none()));
        assert!(points[7..].iter().all(|p| p.volatility.is_some()));

        assert!(dashboard.rolling_volatility("drift").await.is_none());
    }
}
