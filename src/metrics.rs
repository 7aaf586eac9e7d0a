//! Adoption quality scoring
//!
//! # Pipeline
//!
//! ```text
//! TvlSeries (>= 14 points)
//!     ↓
//! ProtocolMetrics { growth_rate, volatility }
//!     ↓  min-max normalize across the cohort
//! ScoredProtocol { norm_growth, norm_volatility, adoption_quality_score }
//! ```
//!
//! Normalization is relative to the cohort passed in, so scores from
//! different cohorts are not comparable.

use serde::Serialize;
use thiserror::Error;

use crate::series::{TvlPoint, TvlSeries};
use crate::stats;

/// Minimum history length for growth/volatility to be computed
pub const MIN_METRICS_OBSERVATIONS: usize = 14;

/// Rolling window for day-over-day volatility
pub const VOLATILITY_WINDOW: usize = 7;

pub const GROWTH_WEIGHT: f64 = 0.6;
pub const STABILITY_WEIGHT: f64 = 0.4;

/// Normalized value assigned to every member when the cohort range is zero
pub const NEUTRAL_NORMALIZED: f64 = 0.5;

/// Why a protocol was left out of the metrics cohort
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsExclusion {
    #[error("only {observations} observations, need {}", MIN_METRICS_OBSERVATIONS)]
    InsufficientHistory { observations: usize },
    #[error("growth undefined for initial TVL {initial}")]
    UndefinedGrowth { initial: f64 },
    #[error("no defined {}-day volatility window", VOLATILITY_WINDOW)]
    UndefinedVolatility,
}

/// Raw per-protocol adoption metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolMetrics {
    pub protocol: String,
    /// Simple return over the observed window
    pub growth_rate: f64,
    /// Mean of the rolling std of daily percentage change
    pub volatility: f64,
}

impl ProtocolMetrics {
    pub fn compute(protocol: &str, series: &TvlSeries) -> Result<Self, MetricsExclusion> {
        Self::from_values(protocol, &series.values())
    }

    /// Same as [`compute`](Self::compute) for points in arbitrary order
    pub fn from_points(protocol: &str, points: &[TvlPoint]) -> Result<Self, MetricsExclusion> {
        let mut sorted = points.to_vec();
        sorted.sort_by_key(|p| p.date);
        let values: Vec<f64> = sorted.iter().map(|p| p.total_liquidity_usd).collect();
        Self::from_values(protocol, &values)
    }

    /// `values` must already be in chronological order
    fn from_values(protocol: &str, values: &[f64]) -> Result<Self, MetricsExclusion> {
        if values.len() < MIN_METRICS_OBSERVATIONS {
            return Err(MetricsExclusion::InsufficientHistory {
                observations: values.len(),
            });
        }

        let initial = values[0];
        let growth_rate = growth_rate(values).ok_or(MetricsExclusion::UndefinedGrowth { initial })?;
        let volatility = mean_rolling_volatility(values).ok_or(MetricsExclusion::UndefinedVolatility)?;

        Ok(Self {
            protocol: protocol.to_string(),
            growth_rate,
            volatility,
        })
    }
}

/// `last / first - 1`, `None` when not finite
pub fn growth_rate(values: &[f64]) -> Option<f64> {
    let (first, last) = (values.first()?, values.last()?);
    let growth = last / first - 1.0;
    growth.is_finite().then_some(growth)
}

/// Rolling volatility series aligned with `values`
pub fn rolling_volatility(values: &[f64]) -> Vec<Option<f64>> {
    stats::rolling_std(&stats::pct_change(values), VOLATILITY_WINDOW)
}

pub fn mean_rolling_volatility(values: &[f64]) -> Option<f64> {
    stats::mean_defined(&rolling_volatility(values))
}

/// Min-max normalize to [0, 1]
///
/// A zero range (single member or identical values) maps every member to
/// [`NEUTRAL_NORMALIZED`].
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range <= 0.0 || !range.is_finite() {
        return vec![NEUTRAL_NORMALIZED; values.len()];
    }

    values.iter().map(|v| (v - min) / range).collect()
}

/// Weighted blend; lower volatility scores higher
pub fn adoption_quality_score(norm_growth: f64, norm_volatility: f64) -> f64 {
    GROWTH_WEIGHT * norm_growth + STABILITY_WEIGHT * (1.0 - norm_volatility)
}

/// Metrics plus cohort-relative normalization and composite score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProtocol {
    pub protocol: String,
    pub growth_rate: f64,
    pub volatility: f64,
    pub norm_growth: f64,
    pub norm_volatility: f64,
    pub adoption_quality_score: f64,
}

/// Normalize and score a cohort, preserving input order
pub fn score_cohort(cohort: &[ProtocolMetrics]) -> Vec<ScoredProtocol> {
    let growth: Vec<f64> = cohort.iter().map(|m| m.growth_rate).collect();
    let volatility: Vec<f64> = cohort.iter().map(|m| m.volatility).collect();

    let norm_growth = min_max_normalize(&growth);
    let norm_volatility = min_max_normalize(&volatility);

    cohort
        .iter()
        .zip(norm_growth.into_iter().zip(norm_volatility))
        .map(|(m, (ng, nv))| ScoredProtocol {
            protocol: m.protocol.clone(),
            growth_rate: m.growth_rate,
            volatility: m.volatility,
            norm_growth: ng,
            norm_volatility: nv,
            adoption_quality_score: adoption_quality_score(ng, nv),
        })
        .collect()
}

/// Sort by score, highest first; ties keep their order
pub fn rank_by_score(mut scored: Vec<ScoredProtocol>) -> Vec<ScoredProtocol> {
    scored.sort_by(|a, b| b.adoption_quality_score.total_cmp(&a.adoption_quality_score));
    scored
}
