//! TVL time series types and the explicit fetch outcome
//!
//! A [`TvlSeries`] is always non-empty and sorted ascending by date. Anything
//! that fails validation is represented as [`SeriesLookup::NoData`] with a
//! [`NoDataReason`], never as a partially populated series.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// One observation of a protocol's total value locked
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TvlPoint {
    pub date: DateTime<Utc>,
    pub total_liquidity_usd: f64,
}

impl TvlPoint {
    /// Build a point from a Unix-epoch seconds timestamp
    pub fn from_unix(timestamp: i64, total_liquidity_usd: f64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(timestamp, 0).map(|date| Self {
            date,
            total_liquidity_usd,
        })
    }
}

/// Chronologically ordered, non-empty TVL history for one protocol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TvlSeries {
    points: Vec<TvlPoint>,
}

impl TvlSeries {
    /// Validate and order raw points.
    ///
    /// Returns `None` for an empty input. Points are stable-sorted by date so
    /// that equal timestamps keep provider order.
    pub fn new(mut points: Vec<TvlPoint>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        points.sort_by_key(|p| p.date);
        Some(Self { points })
    }

    pub fn points(&self) -> &[TvlPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &TvlPoint {
        &self.points[0]
    }

    /// Most recent observation
    pub fn latest(&self) -> &TvlPoint {
        &self.points[self.points.len() - 1]
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total_liquidity_usd).collect()
    }
}

/// Why a protocol has no usable TVL series
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoDataReason {
    #[error("empty protocol slug")]
    EmptySlug,
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed JSON payload: {0}")]
    MalformedPayload(String),
    #[error("payload has no list-typed `tvl` field")]
    MissingTvlField,
    #[error("entry {index} has no numeric `totalLiquidityUSD`")]
    MissingLiquidity { index: usize },
    #[error("entry {index} has no valid `date`")]
    InvalidDate { index: usize },
    #[error("`tvl` list is empty")]
    EmptySeries,
}

/// Outcome of looking up a protocol's series
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesLookup {
    Available(Arc<TvlSeries>),
    NoData(NoDataReason),
}

impl SeriesLookup {
    pub fn available(series: TvlSeries) -> Self {
        SeriesLookup::Available(Arc::new(series))
    }

    pub fn series(&self) -> Option<&Arc<TvlSeries>> {
        match self {
            SeriesLookup::Available(series) => Some(series),
            SeriesLookup::NoData(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, SeriesLookup::Available(_))
    }
}

impl From<Result<TvlSeries, NoDataReason>> for SeriesLookup {
    fn from(result: Result<TvlSeries, NoDataReason>) -> Self {
        match result {
            Ok(series) => SeriesLookup::Available(Arc::new(series)),
            Err(reason) => SeriesLookup::NoData(reason),
        }
    }
}
