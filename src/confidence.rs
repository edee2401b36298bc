//! Forecast reliability scoring

use crate::data::Snapshot;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Qualitative confidence band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Sparse or erratic history
    Low,
    /// Usable but limited history
    Medium,
    /// Dense, consistent history
    High,
}

/// Heuristic reliability score for a forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Confidence {
    /// Qualitative band derived from the score
    pub level: ConfidenceLevel,
    /// Score clamped to [10, 90]
    pub score: u8,
    /// Number of snapshots the score was derived from
    pub snapshot_count: usize,
    /// Growth consistency in [0, 1], from the coefficient of variation of
    /// subscriber counts
    pub growth_consistency: f64,
}

/// Scores forecast reliability from snapshot count and variance
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceEstimator;

impl ConfidenceEstimator {
    /// Estimate confidence for forecasts over this snapshot history
    ///
    /// Fewer than 3 snapshots short-circuits to a fixed low/30 result:
    /// the consistency measure is not meaningful below that.
    pub fn estimate(snapshots: &[Snapshot]) -> Confidence {
        let count = snapshots.len();

        if count < 3 {
            return Confidence {
                level: ConfidenceLevel::Low,
                score: 30,
                snapshot_count: count,
                growth_consistency: 0.0,
            };
        }

        let base: i32 = if count >= 10 {
            80
        } else if count >= 5 {
            60
        } else {
            40
        };

        let subscriber_values: Vec<f64> = snapshots
            .iter()
            .map(|s| s.metrics.subscribers as f64)
            .collect();

        let mean = subscriber_values.as_slice().mean();
        let std_dev = subscriber_values.as_slice().population_std_dev();
        let cv = if mean > 0.0 { std_dev / mean } else { 1.0 };
        let consistency = (1.0 - cv.min(1.0)).max(0.0);

        let adjusted = if consistency > 0.7 {
            base + 10
        } else if consistency < 0.5 {
            base - 10
        } else {
            base
        };

        let score = adjusted.clamp(10, 90) as u8;
        let level = if score >= 70 {
            ConfidenceLevel::High
        } else if score >= 50 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        };

        Confidence {
            level,
            score,
            snapshot_count: count,
            growth_consistency: consistency,
        }
    }
}
