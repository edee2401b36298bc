//! Growth-rate estimation from ordered snapshot sequences

use crate::data::Snapshot;
use serde::Serialize;

/// Per-day and per-week growth rates derived from snapshot history
///
/// All-zero rates mean "insufficient data", never "no growth": fewer than
/// two snapshots with a positive day gap between them leave every rate at
/// 0.0, and consumers must treat that case as missing history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GrowthRates {
    /// Mean subscriber change per day
    pub subscriber_daily: f64,
    /// Mean view change per day
    pub view_daily: f64,
    /// Subscriber change per week (daily rate scaled by 7)
    pub subscriber_weekly: f64,
    /// View change per week (daily rate scaled by 7)
    pub view_weekly: f64,
}

impl GrowthRates {
    /// Whether any qualifying snapshot pair contributed to these rates
    pub fn has_data(&self) -> bool {
        self.subscriber_daily != 0.0
            || self.view_daily != 0.0
            || self.subscriber_weekly != 0.0
            || self.view_weekly != 0.0
    }
}

/// Derives growth rates from a snapshot sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowthRateEstimator;

impl GrowthRateEstimator {
    /// Estimate daily and weekly growth rates
    ///
    /// Snapshots are re-sorted by timestamp before use, so callers may pass
    /// history in any order. For each adjacent pair the per-day delta is
    /// `(curr - prev) / day_gap` with the gap measured in whole days; pairs
    /// with a gap of zero or less (same-day or out-of-order observations)
    /// are skipped so they can never produce infinite or negative-gap rates.
    /// The daily rate is the arithmetic mean of the per-pair deltas, not a
    /// single first-to-last slope.
    pub fn estimate(snapshots: &[Snapshot]) -> GrowthRates {
        if snapshots.len() < 2 {
            return GrowthRates::default();
        }

        let mut ordered: Vec<&Snapshot> = snapshots.iter().collect();
        ordered.sort_by_key(|s| s.timestamp);

        let mut subscriber_deltas = Vec::with_capacity(ordered.len() - 1);
        let mut view_deltas = Vec::with_capacity(ordered.len() - 1);

        for pair in ordered.windows(2) {
            let (prev, curr) = (pair[0], pair[1]);
            let day_gap = (curr.timestamp - prev.timestamp).num_days();
            if day_gap <= 0 {
                continue;
            }

            let days = day_gap as f64;
            subscriber_deltas.push(
                (curr.metrics.subscribers as f64 - prev.metrics.subscribers as f64) / days,
            );
            view_deltas
                .push((curr.metrics.total_views as f64 - prev.metrics.total_views as f64) / days);
        }

        if subscriber_deltas.is_empty() {
            return GrowthRates::default();
        }

        let subscriber_daily =
            subscriber_deltas.iter().sum::<f64>() / subscriber_deltas.len() as f64;
        let view_daily = view_deltas.iter().sum::<f64>() / view_deltas.len() as f64;

        GrowthRates {
            subscriber_daily,
            view_daily,
            subscriber_weekly: subscriber_daily * 7.0,
            view_weekly: view_daily * 7.0,
        }
    }
}
