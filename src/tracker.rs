//! High-level tracking and forecasting operations
//!
//! [`PerformanceTracker`] ties the data source and snapshot store to the
//! estimation components and exposes the four operations the presentation
//! layer consumes: snapshot tracking, growth-trend analysis, multi-scenario
//! forecasting and strategy-impact analysis.

use crate::confidence::{Confidence, ConfidenceEstimator};
use crate::data::{ChannelDataSource, ChannelMetrics, Snapshot};
use crate::error::{GrowthError, Result};
use crate::forecast::{ForecastScenario, ScenarioForecaster};
use crate::milestone::{MilestoneProjector, SUBSCRIBER_MILESTONE};
use crate::rates::{GrowthRateEstimator, GrowthRates};
use crate::store::SnapshotStore;
use crate::strategy::{StrategyImpact, StrategyImpactAnalyzer};
use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Supported forecast horizons in days
pub const FORECAST_HORIZONS: [u32; 5] = [7, 30, 90, 180, 365];

/// Scenarios forecast when the caller requests none explicitly
pub const STANDARD_SCENARIOS: [&str; 3] = ["realistic", "optimistic", "pessimistic"];

/// Observation window of a trend report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPeriod {
    /// First snapshot in the window
    pub start: DateTime<Utc>,
    /// Last snapshot in the window
    pub end: DateTime<Utc>,
    /// Whole days between them
    pub days: i64,
}

/// Subscriber movement across the window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubscriberTrend {
    /// Count at the start of the window
    pub start: u64,
    /// Count at the end of the window
    pub end: u64,
    /// End minus start
    pub change: i64,
    /// Change relative to the starting count, in percent
    pub growth_rate_percent: f64,
    /// Change divided by elapsed days
    pub daily_average: f64,
}

/// View movement across the window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewTrend {
    /// Count at the start of the window
    pub start: u64,
    /// Count at the end of the window
    pub end: u64,
    /// End minus start
    pub change: i64,
}

/// Derived ratios at the end of the window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendMetrics {
    /// Subscribers per hundred lifetime views
    pub conversion_rate_percent: f64,
    /// Lifetime views per subscriber
    pub views_per_subscriber: f64,
}

/// Distance to the 1M-subscriber milestone at the trend's growth rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendProjection {
    /// Subscribers at the end of the window
    pub current_subscribers: u64,
    /// Milestone target
    pub target_subscribers: u64,
    /// Daily growth the projection assumes
    pub daily_growth_needed: f64,
    /// Days until the milestone; absent when growth is zero or negative
    pub days_to_1m: Option<f64>,
    /// Projected milestone date; absent when growth is zero or negative
    pub projected_date: Option<DateTime<Utc>>,
}

/// Full growth-trend report over an observation window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthTrendReport {
    /// Observation window
    pub period: TrendPeriod,
    /// Subscriber movement
    pub subscribers: SubscriberTrend,
    /// View movement
    pub views: ViewTrend,
    /// Derived ratios
    pub metrics: TrendMetrics,
    /// Milestone projection
    pub projection: TrendProjection,
    /// Advisory notes driven by the trend
    pub recommendations: Vec<String>,
}

/// Outcome of a growth-trend analysis
///
/// Too little history is a distinct, explicit state rather than an error or
/// a zero-growth report: a caller can always recover by taking more
/// snapshots over time, and a no-data state must never be mistaken for a
/// real flat forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendAnalysis {
    /// A full report computed from at least two in-window snapshots
    Report(GrowthTrendReport),
    /// Fewer than two snapshots fell inside the window
    InsufficientData {
        /// Snapshots found in the window
        snapshot_count: usize,
        /// Human-readable explanation
        message: String,
    },
}

impl TrendAnalysis {
    /// The report, if the analysis produced one
    pub fn report(&self) -> Option<&GrowthTrendReport> {
        match self {
            TrendAnalysis::Report(report) => Some(report),
            TrendAnalysis::InsufficientData { .. } => None,
        }
    }
}

/// Multi-scenario forecast for one channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastBundle {
    /// Channel the forecast is for
    pub channel_handle: String,
    /// When the forecast was generated
    pub generated_at: DateTime<Utc>,
    /// Forecast horizon in days
    pub days_ahead: u32,
    /// Metrics from the latest snapshot
    pub current_metrics: ChannelMetrics,
    /// Per-scenario projections, keyed by scenario name
    pub scenarios: BTreeMap<String, ForecastScenario>,
    /// Reliability of the forecast
    pub confidence: Confidence,
    /// Advisory notes driven by the estimated rates
    pub recommendations: Vec<String>,
}

/// Combined snapshot, trend and recommendation summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    /// Channel the summary is for
    pub channel_handle: String,
    /// When the summary was generated
    pub generated_at: DateTime<Utc>,
    /// Metrics from the freshly taken snapshot
    pub current_metrics: ChannelMetrics,
    /// 30-day growth trend
    pub growth_trend: TrendAnalysis,
    /// Advisory notes from the trend, empty when data is insufficient
    pub recommendations: Vec<String>,
}

/// Channel growth tracker and forecaster
///
/// Owns no hidden state: the data source and snapshot store are injected at
/// construction and every operation recomputes from the stored history.
pub struct PerformanceTracker<S: ChannelDataSource> {
    source: S,
    store: SnapshotStore,
}

impl<S: ChannelDataSource> PerformanceTracker<S> {
    /// Create a tracker over a data source and snapshot store
    pub fn new(source: S, store: SnapshotStore) -> Self {
        Self { source, store }
    }

    /// The underlying snapshot store
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Take and persist a snapshot of the channel's current metrics
    pub fn track_snapshot(&self, channel_handle: &str) -> Result<Snapshot> {
        let observation = self.source.fetch_channel(channel_handle)?;
        debug!(
            "tracking snapshot for {}: {} subscribers",
            channel_handle, observation.subscribers
        );

        self.store.append(
            channel_handle,
            observation.metrics(),
            observation.recent_videos,
        )
    }

    /// Analyze the growth trend over the last `days` days
    pub fn analyze_growth_trend(&self, channel_handle: &str, days: i64) -> Result<TrendAnalysis> {
        let now = Utc::now();
        let cutoff = now - Duration::days(days);
        let snapshots = self.store.query(channel_handle, Some(cutoff))?;

        if snapshots.len() < 2 {
            return Ok(TrendAnalysis::InsufficientData {
                snapshot_count: snapshots.len(),
                message: "Need at least 2 snapshots to analyze growth".to_string(),
            });
        }

        let first = &snapshots[0];
        let last = &snapshots[snapshots.len() - 1];

        let subscriber_change = last.metrics.subscribers as i64 - first.metrics.subscribers as i64;
        let view_change = last.metrics.total_views as i64 - first.metrics.total_views as i64;
        let days_elapsed = (last.timestamp - first.timestamp).num_days();

        let growth_rate_percent = if days_elapsed > 0 {
            subscriber_change as f64 / first.metrics.subscribers.max(1) as f64 * 100.0
        } else {
            0.0
        };
        let daily_average = subscriber_change as f64 / days_elapsed.max(1) as f64;

        let conversion_rate_percent =
            last.metrics.subscribers as f64 / last.metrics.total_views.max(1) as f64 * 100.0;
        let views_per_subscriber =
            last.metrics.total_views as f64 / last.metrics.subscribers.max(1) as f64;

        let milestone = MilestoneProjector::project_from(
            now,
            last.metrics.subscribers as f64,
            daily_average,
            SUBSCRIBER_MILESTONE,
            0,
        );

        let recommendations =
            growth_recommendations(growth_rate_percent, daily_average, conversion_rate_percent);

        Ok(TrendAnalysis::Report(GrowthTrendReport {
            period: TrendPeriod {
                start: first.timestamp,
                end: last.timestamp,
                days: days_elapsed,
            },
            subscribers: SubscriberTrend {
                start: first.metrics.subscribers,
                end: last.metrics.subscribers,
                change: subscriber_change,
                growth_rate_percent,
                daily_average,
            },
            views: ViewTrend {
                start: first.metrics.total_views,
                end: last.metrics.total_views,
                change: view_change,
            },
            metrics: TrendMetrics {
                conversion_rate_percent,
                views_per_subscriber,
            },
            projection: TrendProjection {
                current_subscribers: last.metrics.subscribers,
                target_subscribers: SUBSCRIBER_MILESTONE as u64,
                daily_growth_needed: daily_average,
                days_to_1m: milestone.days_to_target,
                projected_date: milestone.projected_date,
            },
            recommendations,
        }))
    }

    /// Forecast metrics over one of the supported horizons
    ///
    /// An empty scenario list forecasts the three standard scenarios.
    /// Requires at least one stored snapshot for current metrics; rates over
    /// a single snapshot are zero, which downstream reads as insufficient
    /// history rather than flat growth.
    pub fn forecast_performance(
        &self,
        channel_handle: &str,
        days_ahead: u32,
        scenarios: &[String],
    ) -> Result<ForecastBundle> {
        if !FORECAST_HORIZONS.contains(&days_ahead) {
            return Err(GrowthError::InvalidParameter(format!(
                "Forecast horizon must be one of {:?} days, got {}",
                FORECAST_HORIZONS, days_ahead
            )));
        }

        let snapshots = self.store.query(channel_handle, None)?;
        let (current, rates) = self.current_state(channel_handle, &snapshots)?;

        let now = Utc::now();
        let requested: Vec<String> = if scenarios.is_empty() {
            STANDARD_SCENARIOS.iter().map(|s| s.to_string()).collect()
        } else {
            scenarios.to_vec()
        };

        let mut forecasts = BTreeMap::new();
        for name in requested {
            let scenario =
                ScenarioForecaster::forecast_from(now, &current, &rates, days_ahead, &name)?;
            forecasts.insert(name, scenario);
        }

        let confidence = ConfidenceEstimator::estimate(&snapshots);
        debug!(
            "forecast for {} over {} days: {} scenarios, confidence {}",
            channel_handle,
            days_ahead,
            forecasts.len(),
            confidence.score
        );

        let horizon_growth_percent = rates.subscriber_daily * days_ahead as f64
            / current.subscribers.max(1) as f64
            * 100.0;
        let conversion_rate_percent =
            current.subscribers as f64 / current.total_views.max(1) as f64 * 100.0;
        let recommendations = growth_recommendations(
            horizon_growth_percent,
            rates.subscriber_daily,
            conversion_rate_percent,
        );

        Ok(ForecastBundle {
            channel_handle: channel_handle.to_string(),
            generated_at: now,
            days_ahead,
            current_metrics: current,
            scenarios: forecasts,
            confidence,
            recommendations,
        })
    }

    /// Quantify the effect of strategy levers against a baseline forecast
    pub fn analyze_scenario_impact(
        &self,
        channel_handle: &str,
        strategy_changes: &HashMap<String, f64>,
        days_ahead: u32,
    ) -> Result<StrategyImpact> {
        let snapshots = self.store.query(channel_handle, None)?;
        let (current, rates) = self.current_state(channel_handle, &snapshots)?;

        StrategyImpactAnalyzer::analyze(&current, &rates, strategy_changes, days_ahead)
    }

    /// Take a fresh snapshot and summarize the channel's recent growth
    pub fn performance_summary(&self, channel_handle: &str) -> Result<PerformanceSummary> {
        let snapshot = self.track_snapshot(channel_handle)?;
        let growth_trend = self.analyze_growth_trend(channel_handle, 30)?;

        let recommendations = growth_trend
            .report()
            .map(|report| report.recommendations.clone())
            .unwrap_or_default();

        Ok(PerformanceSummary {
            channel_handle: channel_handle.to_string(),
            generated_at: Utc::now(),
            current_metrics: snapshot.metrics,
            growth_trend,
            recommendations,
        })
    }

    /// Latest metrics and estimated rates, requiring stored history
    fn current_state(
        &self,
        channel_handle: &str,
        snapshots: &[Snapshot],
    ) -> Result<(ChannelMetrics, GrowthRates)> {
        let latest = snapshots.last().ok_or_else(|| {
            GrowthError::InsufficientData(format!(
                "No snapshots recorded for channel '{}'",
                channel_handle
            ))
        })?;

        Ok((
            latest.metrics.clone(),
            GrowthRateEstimator::estimate(snapshots),
        ))
    }
}

/// Advisory notes driven by growth metrics
///
/// Thresholds follow the channel-advisor heuristics: below 5% window growth
/// push on click-through, below one subscriber a day push on cadence, below
/// 1% conversion push on calls to action, and strong growth on both axes
/// earns a keep-going note.
pub fn growth_recommendations(
    growth_rate_percent: f64,
    daily_growth: f64,
    conversion_rate_percent: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if growth_rate_percent < 5.0 {
        recommendations.push(
            "Subscriber growth rate is low. Focus on improving video titles and thumbnails to increase click-through rate."
                .to_string(),
        );
    }

    if daily_growth < 1.0 {
        recommendations.push(
            "Daily subscriber growth is below 1. Consider increasing upload frequency or improving content quality."
                .to_string(),
        );
    }

    if conversion_rate_percent < 1.0 {
        recommendations.push(
            "Conversion rate (subscribers/views) is low. Improve call-to-actions in video descriptions and end screens."
                .to_string(),
        );
    }

    if growth_rate_percent > 10.0 && daily_growth > 5.0 {
        recommendations.push(
            "Great growth! Maintain consistency and consider scaling successful content patterns."
                .to_string(),
        );
    }

    recommendations
}
