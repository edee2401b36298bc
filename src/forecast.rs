//! Scenario-based metric projection

use crate::data::ChannelMetrics;
use crate::error::{GrowthError, Result};
use crate::milestone::{MilestoneProjection, MilestoneProjector, SUBSCRIBER_MILESTONE};
use crate::rates::GrowthRates;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Projection for one metric (subscribers or views)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricProjection {
    /// Value at forecast time
    pub current: u64,
    /// Projected value at the end of the horizon
    ///
    /// Kept as a float; flooring to whole counts is a presentation concern
    /// so that chained computations do not compound rounding error.
    pub projected: f64,
    /// Projected minus current
    pub change: f64,
    /// Scenario-adjusted daily growth rate applied
    pub daily_growth: f64,
}

/// Video-count projection over the horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VideoProjection {
    /// Published videos at forecast time
    pub current: u64,
    /// Projected total after the horizon
    pub projected: u64,
    /// Estimated uploads during the horizon (at least one per week)
    pub new_videos: u64,
}

/// Derived metrics at the end of the horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedMetrics {
    /// Projected views divided by projected video count
    pub projected_avg_views_per_video: f64,
    /// Projected subscribers per hundred projected views
    pub projected_conversion_rate: f64,
}

/// One scenario's projection of channel metrics over a horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastScenario {
    /// Scenario name as requested (open set; unknown names use the
    /// realistic multiplier)
    pub name: String,
    /// Subscriber projection
    pub subscribers: MetricProjection,
    /// View projection
    pub views: MetricProjection,
    /// Video-count projection
    pub videos: VideoProjection,
    /// Derived per-video and conversion metrics
    pub metrics: ProjectedMetrics,
    /// Distance to the 1M-subscriber milestone under this scenario
    pub milestone: MilestoneProjection,
}

/// Projects current metrics forward under named scenarios
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioForecaster;

impl ScenarioForecaster {
    /// Growth-rate multiplier for a scenario name
    ///
    /// The name set is open: anything other than the three standard
    /// scenarios maps to 1.0 rather than an error, keeping the forecaster
    /// forward-compatible with new scenario labels.
    pub fn scenario_multiplier(name: &str) -> f64 {
        match name {
            "optimistic" => 1.5,
            "realistic" => 1.0,
            "pessimistic" => 0.5,
            _ => 1.0,
        }
    }

    /// Project metrics `days_ahead` days forward under a scenario,
    /// anchored at the current clock
    pub fn forecast(
        current: &ChannelMetrics,
        rates: &GrowthRates,
        days_ahead: u32,
        scenario: &str,
    ) -> Result<ForecastScenario> {
        Self::forecast_from(Utc::now(), current, rates, days_ahead, scenario)
    }

    /// Project metrics forward from an explicit reference instant
    pub fn forecast_from(
        now: DateTime<Utc>,
        current: &ChannelMetrics,
        rates: &GrowthRates,
        days_ahead: u32,
        scenario: &str,
    ) -> Result<ForecastScenario> {
        if days_ahead == 0 {
            return Err(GrowthError::InvalidParameter(
                "Forecast horizon must be at least one day".to_string(),
            ));
        }

        let multiplier = Self::scenario_multiplier(scenario);
        let days = days_ahead as f64;

        let subscriber_daily = rates.subscriber_daily * multiplier;
        let view_daily = rates.view_daily * multiplier;

        let projected_subscribers = current.subscribers as f64 + subscriber_daily * days;
        let projected_views = current.total_views as f64 + view_daily * days;

        // Upload cadence is assumed at one video per week regardless of
        // history; the floor keeps short horizons from projecting zero.
        let new_videos = (u64::from(days_ahead) / 7).max(1);
        let projected_videos = current.total_videos + new_videos;

        let metrics = ProjectedMetrics {
            projected_avg_views_per_video: projected_views / projected_videos.max(1) as f64,
            projected_conversion_rate: projected_subscribers / projected_views.max(1.0) * 100.0,
        };

        let milestone = MilestoneProjector::project_from(
            now,
            current.subscribers as f64,
            subscriber_daily,
            SUBSCRIBER_MILESTONE,
            i64::from(days_ahead),
        );

        Ok(ForecastScenario {
            name: scenario.to_string(),
            subscribers: MetricProjection {
                current: current.subscribers,
                projected: projected_subscribers,
                change: projected_subscribers - current.subscribers as f64,
                daily_growth: subscriber_daily,
            },
            views: MetricProjection {
                current: current.total_views,
                projected: projected_views,
                change: projected_views - current.total_views as f64,
                daily_growth: view_daily,
            },
            videos: VideoProjection {
                current: current.total_videos,
                projected: projected_videos,
                new_videos,
            },
            metrics,
            milestone,
        })
    }
}
