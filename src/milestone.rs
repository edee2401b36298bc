//! Milestone distance projection

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// The headline subscriber milestone projections aim at
pub const SUBSCRIBER_MILESTONE: f64 = 1_000_000.0;

/// Days-to-target estimate with a projected calendar date
///
/// Both fields are `None` when the daily growth rate is zero or negative:
/// a milestone that can never be reached at the current rate is reported as
/// absent, not as a negative or infinite day count. `projected_date` alone
/// is `None` when the distance is so large the calendar date is not
/// representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MilestoneProjection {
    /// Days from the forecast base until the target is reached
    pub days_to_target: Option<f64>,
    /// Calendar date the target is reached
    pub projected_date: Option<DateTime<Utc>>,
}

/// Time estimate for one assumed growth cadence
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MilestoneEstimate {
    /// Assumed subscribers gained per day
    pub daily_growth: f64,
    /// Days needed at that cadence
    pub days_needed: Option<f64>,
    /// Calendar date the target is reached
    pub estimated_date: Option<DateTime<Utc>>,
    /// Days needed expressed in years
    pub years: Option<f64>,
}

/// Projects distance to metric milestones
#[derive(Debug, Clone, Copy, Default)]
pub struct MilestoneProjector;

impl MilestoneProjector {
    /// Project days-to-target from the current clock
    pub fn project(
        current: f64,
        daily_growth: f64,
        target: f64,
        forecast_base_days: i64,
    ) -> MilestoneProjection {
        Self::project_from(Utc::now(), current, daily_growth, target, forecast_base_days)
    }

    /// Project days-to-target from an explicit reference instant
    ///
    /// `forecast_base_days` shifts the projected date past the forecast
    /// horizon the projection is folded into. An already-reached target
    /// yields zero days, never a negative count.
    pub fn project_from(
        now: DateTime<Utc>,
        current: f64,
        daily_growth: f64,
        target: f64,
        forecast_base_days: i64,
    ) -> MilestoneProjection {
        if daily_growth <= 0.0 {
            return MilestoneProjection::default();
        }

        let days_to_target = ((target - current) / daily_growth).max(0.0);
        let total_days = forecast_base_days as f64 + days_to_target;

        MilestoneProjection {
            days_to_target: Some(days_to_target),
            projected_date: date_after(now, total_days),
        }
    }

    /// Time estimates to a target under fixed growth cadences
    ///
    /// The cadence table mirrors the classic milestone tracker:
    /// conservative 1/day, moderate 5/day, aggressive 10/day and viral
    /// 50/day.
    pub fn time_estimates(
        now: DateTime<Utc>,
        current: f64,
        target: f64,
    ) -> BTreeMap<String, MilestoneEstimate> {
        const CADENCES: [(&str, f64); 4] = [
            ("conservative", 1.0),
            ("moderate", 5.0),
            ("aggressive", 10.0),
            ("viral", 50.0),
        ];

        let subscribers_needed = (target - current).max(0.0);
        let mut estimates = BTreeMap::new();

        for (name, daily_growth) in CADENCES {
            let days_needed = subscribers_needed / daily_growth;
            estimates.insert(
                name.to_string(),
                MilestoneEstimate {
                    daily_growth,
                    days_needed: Some(days_needed),
                    estimated_date: date_after(now, days_needed),
                    years: Some(days_needed / 365.25),
                },
            );
        }

        estimates
    }
}

/// A calendar date `days` days after `now`, or `None` when the result is
/// not representable
fn date_after(now: DateTime<Utc>, days: f64) -> Option<DateTime<Utc>> {
    let seconds = days * 86_400.0;
    if !seconds.is_finite() || seconds >= i64::MAX as f64 {
        return None;
    }

    Duration::try_seconds(seconds as i64).and_then(|offset| now.checked_add_signed(offset))
}
