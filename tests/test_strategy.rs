use assert_approx_eq::assert_approx_eq;
use chrono::{TimeZone, Utc};
use growth_forecast::data::ChannelMetrics;
use growth_forecast::rates::GrowthRates;
use growth_forecast::strategy::StrategyImpactAnalyzer;
use rstest::rstest;
use std::collections::HashMap;

fn sample_metrics() -> ChannelMetrics {
    ChannelMetrics::from_counts(1000, 50000, 20)
}

fn rates(subscriber_daily: f64, view_daily: f64) -> GrowthRates {
    GrowthRates {
        subscriber_daily,
        view_daily,
        subscriber_weekly: subscriber_daily * 7.0,
        view_weekly: view_daily * 7.0,
    }
}

fn levers(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

#[rstest]
#[case(1000.0)]
#[case(10.0)]
#[case(0.0)] // zero baseline growth must not regress either
fn test_ctr_lift_never_decreases_views(#[case] view_daily: f64) {
    let changes = levers(&[("ctr_improvement", 0.2)]);

    let impact =
        StrategyImpactAnalyzer::analyze(&sample_metrics(), &rates(10.0, view_daily), &changes, 30)
            .unwrap();

    assert!(impact.modified.views.projected >= impact.baseline.views.projected);
    assert!(impact.impact.views.change_percent >= 0.0);
}

#[test]
fn test_upload_frequency_lever_math() {
    let changes = levers(&[("upload_frequency", 2.0)]);

    let impact =
        StrategyImpactAnalyzer::analyze(&sample_metrics(), &rates(10.0, 1000.0), &changes, 30)
            .unwrap();

    // subs *= 1 + (2 - 1) * 0.3, views *= 2
    assert_approx_eq!(impact.modified.subscribers.daily_growth, 13.0, 1e-9);
    assert_approx_eq!(impact.modified.views.daily_growth, 2000.0, 1e-9);
    assert_approx_eq!(impact.baseline.subscribers.daily_growth, 10.0, 1e-9);
}

#[test]
fn test_ctr_lever_math() {
    let changes = levers(&[("ctr_improvement", 0.2)]);

    let impact =
        StrategyImpactAnalyzer::analyze(&sample_metrics(), &rates(10.0, 1000.0), &changes, 30)
            .unwrap();

    // views *= 1.2, subs *= 1.1
    assert_approx_eq!(impact.modified.views.daily_growth, 1200.0, 1e-9);
    assert_approx_eq!(impact.modified.subscribers.daily_growth, 11.0, 1e-9);
}

#[test]
fn test_levers_compose_multiplicatively() {
    let changes = levers(&[("ctr_improvement", 0.2), ("seo_optimization", 1.0)]);

    let impact =
        StrategyImpactAnalyzer::analyze(&sample_metrics(), &rates(10.0, 1000.0), &changes, 30)
            .unwrap();

    // views: 1000 * 1.2 * 1.3; subs: 10 * 1.1 * 1.2
    assert_approx_eq!(impact.modified.views.daily_growth, 1560.0, 1e-9);
    assert_approx_eq!(impact.modified.subscribers.daily_growth, 13.2, 1e-9);
}

#[test]
fn test_engagement_lever_only_touches_subscribers() {
    let changes = levers(&[("engagement_improvement", 0.5)]);

    let impact =
        StrategyImpactAnalyzer::analyze(&sample_metrics(), &rates(10.0, 1000.0), &changes, 30)
            .unwrap();

    assert_approx_eq!(impact.modified.subscribers.daily_growth, 12.0, 1e-9);
    assert_approx_eq!(impact.modified.views.daily_growth, 1000.0, 1e-9);
}

#[test]
fn test_unknown_levers_are_ignored() {
    let changes = levers(&[("dance_trend_participation", 5.0)]);

    let impact =
        StrategyImpactAnalyzer::analyze(&sample_metrics(), &rates(10.0, 1000.0), &changes, 30)
            .unwrap();

    assert_eq!(
        impact.modified.subscribers.projected,
        impact.baseline.subscribers.projected
    );
    assert_eq!(impact.impact.subscribers.change_percent, 0.0);
    assert_eq!(impact.impact.views.change_percent, 0.0);
}

#[test]
fn test_non_finite_lever_value_is_rejected() {
    for bad in [f64::NAN, f64::INFINITY] {
        let changes = levers(&[("ctr_improvement", bad)]);
        let result =
            StrategyImpactAnalyzer::analyze(&sample_metrics(), &rates(10.0, 1000.0), &changes, 30);
        assert!(result.is_err());
    }
}

#[test]
fn test_impact_percentages_against_baseline() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let changes = levers(&[("ctr_improvement", 0.2)]);

    let impact = StrategyImpactAnalyzer::analyze_from(
        now,
        &sample_metrics(),
        &rates(10.0, 1000.0),
        &changes,
        30,
    )
    .unwrap();

    // baseline views 80000, modified 50000 + 1200 * 30 = 86000
    assert_approx_eq!(impact.impact.views.baseline_projected, 80000.0, 1e-9);
    assert_approx_eq!(impact.impact.views.modified_projected, 86000.0, 1e-9);
    assert_approx_eq!(
        impact.impact.views.change_percent,
        (86000.0 - 80000.0) / 80000.0 * 100.0,
        1e-9
    );
}

#[test]
fn test_recommendations_mention_applied_levers() {
    let changes = levers(&[("ctr_improvement", 0.2), ("upload_frequency", 2.0)]);

    let impact =
        StrategyImpactAnalyzer::analyze(&sample_metrics(), &rates(10.0, 1000.0), &changes, 30)
            .unwrap();

    assert!(impact
        .recommendations
        .iter()
        .any(|note| note.contains("Click-through")));
    assert!(impact
        .recommendations
        .iter()
        .any(|note| note.contains("upload frequency")));
}
