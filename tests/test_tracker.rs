use chrono::{DateTime, Duration, TimeZone, Utc};
use growth_forecast::data::{
    ChannelDataSource, ChannelMetrics, ChannelObservation, Snapshot, VideoStats,
};
use growth_forecast::error::{GrowthError, Result};
use growth_forecast::store::{MemoryBackend, SnapshotBackend, SnapshotStore};
use growth_forecast::tracker::{PerformanceTracker, TrendAnalysis};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

struct MockSource {
    channels: HashMap<String, ChannelObservation>,
}

impl MockSource {
    fn with_channel(handle: &str, observation: ChannelObservation) -> Self {
        let mut channels = HashMap::new();
        channels.insert(handle.to_string(), observation);
        Self { channels }
    }

    fn empty() -> Self {
        Self {
            channels: HashMap::new(),
        }
    }
}

impl ChannelDataSource for MockSource {
    fn fetch_channel(&self, handle: &str) -> Result<ChannelObservation> {
        self.channels
            .get(handle)
            .cloned()
            .ok_or_else(|| GrowthError::ChannelNotFound(handle.to_string()))
    }
}

fn observation(subscribers: u64, total_views: u64, video_count: usize) -> ChannelObservation {
    let recent_videos = (0..video_count)
        .map(|i| VideoStats {
            video_id: format!("vid{}", i),
            title: format!("Video {}", i),
            views: 1000,
            likes: 100,
            comments: 10,
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        })
        .collect();

    ChannelObservation {
        subscribers,
        total_views,
        total_videos: 20,
        recent_videos,
    }
}

fn snapshot_at(handle: &str, timestamp: DateTime<Utc>, subscribers: u64, views: u64) -> Snapshot {
    Snapshot::new(
        handle,
        timestamp,
        ChannelMetrics::from_counts(subscribers, views, 20),
        Vec::new(),
    )
}

fn seeded_store(snapshots: Vec<Snapshot>) -> SnapshotStore {
    let backend = MemoryBackend::new();
    backend.save_all(&snapshots).unwrap();
    SnapshotStore::new(Box::new(backend))
}

#[test]
fn test_track_snapshot_fetches_and_persists() {
    let source = MockSource::with_channel("mychannel", observation(1000, 50000, 3));
    let tracker = PerformanceTracker::new(source, SnapshotStore::in_memory());

    let snapshot = tracker.track_snapshot("mychannel").unwrap();

    assert_eq!(snapshot.channel_handle, "mychannel");
    assert_eq!(snapshot.metrics.subscribers, 1000);
    assert_eq!(snapshot.metrics.average_views_per_video, 2500.0);
    assert_eq!(tracker.store().len().unwrap(), 1);
}

#[test]
fn test_track_snapshot_bounds_recent_videos() {
    let source = MockSource::with_channel("mychannel", observation(1000, 50000, 9));
    let tracker = PerformanceTracker::new(source, SnapshotStore::in_memory());

    let snapshot = tracker.track_snapshot("mychannel").unwrap();

    assert_eq!(snapshot.recent_videos.len(), 5);
}

#[test]
fn test_track_snapshot_unknown_channel() {
    let tracker = PerformanceTracker::new(MockSource::empty(), SnapshotStore::in_memory());

    let result = tracker.track_snapshot("missing");

    assert!(matches!(result, Err(GrowthError::ChannelNotFound(_))));
    assert!(tracker.store().is_empty().unwrap());
}

#[test]
fn test_growth_trend_with_one_snapshot_is_insufficient() {
    let now = Utc::now();
    let store = seeded_store(vec![snapshot_at("mychannel", now, 1000, 50000)]);
    let tracker = PerformanceTracker::new(MockSource::empty(), store);

    let analysis = tracker.analyze_growth_trend("mychannel", 30).unwrap();

    match analysis {
        TrendAnalysis::InsufficientData { snapshot_count, .. } => {
            assert_eq!(snapshot_count, 1)
        }
        TrendAnalysis::Report(_) => panic!("expected insufficient data with one snapshot"),
    }
}

#[test]
fn test_growth_trend_with_two_snapshots_is_a_full_report() {
    let now = Utc::now();
    let store = seeded_store(vec![
        snapshot_at("mychannel", now - Duration::days(10), 900, 40000),
        snapshot_at("mychannel", now, 1000, 50000),
    ]);
    let tracker = PerformanceTracker::new(MockSource::empty(), store);

    let analysis = tracker.analyze_growth_trend("mychannel", 30).unwrap();
    let report = analysis.report().expect("expected a full report");

    assert_eq!(report.period.days, 10);
    assert_eq!(report.subscribers.start, 900);
    assert_eq!(report.subscribers.end, 1000);
    assert_eq!(report.subscribers.change, 100);
    assert_eq!(report.subscribers.daily_average, 10.0);
    assert_eq!(report.views.change, 10000);
    assert_eq!(report.metrics.conversion_rate_percent, 2.0);
    assert_eq!(report.metrics.views_per_subscriber, 50.0);

    // 999000 subscribers to go at 10 a day
    assert_eq!(report.projection.days_to_1m, Some(99_900.0));
    assert!(report.projection.projected_date.is_some());

    // 11.1% growth at 10/day earns the strong-growth note
    assert!(report
        .recommendations
        .iter()
        .any(|note| note.contains("Great growth")));
}

#[test]
fn test_growth_trend_with_glacial_growth_omits_projected_date() {
    // One subscriber gained in a year: the milestone is hundreds of
    // millions of days out, beyond any representable calendar date.
    let now = Utc::now();
    let store = seeded_store(vec![
        snapshot_at("mychannel", now - Duration::days(365), 1000, 50000),
        snapshot_at("mychannel", now, 1001, 50100),
    ]);
    let tracker = PerformanceTracker::new(MockSource::empty(), store);

    let analysis = tracker.analyze_growth_trend("mychannel", 400).unwrap();
    let report = analysis.report().expect("expected a full report");

    assert!(report.projection.days_to_1m.unwrap() > 3.0e8);
    assert_eq!(report.projection.projected_date, None);
}

#[test]
fn test_growth_trend_window_excludes_old_snapshots() {
    let now = Utc::now();
    let store = seeded_store(vec![
        snapshot_at("mychannel", now - Duration::days(90), 500, 20000),
        snapshot_at("mychannel", now, 1000, 50000),
    ]);
    let tracker = PerformanceTracker::new(MockSource::empty(), store);

    let analysis = tracker.analyze_growth_trend("mychannel", 30).unwrap();

    assert!(analysis.report().is_none());
}

#[test]
fn test_forecast_end_to_end() {
    let now = Utc::now();
    let store = seeded_store(vec![
        snapshot_at("mychannel", now - Duration::days(10), 900, 40000),
        snapshot_at("mychannel", now, 1000, 50000),
    ]);
    let tracker = PerformanceTracker::new(MockSource::empty(), store);

    let bundle = tracker.forecast_performance("mychannel", 30, &[]).unwrap();

    assert_eq!(bundle.current_metrics.subscribers, 1000);
    assert_eq!(bundle.scenarios.len(), 3);

    let realistic = &bundle.scenarios["realistic"];
    assert_eq!(realistic.subscribers.daily_growth, 10.0);
    assert_eq!(realistic.views.daily_growth, 1000.0);
    assert_eq!(realistic.subscribers.projected, 1300.0);
    assert_eq!(realistic.views.projected, 80000.0);

    let optimistic = &bundle.scenarios["optimistic"];
    assert_eq!(optimistic.subscribers.projected, 1450.0);

    let pessimistic = &bundle.scenarios["pessimistic"];
    assert_eq!(pessimistic.subscribers.projected, 1150.0);

    // Two snapshots keep confidence at the fixed low floor
    assert_eq!(bundle.confidence.score, 30);
    assert_eq!(bundle.confidence.snapshot_count, 2);
}

#[test]
fn test_forecast_respects_requested_scenarios() {
    let now = Utc::now();
    let store = seeded_store(vec![
        snapshot_at("mychannel", now - Duration::days(10), 900, 40000),
        snapshot_at("mychannel", now, 1000, 50000),
    ]);
    let tracker = PerformanceTracker::new(MockSource::empty(), store);

    let bundle = tracker
        .forecast_performance("mychannel", 30, &["optimistic".to_string()])
        .unwrap();

    assert_eq!(bundle.scenarios.len(), 1);
    assert!(bundle.scenarios.contains_key("optimistic"));
}

#[test]
fn test_forecast_without_snapshots_is_insufficient_data() {
    let tracker = PerformanceTracker::new(MockSource::empty(), SnapshotStore::in_memory());

    let result = tracker.forecast_performance("mychannel", 30, &[]);

    assert!(matches!(result, Err(GrowthError::InsufficientData(_))));
}

#[test]
fn test_forecast_rejects_unsupported_horizon() {
    let now = Utc::now();
    let store = seeded_store(vec![snapshot_at("mychannel", now, 1000, 50000)]);
    let tracker = PerformanceTracker::new(MockSource::empty(), store);

    let result = tracker.forecast_performance("mychannel", 31, &[]);

    assert!(matches!(result, Err(GrowthError::InvalidParameter(_))));
}

#[test]
fn test_scenario_impact_end_to_end() {
    let now = Utc::now();
    let store = seeded_store(vec![
        snapshot_at("mychannel", now - Duration::days(10), 900, 40000),
        snapshot_at("mychannel", now, 1000, 50000),
    ]);
    let tracker = PerformanceTracker::new(MockSource::empty(), store);

    let mut changes = HashMap::new();
    changes.insert("ctr_improvement".to_string(), 0.2);

    let impact = tracker
        .analyze_scenario_impact("mychannel", &changes, 30)
        .unwrap();

    assert!(impact.modified.views.projected >= impact.baseline.views.projected);
    assert_eq!(impact.baseline.views.projected, 80000.0);
    assert_eq!(impact.modified.views.projected, 86000.0);
}

#[test]
fn test_scenario_impact_without_snapshots_is_insufficient_data() {
    let tracker = PerformanceTracker::new(MockSource::empty(), SnapshotStore::in_memory());

    let result = tracker.analyze_scenario_impact("mychannel", &HashMap::new(), 30);

    assert!(matches!(result, Err(GrowthError::InsufficientData(_))));
}

#[test]
fn test_performance_summary_combines_snapshot_and_trend() {
    let now = Utc::now();
    let store = seeded_store(vec![snapshot_at(
        "mychannel",
        now - Duration::days(10),
        900,
        40000,
    )]);
    let source = MockSource::with_channel("mychannel", observation(1000, 50000, 3));
    let tracker = PerformanceTracker::new(source, store);

    let summary = tracker.performance_summary("mychannel").unwrap();

    assert_eq!(summary.channel_handle, "mychannel");
    assert_eq!(summary.current_metrics.subscribers, 1000);

    let report = summary.growth_trend.report().expect("expected a report");
    assert_eq!(report.subscribers.change, 100);
    assert_eq!(summary.recommendations, report.recommendations);
}
