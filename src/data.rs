//! Core data types: channel metric snapshots and the data-source seam

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of recent videos retained per snapshot
pub const RECENT_VIDEO_LIMIT: usize = 5;

/// Per-video statistics captured alongside a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStats {
    /// Platform identifier of the video
    pub video_id: String,
    /// Video title at observation time
    pub title: String,
    /// View count
    pub views: u64,
    /// Like count
    pub likes: u64,
    /// Comment count
    pub comments: u64,
    /// Publication timestamp
    pub published_at: DateTime<Utc>,
}

/// Aggregate channel metrics at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMetrics {
    /// Subscriber count
    pub subscribers: u64,
    /// Lifetime view count across all videos
    pub total_views: u64,
    /// Number of published videos
    pub total_videos: u64,
    /// Lifetime views divided by video count
    pub average_views_per_video: f64,
}

impl ChannelMetrics {
    /// Build metrics from raw counts, deriving the per-video average
    pub fn from_counts(subscribers: u64, total_views: u64, total_videos: u64) -> Self {
        Self {
            subscribers,
            total_views,
            total_videos,
            average_views_per_video: total_views as f64 / total_videos.max(1) as f64,
        }
    }
}

/// One timestamped observation of a channel's metrics
///
/// Snapshots are immutable once created; the store keeps them in an
/// append-only sequence and consumers sort by `timestamp` before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Handle of the observed channel
    pub channel_handle: String,
    /// Observation instant
    pub timestamp: DateTime<Utc>,
    /// Aggregate metrics at that instant
    pub metrics: ChannelMetrics,
    /// Most recent videos, bounded to [`RECENT_VIDEO_LIMIT`]
    pub recent_videos: Vec<VideoStats>,
}

impl Snapshot {
    /// Create a snapshot, truncating the video list to the retained bound
    pub fn new(
        channel_handle: impl Into<String>,
        timestamp: DateTime<Utc>,
        metrics: ChannelMetrics,
        mut recent_videos: Vec<VideoStats>,
    ) -> Self {
        recent_videos.truncate(RECENT_VIDEO_LIMIT);
        Self {
            channel_handle: channel_handle.into(),
            timestamp,
            metrics,
            recent_videos,
        }
    }
}

/// What the upstream data source reports for a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelObservation {
    /// Subscriber count
    pub subscribers: u64,
    /// Lifetime view count
    pub total_views: u64,
    /// Number of published videos
    pub total_videos: u64,
    /// Most recent videos
    pub recent_videos: Vec<VideoStats>,
}

impl ChannelObservation {
    /// Derive aggregate metrics from the raw observation
    pub fn metrics(&self) -> ChannelMetrics {
        ChannelMetrics::from_counts(self.subscribers, self.total_views, self.total_videos)
    }
}

/// Upstream source of channel observations
///
/// Implementations wrap the video platform's data API. The tracker receives
/// its source by injection; there is no process-wide client.
pub trait ChannelDataSource {
    /// Fetch the current observation for a channel handle
    ///
    /// Fails with [`crate::GrowthError::ChannelNotFound`] when the handle is
    /// unknown and [`crate::GrowthError::UpstreamUnavailable`] when the
    /// platform cannot be reached.
    fn fetch_channel(&self, handle: &str) -> Result<ChannelObservation>;
}
