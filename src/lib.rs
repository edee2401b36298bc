//! # Growth Forecast
//!
//! A Rust library for channel growth analytics: periodic metric snapshots,
//! growth-rate estimation, multi-scenario forecasting, milestone projection
//! and strategy-impact analysis.
//!
//! ## Features
//!
//! - Append-only snapshot store with pluggable persistence backends
//! - Growth-rate estimation robust to irregular snapshot intervals
//! - Scenario forecasting (optimistic / realistic / pessimistic, open set)
//! - Forecast confidence scoring from history density and consistency
//! - Milestone distance projection with non-convergence handling
//! - Strategy lever what-if analysis against a baseline forecast
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use growth_forecast::store::SnapshotStore;
//! use growth_forecast::tracker::PerformanceTracker;
//! # use growth_forecast::data::{ChannelDataSource, ChannelObservation};
//! # use growth_forecast::error::Result;
//! # struct ApiClient;
//! # impl ChannelDataSource for ApiClient {
//! #     fn fetch_channel(&self, _: &str) -> Result<ChannelObservation> { unimplemented!() }
//! # }
//!
//! # fn main() -> Result<()> {
//! // Snapshot history lives in a single JSON file
//! let store = SnapshotStore::with_json_file("data/snapshot_history.json");
//! let tracker = PerformanceTracker::new(ApiClient, store);
//!
//! // Record an observation and forecast a month ahead
//! tracker.track_snapshot("mychannel")?;
//! let forecast = tracker.forecast_performance("mychannel", 30, &[])?;
//!
//! for (name, scenario) in &forecast.scenarios {
//!     println!("{}: {:.0} subscribers", name, scenario.subscribers.projected);
//! }
//! # Ok(())
//! # }
//! ```

pub mod confidence;
pub mod data;
pub mod error;
pub mod forecast;
pub mod milestone;
pub mod rates;
pub mod store;
pub mod strategy;
pub mod tracker;

// Re-export commonly used types
pub use crate::confidence::{Confidence, ConfidenceEstimator, ConfidenceLevel};
pub use crate::data::{ChannelDataSource, ChannelMetrics, ChannelObservation, Snapshot, VideoStats};
pub use crate::error::{GrowthError, Result};
pub use crate::forecast::{ForecastScenario, ScenarioForecaster};
pub use crate::milestone::{MilestoneProjection, MilestoneProjector};
pub use crate::rates::{GrowthRateEstimator, GrowthRates};
pub use crate::store::{SnapshotBackend, SnapshotStore};
pub use crate::strategy::{StrategyImpact, StrategyImpactAnalyzer};
pub use crate::tracker::{ForecastBundle, PerformanceTracker, TrendAnalysis};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
