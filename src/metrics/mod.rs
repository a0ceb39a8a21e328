//! Prometheus metrics exporter for the media service.
//!
//! # Metrics Exposed
//!
//! ## Stream Metrics
//! - `media_service_stream_active` - Stream attached (1=active, 0=idle)
//! - `media_service_cameras_available` - Cameras from the last device query
//!
//! ## Acquisition Metrics
//! - `media_service_start_attempts_total` - Stream requests issued
//! - `media_service_start_retries_total` - Requests retried after transient failures
//! - `media_service_start_failures_total` - Starts that surfaced an error
//! - `media_service_streams_started_total` - Streams attached to the sink
//!
//! ## Operation Metrics
//! - `media_service_switches_total` - Camera switches requested
//! - `media_service_screenshots_total` - Still images captured
//!
//! With the `metrics` feature, `MetricsServer` serves these on `/metrics`
//! and reports stream health on `/health` (`active`, `idle`, or 503 `failed`).
//!
//! # Example
//!
//! ```no_run
//! use media_service::metrics::{MetricsRegistry, MetricsSnapshot};
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//!
//! let snapshot = MetricsSnapshot {
//!     stream_active: true,
//!     cameras_available: 2,
//!     start_attempts: 3,
//!     start_retries: 2,
//!     streams_started: 1,
//!     ..Default::default()
//! };
//!
//! registry.update(&snapshot);
//! ```

mod collector;
#[cfg(feature = "metrics")]
mod server;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};
#[cfg(feature = "metrics")]
pub use server::{MetricsServer, MetricsServerConfig, MetricsState, ServerError, StreamHealth};
