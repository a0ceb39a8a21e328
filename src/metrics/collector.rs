//! Metrics collection and registry.

use crate::capture::{MediaPlatform, VideoSink};
use crate::service::{Delay, MediaService, ServiceState};
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Registering or encoding a metric failed.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// A snapshot of service state for metrics update.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// Whether a stream is currently attached and active.
    pub stream_active: bool,
    /// Whether the most recent start failed.
    pub start_failed: bool,
    /// Cameras known from the last device query.
    pub cameras_available: usize,
    /// Stream requests issued to the platform.
    pub start_attempts: u64,
    /// Requests retried after a transient failure.
    pub start_retries: u64,
    /// Starts that surfaced an error.
    pub start_failures: u64,
    /// Streams successfully attached.
    pub streams_started: u64,
    /// Camera switches requested.
    pub switches: u64,
    /// Still images captured.
    pub screenshots: u64,
}

/// Prometheus metrics registry for the media service.
pub struct MetricsRegistry {
    registry: Registry,

    // Stream metrics
    stream_active: IntGauge,
    cameras_available: IntGauge,

    // Acquisition metrics
    start_attempts_total: IntCounter,
    start_retries_total: IntCounter,
    start_failures_total: IntCounter,
    streams_started_total: IntCounter,

    // Operation metrics
    switches_total: IntCounter,
    screenshots_total: IntCounter,
}

/// Advances a counter to a cumulative value taken from the service.
fn advance(counter: &IntCounter, total: u64) {
    let current = counter.get();
    if total > current {
        counter.inc_by(total - current);
    }
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all service metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let stream_active = IntGauge::new(
            "media_service_stream_active",
            "Whether a camera stream is attached (1=active, 0=idle)",
        )?;
        let cameras_available = IntGauge::new(
            "media_service_cameras_available",
            "Cameras reported by the last device query",
        )?;

        let start_attempts_total = IntCounter::new(
            "media_service_start_attempts_total",
            "Stream requests issued to the platform",
        )?;
        let start_retries_total = IntCounter::new(
            "media_service_start_retries_total",
            "Stream requests retried after a transient failure",
        )?;
        let start_failures_total = IntCounter::new(
            "media_service_start_failures_total",
            "Camera starts that failed after all attempts",
        )?;
        let streams_started_total = IntCounter::new(
            "media_service_streams_started_total",
            "Streams successfully attached to the sink",
        )?;

        let switches_total = IntCounter::new(
            "media_service_switches_total",
            "Camera switches requested",
        )?;
        let screenshots_total = IntCounter::new(
            "media_service_screenshots_total",
            "Still images captured",
        )?;

        registry.register(Box::new(stream_active.clone()))?;
        registry.register(Box::new(cameras_available.clone()))?;
        registry.register(Box::new(start_attempts_total.clone()))?;
        registry.register(Box::new(start_retries_total.clone()))?;
        registry.register(Box::new(start_failures_total.clone()))?;
        registry.register(Box::new(streams_started_total.clone()))?;
        registry.register(Box::new(switches_total.clone()))?;
        registry.register(Box::new(screenshots_total.clone()))?;

        Ok(Self {
            registry,
            stream_active,
            cameras_available,
            start_attempts_total,
            start_retries_total,
            start_failures_total,
            streams_started_total,
            switches_total,
            screenshots_total,
        })
    }

    /// Updates all metrics from a snapshot of service state.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        self.stream_active.set(if snapshot.stream_active { 1 } else { 0 });
        self.cameras_available.set(snapshot.cameras_available as i64);

        // Counters only move forward, by the difference
        advance(&self.start_attempts_total, snapshot.start_attempts);
        advance(&self.start_retries_total, snapshot.start_retries);
        advance(&self.start_failures_total, snapshot.start_failures);
        advance(&self.streams_started_total, snapshot.streams_started);
        advance(&self.switches_total, snapshot.switches);
        advance(&self.screenshots_total, snapshot.screenshots);
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl MetricsSnapshot {
    /// Creates a snapshot from the current state of a service.
    pub fn from_service<P, K, D>(service: &MediaService<P, K, D>) -> Self
    where
        P: MediaPlatform,
        K: VideoSink<Stream = P::Stream>,
        D: Delay,
    {
        let stats = service.stats();
        Self {
            stream_active: service.state() == ServiceState::Active,
            start_failed: service.last_start_error().is_some(),
            cameras_available: service.cameras().len(),
            start_attempts: stats.start_attempts,
            start_retries: stats.start_retries,
            start_failures: stats.start_failures,
            streams_started: stats.streams_started,
            switches: stats.switches,
            screenshots: stats.screenshots,
        }
    }
}
