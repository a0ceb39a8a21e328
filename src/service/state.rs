//! Service lifecycle and counters.

/// Lifecycle of the stream owned by the service.
///
/// `Idle → Starting → Active → Stopping → Idle`. A switch is a stop
/// immediately followed by a start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServiceState {
    /// No stream attached.
    #[default]
    Idle,
    /// Acquisition in progress, possibly retrying.
    Starting,
    /// A stream is attached to the sink.
    Active,
    /// Tracks are being stopped.
    Stopping,
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ServiceState::Idle => "idle",
            ServiceState::Starting => "starting",
            ServiceState::Active => "active",
            ServiceState::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

/// Running counters kept by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceStats {
    /// Stream requests issued to the platform.
    pub start_attempts: u64,
    /// Requests that were retried after a transient failure.
    pub start_retries: u64,
    /// Starts that surfaced an error to the caller.
    pub start_failures: u64,
    /// Streams successfully attached.
    pub streams_started: u64,
    /// Switch operations requested.
    pub switches: u64,
    /// Still images captured.
    pub screenshots: u64,
}
