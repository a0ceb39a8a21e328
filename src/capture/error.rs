//! Error taxonomy for media operations.

use thiserror::Error;

/// Errors that can occur while talking to the media platform or
/// producing still images.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// The platform lacks the required API entirely.
    #[error("not supported: {0}")]
    NotSupported(String),
    /// The user (or a policy) declined access to the device.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// Transient acquisition failure: device busy, not readable, overconstrained.
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),
    /// No track to operate on.
    #[error("no active track: {0}")]
    NoActiveTrack(String),
    /// Still image could not be encoded.
    #[error("failed to encode image: {0}")]
    Encoding(String),
    /// A data URL could not be parsed or decoded.
    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),
}

impl MediaError {
    /// Returns true if the failure is worth another acquisition attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MediaError::DeviceUnavailable(_))
    }
}
