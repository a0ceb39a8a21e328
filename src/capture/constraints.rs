//! Stream acquisition constraints.

use serde::{Deserialize, Serialize};

/// Which video source a stream request may be satisfied by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoConstraint {
    /// Any video source the platform picks.
    #[default]
    Any,
    /// Exactly the device with this identifier, or fail.
    Exact {
        /// Platform device identifier.
        device_id: String,
    },
}

/// Constraints passed to the platform when requesting a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaStreamConstraints {
    /// Video source selection.
    #[serde(default)]
    pub video: VideoConstraint,
}

impl MediaStreamConstraints {
    /// Any video source.
    pub fn any_video() -> Self {
        Self::default()
    }

    /// Exactly the given device.
    pub fn exact_device(device_id: impl Into<String>) -> Self {
        Self {
            video: VideoConstraint::Exact {
                device_id: device_id.into(),
            },
        }
    }

    /// Returns the requested device id, if constrained to one.
    pub fn device_id(&self) -> Option<&str> {
        match &self.video {
            VideoConstraint::Any => None,
            VideoConstraint::Exact { device_id } => Some(device_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_any_video() {
        let constraints = MediaStreamConstraints::default();
        assert_eq!(constraints.video, VideoConstraint::Any);
        assert_eq!(constraints.device_id(), None);
    }

    #[test]
    fn test_exact_device() {
        let constraints = MediaStreamConstraints::exact_device("cam-2");
        assert_eq!(constraints.device_id(), Some("cam-2"));
    }
}
