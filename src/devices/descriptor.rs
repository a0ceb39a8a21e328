//! Device records as reported by the platform and as exposed to callers.

use super::classify::{classify_label, Facing};
use serde::{Deserialize, Serialize};

/// Kind of media device reported by enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Camera or other video source.
    #[serde(rename = "videoinput")]
    VideoInput,
    /// Microphone.
    #[serde(rename = "audioinput")]
    AudioInput,
    /// Speaker or headset.
    #[serde(rename = "audiooutput")]
    AudioOutput,
}

/// One entry of the platform's device list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Platform identifier used to request this exact device.
    pub device_id: String,
    /// Identifier shared by devices on the same physical unit.
    pub group_id: String,
    /// Device kind.
    pub kind: DeviceKind,
    /// Human-readable label; may be empty before permission is granted.
    pub label: String,
}

impl DeviceInfo {
    /// Creates a video input device record.
    pub fn video(device_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            group_id: String::new(),
            kind: DeviceKind::VideoInput,
            label: label.into(),
        }
    }

    /// Returns true for video inputs.
    pub fn is_video_input(&self) -> bool {
        self.kind == DeviceKind::VideoInput
    }
}

/// A camera as seen by callers: the device record plus facing
/// classification and whether it backs the live track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraDescriptor {
    /// Platform device identifier.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Group identifier.
    pub group_id: String,
    /// Label suggests a user-facing camera.
    pub is_front: bool,
    /// Label suggests an environment-facing camera.
    pub is_back: bool,
    /// Backs the track currently in use.
    pub active: bool,
}

impl CameraDescriptor {
    /// Builds an inactive descriptor from a device record.
    pub fn from_device(device: &DeviceInfo) -> Self {
        let Facing { is_front, is_back } = classify_label(&device.label);
        Self {
            id: device.device_id.clone(),
            label: device.label.clone(),
            group_id: device.group_id.clone(),
            is_front,
            is_back,
            active: false,
        }
    }

    /// Returns the facing classification of this camera.
    pub fn facing(&self) -> Facing {
        Facing {
            is_front: self.is_front,
            is_back: self.is_back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_from_device() {
        let device = DeviceInfo::video("cam-1", "Back Camera 1");
        let camera = CameraDescriptor::from_device(&device);

        assert_eq!(camera.id, "cam-1");
        assert_eq!(camera.label, "Back Camera 1");
        assert!(camera.is_back);
        assert!(!camera.is_front);
        assert!(!camera.active);
    }

    #[test]
    fn test_device_kind_serializes_like_platform() {
        let encoded = toml::to_string(&DeviceInfo::video("a", "b")).unwrap();
        assert!(encoded.contains("kind = \"videoinput\""));
    }
}
