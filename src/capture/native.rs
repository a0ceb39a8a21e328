//! Native camera backend using `nokhwa`.
//!
//! Requires the `camera` feature. Device ids are the backend's camera
//! indices rendered as strings; labels are the human-readable names.

use super::{Frame, MediaError, MediaPlatform, MediaStream, MediaStreamConstraints, TrackInfo, TrackState};
use crate::devices::DeviceInfo;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType};

/// Platform backed by the operating system's camera API.
#[derive(Debug, Default)]
pub struct NokhwaPlatform;

impl NokhwaPlatform {
    /// Creates the native platform.
    pub fn new() -> Self {
        Self
    }

    fn query(&self) -> Result<Vec<nokhwa::utils::CameraInfo>, MediaError> {
        nokhwa::query(ApiBackend::Auto).map_err(|e| MediaError::NotSupported(e.to_string()))
    }
}

fn parse_index(device_id: &str) -> CameraIndex {
    match device_id.parse::<u32>() {
        Ok(i) => CameraIndex::Index(i),
        Err(_) => CameraIndex::String(device_id.to_string()),
    }
}

impl MediaPlatform for NokhwaPlatform {
    type Stream = NokhwaStream;

    fn supports_user_media(&self) -> bool {
        true
    }

    fn supports_enumerate_devices(&self) -> bool {
        true
    }

    async fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>, MediaError> {
        let cameras = self.query()?;
        let devices: Vec<DeviceInfo> = cameras
            .iter()
            .map(|cam| DeviceInfo::video(cam.index().to_string(), cam.human_name()))
            .collect();

        tracing::debug!(count = devices.len(), "Enumerated native cameras");
        Ok(devices)
    }

    async fn get_user_media(
        &self,
        constraints: &MediaStreamConstraints,
    ) -> Result<NokhwaStream, MediaError> {
        let index = match constraints.device_id() {
            Some(device_id) => parse_index(device_id),
            None => self
                .query()?
                .first()
                .map(|cam| cam.index().clone())
                .ok_or_else(|| MediaError::DeviceUnavailable("no camera found".into()))?,
        };

        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = nokhwa::Camera::new(index.clone(), requested)
            .map_err(|e| MediaError::DeviceUnavailable(e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| MediaError::DeviceUnavailable(e.to_string()))?;

        let resolution = camera.resolution();
        let label = camera.info().human_name();
        tracing::info!(
            device_id = %index,
            width = resolution.width(),
            height = resolution.height(),
            "Native camera stream opened"
        );

        Ok(NokhwaStream {
            tracks: vec![TrackInfo::video(format!("native-{index}"), index.to_string(), label)],
            resolution: (resolution.width(), resolution.height()),
            sequence: 0,
            camera,
        })
    }
}

/// Live stream from a native camera.
pub struct NokhwaStream {
    tracks: Vec<TrackInfo>,
    resolution: (u32, u32),
    sequence: u64,
    camera: nokhwa::Camera,
}

impl std::fmt::Debug for NokhwaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NokhwaStream")
            .field("tracks", &self.tracks)
            .field("resolution", &self.resolution)
            .finish()
    }
}

impl MediaStream for NokhwaStream {
    fn tracks(&self) -> &[TrackInfo] {
        &self.tracks
    }

    fn stop_tracks(&mut self) {
        if !self.is_live() {
            return;
        }
        if let Err(e) = self.camera.stop_stream() {
            tracing::warn!(error = %e, "Failed to stop native camera stream");
        }
        for track in &mut self.tracks {
            track.state = TrackState::Ended;
        }
    }

    fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    fn read_frame(&mut self) -> Result<Frame, MediaError> {
        if !self.is_live() {
            return Err(MediaError::NoActiveTrack("stream has ended".into()));
        }

        let buffer = self
            .camera
            .frame()
            .map_err(|e| MediaError::DeviceUnavailable(e.to_string()))?;
        let image = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| MediaError::Encoding(e.to_string()))?;

        let (width, height) = (image.width(), image.height());
        self.sequence += 1;
        Ok(Frame::new(image.into_raw(), width, height, self.sequence))
    }
}

impl Drop for NokhwaStream {
    fn drop(&mut self) {
        self.stop_tracks();
    }
}
