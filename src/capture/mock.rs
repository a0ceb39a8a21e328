//! In-memory media platform.
//!
//! Produces deterministic synthetic frames and lets callers script
//! acquisition failures, so the service can be exercised without
//! hardware or real timers.

use super::{
    Frame, MediaError, MediaPlatform, MediaStream, MediaStreamConstraints, TrackInfo, TrackState,
    VideoConstraint, BYTES_PER_PIXEL,
};
use crate::devices::{DeviceInfo, DeviceKind};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock platform with a fixed device list.
#[derive(Debug)]
pub struct MockPlatform {
    devices: Vec<DeviceInfo>,
    resolution: (u32, u32),
    user_media: bool,
    enumerate: bool,
    state: Mutex<MockState>,
    live_streams: Arc<AtomicUsize>,
}

#[derive(Debug, Default)]
struct MockState {
    acquire_failures: VecDeque<MediaError>,
    enumerate_failure: Option<MediaError>,
    requests: Vec<MediaStreamConstraints>,
    streams_created: u64,
}

impl MockPlatform {
    /// A phone-like platform: one front camera, one back camera, one microphone.
    pub fn new() -> Self {
        Self::with_devices(vec![
            DeviceInfo::video("front-0", "Front Camera 0"),
            DeviceInfo::video("back-1", "Back Camera 1"),
            DeviceInfo {
                device_id: "mic-0".into(),
                group_id: String::new(),
                kind: DeviceKind::AudioInput,
                label: "Built-in Microphone".into(),
            },
        ])
    }

    /// A platform reporting exactly `devices`.
    pub fn with_devices(devices: Vec<DeviceInfo>) -> Self {
        Self {
            devices,
            resolution: (640, 480),
            user_media: true,
            enumerate: true,
            state: Mutex::new(MockState::default()),
            live_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sets the native resolution of produced streams.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = (width, height);
        self
    }

    /// Reports no user-media support.
    pub fn without_user_media(mut self) -> Self {
        self.user_media = false;
        self
    }

    /// Reports no device enumeration support.
    pub fn without_enumerate_devices(mut self) -> Self {
        self.enumerate = false;
        self
    }

    /// Queues a failure for the next stream request.
    ///
    /// Failures are consumed in order, one per request.
    pub fn fail_next_acquire(&self, error: MediaError) {
        self.state().acquire_failures.push_back(error);
    }

    /// Makes the next enumeration fail.
    pub fn fail_next_enumeration(&self, error: MediaError) {
        self.state().enumerate_failure = Some(error);
    }

    /// Constraints of every stream request so far, in order.
    pub fn requests(&self) -> Vec<MediaStreamConstraints> {
        self.state().requests.clone()
    }

    /// Number of stream requests so far.
    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Streams handed out and not yet stopped.
    pub fn live_streams(&self) -> usize {
        self.live_streams.load(Ordering::SeqCst)
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn select_device(&self, constraints: &MediaStreamConstraints) -> Result<&DeviceInfo, MediaError> {
        let mut video = self.devices.iter().filter(|d| d.is_video_input());
        match &constraints.video {
            VideoConstraint::Any => video
                .next()
                .ok_or_else(|| MediaError::DeviceUnavailable("no video input available".into())),
            VideoConstraint::Exact { device_id } => video
                .find(|d| &d.device_id == device_id)
                .ok_or_else(|| {
                    MediaError::DeviceUnavailable(format!("no video input with id {device_id}"))
                }),
        }
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaPlatform for MockPlatform {
    type Stream = MockStream;

    fn supports_user_media(&self) -> bool {
        self.user_media
    }

    fn supports_enumerate_devices(&self) -> bool {
        self.enumerate
    }

    async fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>, MediaError> {
        if !self.enumerate {
            return Err(MediaError::NotSupported("enumerateDevices".into()));
        }
        if let Some(error) = self.state().enumerate_failure.take() {
            return Err(error);
        }
        Ok(self.devices.clone())
    }

    async fn get_user_media(
        &self,
        constraints: &MediaStreamConstraints,
    ) -> Result<MockStream, MediaError> {
        if !self.user_media {
            return Err(MediaError::NotSupported("getUserMedia".into()));
        }

        let stream_number = {
            let mut state = self.state();
            state.requests.push(constraints.clone());
            if let Some(error) = state.acquire_failures.pop_front() {
                return Err(error);
            }
            state.streams_created += 1;
            state.streams_created
        };

        let device = self.select_device(constraints)?;
        let track = TrackInfo::video(
            format!("track-{stream_number}"),
            device.device_id.clone(),
            device.label.clone(),
        );

        self.live_streams.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(device_id = %device.device_id, "MockPlatform acquired stream");

        Ok(MockStream {
            tracks: vec![track],
            resolution: self.resolution,
            sequence: 0,
            stopped: false,
            live_streams: Arc::clone(&self.live_streams),
        })
    }
}

/// Stream produced by [`MockPlatform`].
#[derive(Debug)]
pub struct MockStream {
    tracks: Vec<TrackInfo>,
    resolution: (u32, u32),
    sequence: u64,
    stopped: bool,
    live_streams: Arc<AtomicUsize>,
}

impl MockStream {
    /// Enables or disables every track without stopping it.
    pub fn set_enabled(&mut self, enabled: bool) {
        for track in &mut self.tracks {
            track.enabled = enabled;
        }
    }

    /// Whether [`MediaStream::stop_tracks`] has run.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl MediaStream for MockStream {
    fn tracks(&self) -> &[TrackInfo] {
        &self.tracks
    }

    fn stop_tracks(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        for track in &mut self.tracks {
            track.state = TrackState::Ended;
        }
        self.live_streams.fetch_sub(1, Ordering::SeqCst);
    }

    fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    fn read_frame(&mut self) -> Result<Frame, MediaError> {
        if self.stopped {
            return Err(MediaError::NoActiveTrack("stream has ended".into()));
        }

        let (width, height) = self.resolution;
        let byte_count = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
        // Deterministic pattern mixed with the sequence number
        let pixels: Vec<u8> = (0..byte_count)
            .map(|i| ((i as u64 ^ self.sequence) % 256) as u8)
            .collect();

        self.sequence += 1;
        Ok(Frame::new(pixels, width, height, self.sequence))
    }
}
