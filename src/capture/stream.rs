//! Media streams and their tracks.

use super::{Frame, MediaError};

/// Kind of a media track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// Video track.
    Video,
    /// Audio track.
    Audio,
}

/// Lifecycle state of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Producing media.
    Live,
    /// Stopped; will never produce media again.
    Ended,
}

/// Snapshot of a track's properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    /// Track identifier.
    pub id: String,
    /// Track kind.
    pub kind: TrackKind,
    /// Label of the device backing the track.
    pub label: String,
    /// Identifier of the device backing the track.
    pub device_id: String,
    /// Whether the track is allowed to render.
    pub enabled: bool,
    /// Lifecycle state.
    pub state: TrackState,
}

impl TrackInfo {
    /// Creates a live, enabled video track.
    pub fn video(id: impl Into<String>, device_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: TrackKind::Video,
            label: label.into(),
            device_id: device_id.into(),
            enabled: true,
            state: TrackState::Live,
        }
    }

    /// Returns true if the track is enabled and live.
    pub fn is_active(&self) -> bool {
        self.enabled && self.state == TrackState::Live
    }
}

/// A stream handed out by the platform.
///
/// Stopping is terminal: once [`MediaStream::stop_tracks`] has run,
/// every track reports [`TrackState::Ended`] and the device is released.
pub trait MediaStream {
    /// All tracks of the stream.
    fn tracks(&self) -> &[TrackInfo];

    /// Stops every track and releases the underlying device.
    fn stop_tracks(&mut self);

    /// Native resolution of the video source as `(width, height)`.
    fn resolution(&self) -> (u32, u32);

    /// Reads the most recent frame.
    fn read_frame(&mut self) -> Result<Frame, MediaError>;

    /// Video tracks only.
    fn video_tracks(&self) -> Vec<&TrackInfo> {
        self.tracks()
            .iter()
            .filter(|track| track.kind == TrackKind::Video)
            .collect()
    }

    /// True if any track is still live.
    fn is_live(&self) -> bool {
        self.tracks()
            .iter()
            .any(|track| track.state == TrackState::Live)
    }
}
