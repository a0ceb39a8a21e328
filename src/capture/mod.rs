//! Platform media access: devices, streams and the video sink.
//!
//! This module provides trait-based abstractions over the platform's
//! media APIs so the service can run against real cameras or against
//! the in-memory mock used by tests and the demo CLI.

mod config;
mod constraints;
mod error;
mod frame;
mod mock;
#[cfg(feature = "camera")]
mod native;
mod platform;
mod sink;
mod stream;

pub use config::{ConfigError, FileConfig, MediaConfig, OutputConfig, DEFAULT_MIME_TYPE};
pub use constraints::{MediaStreamConstraints, VideoConstraint};
pub use error::MediaError;
pub use frame::{Frame, BYTES_PER_PIXEL};
pub use mock::{MockPlatform, MockStream};
#[cfg(feature = "camera")]
pub use native::{NokhwaPlatform, NokhwaStream};
pub use platform::MediaPlatform;
pub use sink::{VideoElement, VideoSink};
pub use stream::{MediaStream, TrackInfo, TrackKind, TrackState};
