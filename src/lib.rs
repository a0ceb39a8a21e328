//! Media Service Library
//!
//! Manages camera streams on behalf of a single video output: lists
//! cameras and guesses which way they face, acquires a stream with
//! bounded retries, switches between front and back cameras, and
//! captures still images as data URLs or named files.
//!
//! # Architecture
//!
//! ```text
//! MediaPlatform ──stream──▶ VideoSink ──frame──▶ screenshot
//!       │                      ▲
//!       └── devices ──▶ MediaService (start / switch / stop)
//! ```
//!
//! The platform is a trait so the same service runs against native
//! cameras (feature `camera`), a browser binding, or the in-memory
//! [`MockPlatform`](capture::MockPlatform).
//!
//! # Example
//!
//! ```no_run
//! use media_service::{
//!     capture::{MockPlatform, MockStream, VideoElement},
//!     service::{MediaService, StartOptions, SwitchOptions},
//! };
//!
//! # async fn run() -> Result<(), media_service::MediaError> {
//! let mut video: VideoElement<MockStream> = VideoElement::new();
//! let mut service = MediaService::new(MockPlatform::new(), &mut video);
//!
//! if service.request_permission().await? {
//!     service.start_camera(StartOptions::default()).await?;
//!     service.switch_camera(SwitchOptions::default()).await?;
//!
//!     let shot = service.take_screenshot(true, None).await?;
//!     println!("{:?}", shot.as_file().map(|f| &f.name));
//!
//!     service.stop_camera().await?;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod capture;
pub mod devices;
pub mod metrics;
pub mod screenshot;
pub mod service;

// Re-export commonly used types at crate root
pub use capture::{
    MediaConfig, MediaError, MediaPlatform, MediaStream, MediaStreamConstraints, MockPlatform,
    VideoElement, VideoSink,
};
pub use devices::{classify_label, CameraDescriptor, DeviceInfo, Facing};
pub use screenshot::{Screenshot, ScreenshotFile};
pub use service::{MediaService, ServiceState, StartOptions, SwitchOptions};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
