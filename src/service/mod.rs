//! The media service and its lifecycle.
//!
//! [`MediaService`] drives one video sink: it acquires streams from a
//! [`MediaPlatform`](crate::capture::MediaPlatform), retries transient
//! failures, switches between cameras and captures stills.

mod delay;
mod media;
mod state;

pub use delay::{Delay, TokioDelay};
pub use media::{MediaService, StartOptions, SwitchOptions};
pub use state::{ServiceState, ServiceStats};
