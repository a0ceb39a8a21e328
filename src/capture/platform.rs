//! Platform media API abstraction.
//!
//! This is the seam between the service and whatever actually owns the
//! cameras: a native backend, a browser binding, or the in-memory mock.

use super::{MediaError, MediaStream, MediaStreamConstraints};
use crate::devices::DeviceInfo;

/// Media device APIs offered by a platform.
///
/// Every call suspends the caller until the platform answers; nothing
/// runs in parallel inside an implementation's caller.
#[allow(async_fn_in_trait)]
pub trait MediaPlatform {
    /// Stream type produced by [`MediaPlatform::get_user_media`].
    type Stream: MediaStream;

    /// Whether streams can be requested at all.
    fn supports_user_media(&self) -> bool;

    /// Whether the device list can be queried.
    fn supports_enumerate_devices(&self) -> bool;

    /// Lists every media device the platform knows of.
    async fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>, MediaError>;

    /// Acquires a stream satisfying `constraints`.
    ///
    /// This is the call that triggers a permission prompt on platforms
    /// that have one.
    async fn get_user_media(
        &self,
        constraints: &MediaStreamConstraints,
    ) -> Result<Self::Stream, MediaError>;
}
