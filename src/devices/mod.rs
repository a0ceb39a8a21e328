//! Media device records and camera classification.
//!
//! Camera descriptors are derived fresh from the platform's device list
//! on every query and are never persisted.

mod classify;
mod descriptor;

pub use classify::{classify_label, Facing, BACK_TOKENS, FRONT_TOKENS};
pub use descriptor::{CameraDescriptor, DeviceInfo, DeviceKind};
