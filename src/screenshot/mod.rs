//! Still captures from the live stream.
//!
//! Frames are encoded with the `image` crate and handed back either as
//! `data:` URLs or as named file-like objects.

mod encode;
mod naming;

pub use encode::{encode_frame, EncodedImage, Screenshot, ScreenshotFile, FALLBACK_MIME_TYPE};
pub use naming::date_like_name;
