//! Video output targets that a stream is attached to.

use super::{Frame, MediaError, MediaStream};

/// A video output holding at most one stream.
///
/// The sink is supplied by the caller and usually outlives the service
/// driving it; pass `&mut sink` to keep ownership on the caller's side.
pub trait VideoSink {
    /// Stream type the sink can play.
    type Stream: MediaStream;

    /// The stream currently attached, if any.
    fn src_object(&self) -> Option<&Self::Stream>;

    /// Mutable access to the attached stream.
    fn src_object_mut(&mut self) -> Option<&mut Self::Stream>;

    /// Replaces the attached stream, returning the previous one.
    fn set_src_object(&mut self, stream: Option<Self::Stream>) -> Option<Self::Stream>;

    /// Pauses playback.
    fn pause(&mut self);

    /// Whether playback is paused.
    fn is_paused(&self) -> bool;

    /// Native dimensions of the playing video, `(0, 0)` with nothing attached.
    fn video_dimensions(&self) -> (u32, u32) {
        self.src_object()
            .map(|stream| stream.resolution())
            .unwrap_or((0, 0))
    }

    /// Reads the frame currently presented by the sink.
    fn current_frame(&mut self) -> Result<Frame, MediaError> {
        self.src_object_mut()
            .ok_or_else(|| MediaError::NoActiveTrack("no stream attached to the video sink".into()))?
            .read_frame()
    }
}

impl<T: VideoSink + ?Sized> VideoSink for &mut T {
    type Stream = T::Stream;

    fn src_object(&self) -> Option<&Self::Stream> {
        (**self).src_object()
    }

    fn src_object_mut(&mut self) -> Option<&mut Self::Stream> {
        (**self).src_object_mut()
    }

    fn set_src_object(&mut self, stream: Option<Self::Stream>) -> Option<Self::Stream> {
        (**self).set_src_object(stream)
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn is_paused(&self) -> bool {
        (**self).is_paused()
    }

    fn video_dimensions(&self) -> (u32, u32) {
        (**self).video_dimensions()
    }

    fn current_frame(&mut self) -> Result<Frame, MediaError> {
        (**self).current_frame()
    }
}

/// In-process video output: holds the stream and tracks play/pause.
#[derive(Debug)]
pub struct VideoElement<S> {
    src: Option<S>,
    paused: bool,
}

impl<S> VideoElement<S> {
    /// Creates an empty, paused element.
    pub fn new() -> Self {
        Self {
            src: None,
            paused: true,
        }
    }
}

impl<S> Default for VideoElement<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MediaStream> VideoSink for VideoElement<S> {
    type Stream = S;

    fn src_object(&self) -> Option<&S> {
        self.src.as_ref()
    }

    fn src_object_mut(&mut self) -> Option<&mut S> {
        self.src.as_mut()
    }

    fn set_src_object(&mut self, stream: Option<S>) -> Option<S> {
        // Assigning a stream starts playback, clearing it leaves the element paused.
        self.paused = stream.is_none();
        std::mem::replace(&mut self.src, stream)
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{MockPlatform, MockStream};
    use crate::capture::{MediaPlatform, MediaStreamConstraints};

    #[tokio::test]
    async fn test_attach_and_detach() {
        let platform = MockPlatform::new();
        let stream = platform
            .get_user_media(&MediaStreamConstraints::any_video())
            .await
            .unwrap();

        let mut element: VideoElement<MockStream> = VideoElement::new();
        assert!(element.is_paused());
        assert_eq!(element.video_dimensions(), (0, 0));

        assert!(element.set_src_object(Some(stream)).is_none());
        assert!(!element.is_paused());
        assert_eq!(element.video_dimensions(), (640, 480));

        let frame = element.current_frame().unwrap();
        assert!(frame.is_valid());

        let previous = element.set_src_object(None);
        assert!(previous.is_some());
        assert!(element.src_object().is_none());
    }

    #[test]
    fn test_frame_without_stream() {
        let mut element: VideoElement<MockStream> = VideoElement::new();
        assert!(matches!(
            element.current_frame(),
            Err(MediaError::NoActiveTrack(_))
        ));
    }

    #[tokio::test]
    async fn test_borrowed_sink_delegates() {
        let platform = MockPlatform::new();
        let stream = platform
            .get_user_media(&MediaStreamConstraints::any_video())
            .await
            .unwrap();

        let mut element: VideoElement<MockStream> = VideoElement::new();
        {
            let mut borrowed = &mut element;
            VideoSink::set_src_object(&mut borrowed, Some(stream));
            assert_eq!(VideoSink::video_dimensions(&borrowed), (640, 480));
            VideoSink::pause(&mut borrowed);
        }
        assert!(element.is_paused());
        assert!(element.src_object().is_some());
    }
}
