//! Camera stream management over a single video sink.
//!
//! [`MediaService`] owns at most one stream at a time, attached to the
//! sink it was built with. Calls take `&mut self` and must be awaited one
//! at a time; nothing is locked and no call can be cancelled midway
//! other than by dropping its future.

use super::delay::{Delay, TokioDelay};
use super::state::{ServiceState, ServiceStats};
use crate::capture::{
    MediaConfig, MediaError, MediaPlatform, MediaStream, MediaStreamConstraints, TrackInfo,
    VideoSink,
};
use crate::devices::CameraDescriptor;
use crate::screenshot::{date_like_name, encode_frame, Screenshot, ScreenshotFile};
use chrono::{DateTime, Local, TimeZone};

/// Arguments for [`MediaService::start_camera`].
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    /// Which source to acquire. Defaults to any video source.
    pub constraints: MediaStreamConstraints,
    /// Extra attempts after a transient failure; `None` uses the configured count.
    pub retry_count: Option<u32>,
}

impl StartOptions {
    /// Any video source with the given retry count.
    pub fn with_retry_count(retry_count: u32) -> Self {
        Self {
            retry_count: Some(retry_count),
            ..Default::default()
        }
    }
}

/// Attempts made once `remaining` retries are left out of `retry_count`.
fn attempts_made(retry_count: u32, remaining: u32) -> u64 {
    u64::from(retry_count - remaining) + 1
}

/// Arguments for [`MediaService::switch_camera`].
#[derive(Debug, Clone, Default)]
pub struct SwitchOptions {
    /// Switch to exactly this device instead of picking the next one.
    pub device_id: Option<String>,
}

/// Manages camera streams attached to one video sink.
pub struct MediaService<P, K, D = TokioDelay> {
    platform: P,
    sink: K,
    delay: D,
    config: MediaConfig,
    /// Descriptors from the last successful query.
    cameras: Vec<CameraDescriptor>,
    /// Label of the most recently active camera.
    last_active_camera: Option<String>,
    /// Error from the most recent start, cleared by the next success.
    last_start_error: Option<MediaError>,
    state: ServiceState,
    stats: ServiceStats,
}

impl<P, K> MediaService<P, K, TokioDelay>
where
    P: MediaPlatform,
    K: VideoSink<Stream = P::Stream>,
{
    /// Creates a service with default configuration and tokio timers.
    pub fn new(platform: P, sink: K) -> Self {
        Self {
            platform,
            sink,
            delay: TokioDelay,
            config: MediaConfig::default(),
            cameras: Vec::new(),
            last_active_camera: None,
            last_start_error: None,
            state: ServiceState::Idle,
            stats: ServiceStats::default(),
        }
    }
}

impl<P, K, D> MediaService<P, K, D>
where
    P: MediaPlatform,
    K: VideoSink<Stream = P::Stream>,
    D: Delay,
{
    /// Replaces the configuration.
    pub fn with_config(mut self, config: MediaConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the retry delay implementation.
    pub fn with_delay<D2: Delay>(self, delay: D2) -> MediaService<P, K, D2> {
        MediaService {
            platform: self.platform,
            sink: self.sink,
            delay,
            config: self.config,
            cameras: self.cameras,
            last_active_camera: self.last_active_camera,
            last_start_error: self.last_start_error,
            state: self.state,
            stats: self.stats,
        }
    }

    /// The platform the service acquires streams from.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// The video sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Mutable access to the video sink.
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Consumes the service, returning the sink with whatever is attached.
    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Active configuration.
    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServiceState {
        self.state
    }

    /// Counters since construction.
    pub fn stats(&self) -> &ServiceStats {
        &self.stats
    }

    /// Camera descriptors from the last successful query.
    pub fn cameras(&self) -> &[CameraDescriptor] {
        &self.cameras
    }

    /// Label of the most recently active camera.
    pub fn last_active_camera(&self) -> Option<&str> {
        self.last_active_camera.as_deref()
    }

    /// Error that ended the most recent start, if it failed.
    pub fn last_start_error(&self) -> Option<&MediaError> {
        self.last_start_error.as_ref()
    }

    /// Whether the platform can hand out streams.
    pub fn supports_user_media(&self) -> bool {
        self.platform.supports_user_media()
    }

    /// Whether the platform can list devices.
    pub fn supports_enumerate_devices(&self) -> bool {
        self.platform.supports_enumerate_devices()
    }

    /// More than one camera known from the last query.
    pub fn has_multiple_cameras(&self) -> bool {
        self.cameras.len() > 1
    }

    /// The stream attached to the sink, whether or not it is producing frames.
    pub fn stream(&self) -> Option<&P::Stream> {
        self.sink.src_object()
    }

    /// Video tracks of the attached stream that are enabled and live.
    pub fn active_video_tracks(&self) -> Vec<&TrackInfo> {
        self.stream()
            .map(|stream| {
                stream
                    .video_tracks()
                    .into_iter()
                    .filter(|track| track.is_active())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Known cameras not backing the current track.
    pub fn inactive_cameras(&self) -> Vec<&CameraDescriptor> {
        self.cameras.iter().filter(|camera| !camera.active).collect()
    }

    /// Opens and immediately releases a stream to trigger the platform's
    /// permission prompt.
    ///
    /// Returns `Ok(false)` when the platform refuses; callers should
    /// re-check what is available afterwards. Only a platform without
    /// user-media support is an error.
    pub async fn request_permission(&self) -> Result<bool, MediaError> {
        if !self.platform.supports_user_media() {
            return Err(MediaError::NotSupported(
                "platform does not support user media".into(),
            ));
        }

        match self
            .platform
            .get_user_media(&MediaStreamConstraints::any_video())
            .await
        {
            Ok(mut stream) => {
                stream.stop_tracks();
                tracing::info!("Camera permission granted");
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Camera permission request failed");
                Ok(false)
            }
        }
    }

    /// Lists video inputs with facing classification.
    ///
    /// Every descriptor is returned inactive; [`MediaService::refresh_cameras`]
    /// marks the one in use.
    pub async fn get_video_devices(&self) -> Result<Vec<CameraDescriptor>, MediaError> {
        if !self.platform.supports_enumerate_devices() {
            return Err(MediaError::NotSupported(
                "platform does not support device enumeration".into(),
            ));
        }

        let devices = self.platform.enumerate_devices().await?;
        let cameras: Vec<CameraDescriptor> = devices
            .iter()
            .filter(|device| device.is_video_input())
            .map(CameraDescriptor::from_device)
            .collect();

        for camera in cameras.iter().filter(|c| c.facing().is_unclassified()) {
            tracing::warn!(
                device_id = %camera.id,
                label = %camera.label,
                "Camera label matches no facing pattern"
            );
        }

        tracing::debug!(
            devices = devices.len(),
            cameras = cameras.len(),
            "Enumerated video devices"
        );
        Ok(cameras)
    }

    /// Acquires a stream and attaches it to the sink.
    ///
    /// `DeviceUnavailable` failures are retried up to the retry count with
    /// the configured fixed delay in between; any other failure, and the
    /// last transient one, is returned. A retry count of zero makes exactly
    /// one attempt. On success the camera list is refreshed.
    pub async fn start_camera(&mut self, options: StartOptions) -> Result<(), MediaError> {
        if !self.platform.supports_user_media() {
            return Err(MediaError::NotSupported(
                "platform does not support user media".into(),
            ));
        }

        let retry_count = options.retry_count.unwrap_or(self.config.retry_count);
        let retry_delay = self.config.retry_delay();
        let mut remaining = retry_count;

        self.state = ServiceState::Starting;
        let stream = loop {
            self.stats.start_attempts += 1;
            match self.platform.get_user_media(&options.constraints).await {
                Ok(stream) => break stream,
                Err(e) if e.is_retryable() && remaining > 0 => {
                    remaining -= 1;
                    self.stats.start_retries += 1;
                    tracing::warn!(
                        error = %e,
                        remaining,
                        "Camera start failed, retrying"
                    );
                    self.delay.delay(retry_delay).await;
                }
                Err(e) => {
                    self.stats.start_failures += 1;
                    self.last_start_error = Some(e.clone());
                    self.settle_state();
                    tracing::warn!(
                        error = %e,
                        attempts = attempts_made(retry_count, remaining),
                        "Camera start failed"
                    );
                    return Err(e);
                }
            }
        };

        if let Some(mut displaced) = self.sink.set_src_object(Some(stream)) {
            // Only one live stream may be attached at a time.
            displaced.stop_tracks();
            tracing::debug!("Stopped stream displaced by new start");
        }
        self.state = ServiceState::Active;
        self.stats.streams_started += 1;
        self.last_start_error = None;

        tracing::info!(
            device_id = ?options.constraints.device_id(),
            attempts = attempts_made(retry_count, remaining),
            "Camera stream attached"
        );

        self.refresh_cameras().await
    }

    /// Re-reads the device list and marks the camera backing the first
    /// active video track.
    ///
    /// Matching is by label, so every descriptor sharing the track's label
    /// is marked active.
    pub async fn refresh_cameras(&mut self) -> Result<(), MediaError> {
        let active_label = self
            .active_video_tracks()
            .first()
            .map(|track| track.label.clone());

        let mut cameras = self.get_video_devices().await?;
        if let Some(label) = &active_label {
            for camera in &mut cameras {
                camera.active = &camera.label == label;
            }
            self.last_active_camera = Some(label.clone());
        }
        self.cameras = cameras;
        Ok(())
    }

    /// Stops the current stream and starts another.
    ///
    /// Without a device id, the first inactive camera whose label differs
    /// from the last active one is chosen. A failed start after a
    /// successful stop leaves nothing attached.
    pub async fn switch_camera(&mut self, options: SwitchOptions) -> Result<(), MediaError> {
        self.stop_camera().await?;

        let device_id = match options.device_id {
            Some(device_id) => device_id,
            None => self.next_camera()?.id.clone(),
        };

        self.stats.switches += 1;
        tracing::info!(device_id = %device_id, "Switching camera");

        self.start_camera(StartOptions {
            constraints: MediaStreamConstraints::exact_device(device_id),
            retry_count: None,
        })
        .await
    }

    fn next_camera(&self) -> Result<&CameraDescriptor, MediaError> {
        let last = self.last_active_camera.as_deref();
        self.cameras
            .iter()
            .find(|camera| !camera.active && Some(camera.label.as_str()) != last)
            .ok_or_else(|| MediaError::NoActiveTrack("no other camera to switch to".into()))
    }

    /// Pauses the sink, stops every track and detaches the stream.
    ///
    /// Does nothing when no stream is attached.
    pub async fn stop_camera(&mut self) -> Result<(), MediaError> {
        self.sink.pause();

        let Some(stream) = self.sink.src_object_mut() else {
            return Ok(());
        };

        self.state = ServiceState::Stopping;
        stream.stop_tracks();
        self.sink.set_src_object(None);
        self.state = ServiceState::Idle;

        tracing::info!("Camera stream stopped");
        Ok(())
    }

    /// Captures the current frame, named after the current local time.
    ///
    /// See [`MediaService::take_screenshot_at`].
    pub async fn take_screenshot(
        &mut self,
        as_file: bool,
        mime_type: Option<&str>,
    ) -> Result<Screenshot, MediaError> {
        self.take_screenshot_at(as_file, mime_type, Local::now()).await
    }

    /// Captures the current frame at the video's native resolution.
    ///
    /// Encodes to `mime_type` (configured default when `None`) and returns
    /// a data URL, or a file named from `now` when `as_file` is set.
    pub async fn take_screenshot_at<Tz: TimeZone>(
        &mut self,
        as_file: bool,
        mime_type: Option<&str>,
        now: DateTime<Tz>,
    ) -> Result<Screenshot, MediaError> {
        let mime_type = mime_type.unwrap_or(&self.config.mime_type).to_string();

        let frame = self.sink.current_frame()?;
        tracing::debug!(
            width = frame.width(),
            height = frame.height(),
            mime_type = %mime_type,
            "Capturing still"
        );

        let encoded = encode_frame(frame, &mime_type)?;
        self.stats.screenshots += 1;

        let url = encoded.to_data_url();
        if !as_file {
            return Ok(Screenshot::DataUrl(url));
        }

        let file = ScreenshotFile::from_data_url(&url, date_like_name(&now))?;
        Ok(Screenshot::File(file))
    }

    fn settle_state(&mut self) {
        self.state = if self.sink.src_object().is_some() {
            ServiceState::Active
        } else {
            ServiceState::Idle
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{MockPlatform, MockStream, VideoElement};
    use crate::devices::DeviceInfo;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Records requested delays and returns immediately.
    #[derive(Debug, Clone, Default)]
    struct RecordingDelay {
        calls: Arc<Mutex<Vec<Duration>>>,
    }

    impl RecordingDelay {
        fn calls(&self) -> Vec<Duration> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Delay for RecordingDelay {
        async fn delay(&self, duration: Duration) {
            self.calls.lock().unwrap().push(duration);
        }
    }

    type TestService = MediaService<MockPlatform, VideoElement<MockStream>, RecordingDelay>;

    fn service_with(platform: MockPlatform) -> (TestService, RecordingDelay) {
        let delay = RecordingDelay::default();
        let service = MediaService::new(platform, VideoElement::new()).with_delay(delay.clone());
        (service, delay)
    }

    fn service() -> (TestService, RecordingDelay) {
        service_with(MockPlatform::new())
    }

    fn unavailable() -> MediaError {
        MediaError::DeviceUnavailable("NotReadableError".into())
    }

    fn active_labels(service: &TestService) -> Vec<&str> {
        service
            .cameras()
            .iter()
            .filter(|c| c.active)
            .map(|c| c.label.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_video_devices_filtered_and_classified() {
        let (service, _) = service();
        let cameras = service.get_video_devices().await.unwrap();

        assert_eq!(cameras.len(), 2);
        assert!(cameras[0].is_front && !cameras[0].is_back);
        assert!(!cameras[1].is_front && cameras[1].is_back);
        assert!(cameras.iter().all(|c| !c.active));
    }

    #[tokio::test]
    async fn test_video_devices_not_supported() {
        let (service, _) = service_with(MockPlatform::new().without_enumerate_devices());
        assert!(matches!(
            service.get_video_devices().await,
            Err(MediaError::NotSupported(_))
        ));
    }

    #[tokio::test]
    async fn test_enumeration_error_propagates() {
        let (service, _) = service();
        service
            .platform()
            .fail_next_enumeration(MediaError::PermissionDenied("blocked".into()));
        assert!(matches!(
            service.get_video_devices().await,
            Err(MediaError::PermissionDenied(_))
        ));
    }

    #[tokio::test]
    async fn test_start_marks_single_active_camera() {
        let (mut service, delay) = service();
        service.start_camera(StartOptions::default()).await.unwrap();

        assert_eq!(service.state(), ServiceState::Active);
        assert!(!service.sink().is_paused());
        assert_eq!(active_labels(&service), vec!["Front Camera 0"]);
        assert_eq!(
            service.active_video_tracks()[0].label,
            "Front Camera 0"
        );
        assert_eq!(service.last_active_camera(), Some("Front Camera 0"));
        assert!(service.has_multiple_cameras());
        assert_eq!(service.inactive_cameras().len(), 1);
        assert!(delay.calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_retries_attempts_once() {
        let (mut service, delay) = service();
        service.platform().fail_next_acquire(unavailable());

        let result = service.start_camera(StartOptions::with_retry_count(0)).await;

        assert_eq!(result, Err(unavailable()));
        assert_eq!(service.platform().request_count(), 1);
        assert!(delay.calls().is_empty());
        assert_eq!(service.state(), ServiceState::Idle);
        assert!(service.stream().is_none());
    }

    #[tokio::test]
    async fn test_transient_failures_retried_with_fixed_delay() {
        let (mut service, delay) = service();
        for _ in 0..3 {
            service.platform().fail_next_acquire(unavailable());
        }

        service.start_camera(StartOptions::default()).await.unwrap();

        assert_eq!(service.platform().request_count(), 4);
        assert_eq!(delay.calls(), vec![Duration::from_millis(100); 3]);
        assert_eq!(service.stats().start_retries, 3);
        assert_eq!(service.stats().streams_started, 1);
        assert_eq!(service.state(), ServiceState::Active);
    }

    #[tokio::test]
    async fn test_retries_exhausted_surface_last_error() {
        let (mut service, delay) = service();
        for i in 0..5 {
            service
                .platform()
                .fail_next_acquire(MediaError::DeviceUnavailable(format!("attempt {i}")));
        }

        let result = service.start_camera(StartOptions::with_retry_count(2)).await;

        assert_eq!(
            result,
            Err(MediaError::DeviceUnavailable("attempt 2".into()))
        );
        assert_eq!(service.platform().request_count(), 3);
        assert_eq!(delay.calls().len(), 2);
        assert_eq!(service.stats().start_failures, 1);
        assert!(matches!(
            service.last_start_error(),
            Some(MediaError::DeviceUnavailable(_))
        ));

        service.start_camera(StartOptions::default()).await.unwrap();
        assert!(service.last_start_error().is_none());
    }

    #[test]
    fn test_attempt_count_at_retry_limit() {
        assert_eq!(attempts_made(0, 0), 1);
        assert_eq!(attempts_made(10, 7), 4);
        assert_eq!(attempts_made(u32::MAX, 0), u64::from(u32::MAX) + 1);
    }

    #[tokio::test]
    async fn test_permission_denied_not_retried() {
        let (mut service, delay) = service();
        service
            .platform()
            .fail_next_acquire(MediaError::PermissionDenied("NotAllowedError".into()));

        let result = service.start_camera(StartOptions::default()).await;

        assert!(matches!(result, Err(MediaError::PermissionDenied(_))));
        assert_eq!(service.platform().request_count(), 1);
        assert!(delay.calls().is_empty());
    }

    #[tokio::test]
    async fn test_start_not_supported() {
        let (mut service, _) = service_with(MockPlatform::new().without_user_media());
        assert!(matches!(
            service.start_camera(StartOptions::default()).await,
            Err(MediaError::NotSupported(_))
        ));
        assert!(matches!(
            service.request_permission().await,
            Err(MediaError::NotSupported(_))
        ));
    }

    #[tokio::test]
    async fn test_restart_stops_displaced_stream() {
        let (mut service, _) = service();
        service.start_camera(StartOptions::default()).await.unwrap();
        service.start_camera(StartOptions::default()).await.unwrap();

        assert_eq!(service.platform().live_streams(), 1);
    }

    #[tokio::test]
    async fn test_switch_alternates_between_cameras() {
        let (mut service, _) = service();
        service.start_camera(StartOptions::default()).await.unwrap();

        for expected in ["Back Camera 1", "Front Camera 0", "Back Camera 1"] {
            let previous = service.last_active_camera().map(str::to_string);
            service.switch_camera(SwitchOptions::default()).await.unwrap();

            assert_eq!(active_labels(&service), vec![expected]);
            assert_ne!(service.last_active_camera().map(str::to_string), previous);
            assert_eq!(service.platform().live_streams(), 1);
        }
        assert_eq!(service.stats().switches, 3);
    }

    #[tokio::test]
    async fn test_switch_to_explicit_device() {
        let (mut service, _) = service();
        service.start_camera(StartOptions::default()).await.unwrap();
        service
            .switch_camera(SwitchOptions {
                device_id: Some("back-1".into()),
            })
            .await
            .unwrap();

        let last_request = service.platform().requests().pop().unwrap();
        assert_eq!(last_request.device_id(), Some("back-1"));
        assert_eq!(active_labels(&service), vec!["Back Camera 1"]);
    }

    #[tokio::test]
    async fn test_failed_switch_leaves_no_stream() {
        let (service, _) = service();
        let mut service = service.with_config(MediaConfig {
            retry_count: 1,
            ..Default::default()
        });
        service.start_camera(StartOptions::default()).await.unwrap();

        let result = service
            .switch_camera(SwitchOptions {
                device_id: Some("missing".into()),
            })
            .await;

        assert!(matches!(result, Err(MediaError::DeviceUnavailable(_))));
        assert!(service.stream().is_none());
        assert_eq!(service.state(), ServiceState::Idle);
        assert_eq!(service.platform().live_streams(), 0);
    }

    #[tokio::test]
    async fn test_switch_with_single_camera() {
        let platform = MockPlatform::with_devices(vec![DeviceInfo::video("cam", "HD Webcam")]);
        let (mut service, _) = service_with(platform);
        service.start_camera(StartOptions::default()).await.unwrap();

        assert!(matches!(
            service.switch_camera(SwitchOptions::default()).await,
            Err(MediaError::NoActiveTrack(_))
        ));
        assert!(service.stream().is_none());
    }

    #[tokio::test]
    async fn test_switch_skips_devices_sharing_active_label() {
        let platform = MockPlatform::with_devices(vec![
            DeviceInfo::video("a", "Cam X"),
            DeviceInfo::video("b", "Cam X"),
            DeviceInfo::video("c", "Back 1"),
        ]);
        let (mut service, _) = service_with(platform);
        service.start_camera(StartOptions::default()).await.unwrap();
        assert_eq!(active_labels(&service), vec!["Cam X", "Cam X"]);

        service.switch_camera(SwitchOptions::default()).await.unwrap();

        let last_request = service.platform().requests().pop().unwrap();
        assert_eq!(last_request.device_id(), Some("c"));
        assert_eq!(active_labels(&service), vec!["Back 1"]);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let (mut service, _) = service();
        service.stop_camera().await.unwrap();

        service.start_camera(StartOptions::default()).await.unwrap();
        service.stop_camera().await.unwrap();
        service.stop_camera().await.unwrap();

        assert!(service.sink().is_paused());
        assert!(service.stream().is_none());
        assert_eq!(service.state(), ServiceState::Idle);
        assert_eq!(service.platform().live_streams(), 0);
    }

    #[tokio::test]
    async fn test_attached_but_disabled_stream_has_no_active_camera() {
        let (mut service, _) = service();
        service.start_camera(StartOptions::default()).await.unwrap();

        service
            .sink_mut()
            .src_object_mut()
            .unwrap()
            .set_enabled(false);
        service.refresh_cameras().await.unwrap();

        assert!(service.stream().is_some());
        assert!(service.active_video_tracks().is_empty());
        assert!(active_labels(&service).is_empty());
    }

    #[tokio::test]
    async fn test_request_permission() {
        let (service, _) = service();
        assert!(service.request_permission().await.unwrap());
        assert_eq!(service.platform().live_streams(), 0);

        service
            .platform()
            .fail_next_acquire(MediaError::PermissionDenied("NotAllowedError".into()));
        assert!(!service.request_permission().await.unwrap());
    }

    #[tokio::test]
    async fn test_screenshot_data_url() {
        let (mut service, _) = service_with(MockPlatform::new().with_resolution(8, 6));
        service.start_camera(StartOptions::default()).await.unwrap();

        let shot = service.take_screenshot(false, None).await.unwrap();
        let url = shot.as_data_url().unwrap();
        assert!(url.starts_with("data:image/webp;base64,"));
        assert_eq!(service.stats().screenshots, 1);
    }

    #[tokio::test]
    async fn test_screenshot_file_named_from_instant() {
        let (mut service, _) = service_with(MockPlatform::new().with_resolution(8, 6));
        service.start_camera(StartOptions::default()).await.unwrap();

        let now = NaiveDate::from_ymd_opt(2024, 12, 1)
            .unwrap()
            .and_hms_milli_opt(8, 4, 33, 987)
            .unwrap()
            .and_utc();
        let shot = service
            .take_screenshot_at(true, Some("image/png"), now)
            .await
            .unwrap();

        let file = shot.as_file().unwrap();
        assert_eq!(file.name, "2024-12-01-080498");
        assert_eq!(file.mime_type, "image/png");
        assert!(file.size() > 0);
    }

    #[tokio::test]
    async fn test_screenshot_keeps_native_resolution() {
        let (mut service, _) = service_with(MockPlatform::new().with_resolution(13, 7));
        service.start_camera(StartOptions::default()).await.unwrap();

        let shot = service
            .take_screenshot(true, Some("image/png"))
            .await
            .unwrap();
        let decoded = image::load_from_memory(&shot.as_file().unwrap().bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (13, 7));
    }

    #[tokio::test]
    async fn test_screenshot_without_stream() {
        let (mut service, _) = service();
        assert!(matches!(
            service.take_screenshot(false, None).await,
            Err(MediaError::NoActiveTrack(_))
        ));
    }

    #[tokio::test]
    async fn test_borrowed_sink_outlives_service() {
        let mut element: VideoElement<MockStream> = VideoElement::new();
        {
            let mut service = MediaService::new(MockPlatform::new(), &mut element)
                .with_delay(RecordingDelay::default());
            service.start_camera(StartOptions::default()).await.unwrap();
        }
        assert!(element.src_object().is_some());
    }
}
