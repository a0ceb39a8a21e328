//! Pause between stream acquisition attempts.

use std::time::Duration;

/// Suspends the caller for a fixed duration.
///
/// Injected into the service so retry loops can run against real
/// timers in production and complete instantly under test.
#[allow(async_fn_in_trait)]
pub trait Delay {
    /// Waits for `duration`. Not cancellable.
    async fn delay(&self, duration: Duration);
}

/// Delay backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    async fn delay(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

impl<T: Delay + ?Sized> Delay for &T {
    async fn delay(&self, duration: Duration) {
        (**self).delay(duration).await;
    }
}
