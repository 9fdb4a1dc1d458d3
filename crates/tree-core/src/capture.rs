//! Gesture-control lifecycle: capture device ownership, classifier results
//! handed from the classifier loop to the render tick, and status reporting.

use crate::error::ClassifierError;
use crate::gesture::Classification;
use instant::Instant;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// A video source that must be released when no longer needed.
pub trait CaptureDevice {
    fn release(&mut self);
}

/// External classifier: one pass over the current capture frame.
pub trait HandClassifier {
    fn classify(&mut self, now: Instant) -> Classification;
}

/// Owns a capture device and releases it exactly once, on [`release`] or drop.
///
/// [`release`]: CaptureGuard::release
pub struct CaptureGuard<D: CaptureDevice> {
    device: Option<D>,
}

impl<D: CaptureDevice> CaptureGuard<D> {
    pub fn new(device: D) -> Self {
        Self {
            device: Some(device),
        }
    }

    pub fn device(&self) -> Option<&D> {
        self.device.as_ref()
    }

    pub fn is_held(&self) -> bool {
        self.device.is_some()
    }

    pub fn release(&mut self) {
        if let Some(mut d) = self.device.take() {
            d.release();
            log::info!("[capture] device released");
        }
    }
}

impl<D: CaptureDevice> Drop for CaptureGuard<D> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Latest-wins mailbox between the classifier loop and the render tick.
#[derive(Clone, Default)]
pub struct ResultSlot {
    inner: Arc<Mutex<Option<Classification>>>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Classification>> {
        // a panicking writer leaves at worst a stale result behind
        match self.inner.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Store a result, superseding any unread one.
    pub fn publish(&self, classification: Classification) {
        *self.lock() = Some(classification);
    }

    /// Drain the newest result, if any.
    pub fn take(&self) -> Option<Classification> {
        self.lock().take()
    }
}

/// Shared stop flag for the classifier loop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GestureStatus {
    Loading,
    Ready,
    Unavailable(String),
}

impl GestureStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, GestureStatus::Ready)
    }
}

/// One gesture-control session. Acquisition happens once; a failure leaves
/// the session `Unavailable` and manual control keeps working.
pub struct GestureSession<D: CaptureDevice> {
    status: GestureStatus,
    guard: Option<CaptureGuard<D>>,
    slot: ResultSlot,
    cancel: CancelToken,
}

impl<D: CaptureDevice> Default for GestureSession<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: CaptureDevice> GestureSession<D> {
    pub fn new() -> Self {
        Self {
            status: GestureStatus::Loading,
            guard: None,
            slot: ResultSlot::new(),
            cancel: CancelToken::default(),
        }
    }

    pub fn status(&self) -> &GestureStatus {
        &self.status
    }

    /// Handle for the classifier loop to publish into.
    pub fn slot(&self) -> ResultSlot {
        self.slot.clone()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn device(&self) -> Option<&D> {
        self.guard.as_ref().and_then(|g| g.device())
    }

    /// Camera and classifier are both up.
    pub fn ready(&mut self, device: D) {
        if self.cancel.is_cancelled() {
            // shut down while acquisition was in flight
            let mut late = CaptureGuard::new(device);
            late.release();
            return;
        }
        self.guard = Some(CaptureGuard::new(device));
        self.status = GestureStatus::Ready;
        log::info!("[gesture] control ready");
    }

    /// Acquisition failed; releases anything already held.
    pub fn fail(&mut self, error: ClassifierError) {
        log::error!("[gesture] control unavailable: {error}");
        if let Some(mut g) = self.guard.take() {
            g.release();
        }
        self.status = GestureStatus::Unavailable(error.to_string());
    }

    /// Newest classification for this tick, if the session is running.
    pub fn poll(&mut self) -> Option<Classification> {
        if self.status.is_ready() && !self.cancel.is_cancelled() {
            self.slot.take()
        } else {
            None
        }
    }

    /// Stop the classifier loop and release the camera.
    pub fn shutdown(&mut self) {
        self.cancel.cancel();
        if let Some(mut g) = self.guard.take() {
            g.release();
        }
        if !matches!(self.status, GestureStatus::Unavailable(_)) {
            self.status = GestureStatus::Unavailable("stopped".to_string());
        }
    }
}

impl<D: CaptureDevice> Drop for GestureSession<D> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
