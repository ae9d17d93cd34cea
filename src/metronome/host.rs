//! Wall-clock frame host
//!
//! Drives a [`Metronome`](super::Metronome) from a plain thread by sleeping
//! one frame interval between ticks, standing in for a display's refresh
//! callback.

use std::thread;
use std::time::{Duration, Instant};

use super::engine::{FrameHandle, FrameHost};

/// About one display refresh at 60 Hz.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug)]
pub struct InstantHost {
    origin: Instant,
    frame_interval: Duration,
    next_handle: u64,
    pending: Option<FrameHandle>,
}

impl InstantHost {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            origin: Instant::now(),
            frame_interval,
            next_handle: 0,
            pending: None,
        }
    }

    /// Sleep until the requested frame is due.
    ///
    /// Returns `false` when no frame is pending (the metronome stopped).
    pub fn wait_for_frame(&mut self) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        thread::sleep(self.frame_interval);
        true
    }
}

impl Default for InstantHost {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl FrameHost for InstantHost {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
