//! Metronome lifecycle
//!
//! Ties a [`BeatScheduler`] to a host wake-up primitive and a sampler voice.
//! The metronome owns all of its scheduling state; only `start`, `stop` and
//! `on_frame` mutate it, and all three take `&mut self`.

use std::fmt::Display;

use super::scheduler::BeatScheduler;
use super::types::{Click, MetronomeSettings};
use crate::measures::beats_per_measure;

/// Handle to a pending wake-up requested from a [`FrameHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The host's periodic wake-up primitive (a browser's animation frame, a
/// timer thread, a test harness).
///
/// Wake-ups arrive roughly periodically but with jitter; the scheduler's
/// look-ahead absorbs it.
pub trait FrameHost {
    /// Current clock reading in milliseconds.
    fn now_ms(&self) -> f64;

    /// Ask to be woken once; the host then calls [`Metronome::on_frame`].
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a wake-up. After this returns the frame must not be delivered.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// The audio-playback collaborator that turns clicks into sound.
pub trait Sampler {
    fn play(&mut self, click: &Click);
}

/// Collects clicks instead of playing them.
impl Sampler for Vec<Click> {
    fn play(&mut self, click: &Click) {
        self.push(*click);
    }
}

/// A metronome with explicit `stopped -> running -> stopped` lifecycle.
///
/// # Example
/// ```
/// use bandbuddy::metronome::{Click, FrameHandle, FrameHost, Metronome, MetronomeSettings};
///
/// struct Clock { now: f64, pending: Option<FrameHandle> }
///
/// impl FrameHost for Clock {
///     fn now_ms(&self) -> f64 { self.now }
///     fn request_frame(&mut self) -> FrameHandle {
///         self.pending = Some(FrameHandle(1));
///         FrameHandle(1)
///     }
///     fn cancel_frame(&mut self, _: FrameHandle) { self.pending = None; }
/// }
///
/// let mut host = Clock { now: 0.0, pending: None };
/// let mut metronome = Metronome::new(&MetronomeSettings::default(), Vec::<Click>::new());
///
/// metronome.start(&mut host);
/// host.now = 16.0;
/// metronome.on_frame(&mut host);
///
/// let clicks = metronome.voice().unwrap();
/// assert_eq!(clicks.len(), 1);
/// assert!(clicks[0].beat.is_downbeat);
/// ```
#[derive(Debug)]
pub struct Metronome<S> {
    scheduler: BeatScheduler,
    volume: u8,
    voice: Option<S>,
    pending: Option<FrameHandle>,
    running: bool,
}

impl<S: Sampler> Metronome<S> {
    /// A metronome with a loaded voice.
    pub fn new(settings: &MetronomeSettings, voice: S) -> Self {
        Self::build(settings, Some(voice))
    }

    /// A metronome from the outcome of loading its voice.
    ///
    /// A failed load is logged and leaves the metronome permanently silent;
    /// it is not retried.
    pub fn with_voice<E: Display>(settings: &MetronomeSettings, voice: Result<S, E>) -> Self {
        let voice = match voice {
            Ok(voice) => Some(voice),
            Err(e) => {
                tracing::error!("Failed to load metronome voice: {}", e);
                None
            }
        };
        Self::build(settings, voice)
    }

    fn build(settings: &MetronomeSettings, voice: Option<S>) -> Self {
        let beats = beats_per_measure(&settings.time_signature).unwrap_or_else(|| {
            tracing::warn!(
                time_signature = %settings.time_signature,
                "unusable time signature, counting in 4"
            );
            4
        });
        Self {
            scheduler: BeatScheduler::new(settings.bpm, beats)
                .with_look_ahead(settings.look_ahead_ms),
            volume: settings.volume.min(100),
            voice,
            pending: None,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True when the voice failed to load.
    pub fn is_silent(&self) -> bool {
        self.voice.is_none()
    }

    pub fn voice(&self) -> Option<&S> {
        self.voice.as_ref()
    }

    pub fn voice_mut(&mut self) -> Option<&mut S> {
        self.voice.as_mut()
    }

    pub fn scheduler(&self) -> &BeatScheduler {
        &self.scheduler
    }

    /// Follow an external "is running" flag.
    pub fn set_running(&mut self, running: bool, host: &mut impl FrameHost) {
        if running {
            self.start(host);
        } else {
            self.stop(host);
        }
    }

    /// Start from the top of a measure at the host's current time.
    ///
    /// Does nothing if already running or if there is no voice.
    pub fn start(&mut self, host: &mut impl FrameHost) {
        if self.running {
            return;
        }
        if self.voice.is_none() {
            tracing::debug!("metronome has no voice, not starting");
            return;
        }
        self.scheduler.reset(host.now_ms());
        self.running = true;
        self.pending = Some(host.request_frame());
        tracing::debug!(
            beat_ms = self.scheduler.beat_ms(),
            beats_per_measure = self.scheduler.beats_per_measure(),
            "metronome started"
        );
    }

    /// Stop and cancel the pending wake-up. No further click is played.
    pub fn stop(&mut self, host: &mut impl FrameHost) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
        if self.running {
            self.running = false;
            tracing::debug!("metronome stopped");
        }
    }

    /// Run one scheduling tick and request the next wake-up.
    ///
    /// Returns the number of clicks played.
    pub fn on_frame(&mut self, host: &mut impl FrameHost) -> usize {
        self.pending = None;
        if !self.running {
            return 0;
        }
        let Some(voice) = self.voice.as_mut() else {
            return 0;
        };

        let beats = self.scheduler.due_beats(host.now_ms());
        for beat in &beats {
            voice.play(&Click::for_beat(*beat, self.volume));
        }

        self.pending = Some(host.request_frame());
        beats.len()
    }

    /// Volume in percent, clamped to 0-100.
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Change tempo; takes effect from the next scheduled beat on.
    pub fn set_tempo(&mut self, bpm: f64) {
        self.scheduler.set_tempo(bpm);
    }

    /// Change the time signature. Unusable values are ignored.
    pub fn set_time_signature(&mut self, time_signature: &str) {
        match beats_per_measure(time_signature) {
            Some(beats) => self.scheduler.set_beats_per_measure(beats),
            None => tracing::warn!(time_signature, "ignoring unusable time signature"),
        }
    }
}
