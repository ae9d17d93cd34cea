//! # Metronome
//!
//! A drift-corrected, look-ahead click scheduler for live playback.
//!
//! ## Sub-modules
//! - `types` - Beat, Click and MetronomeSettings
//! - `scheduler` - The look-ahead beat scheduler (pure timing logic)
//! - `engine` - The `Metronome` lifecycle over a host and a sampler voice
//! - `host` - A wall-clock `FrameHost` for running outside a browser
//!
//! ## Scheduling
//!
//! The host wakes the metronome roughly once per display frame. On every
//! wake-up, all beats falling within the next 100 ms are handed to the sampler
//! with their exact intended time:
//!
//! ```text
//! beat_ms = 60000 / bpm
//! while next_beat_time - now < look_ahead:
//!     emit beat (downbeat when counter == 0)
//!     counter = (counter + 1) % beats_per_measure
//!     next_beat_time += beat_ms
//! ```
//!
//! Because `next_beat_time` advances from itself, a late or early wake-up
//! changes *when* a beat is scheduled but never *where* it lands.
//!
//! ## Lifecycle
//! - `start`: counter to 0, first beat due now, request a frame
//! - `on_frame`: schedule due beats, request the next frame
//! - `stop`: cancel the pending frame; nothing else is played
//!
//! A metronome whose voice failed to load never starts.

mod engine;
mod host;
mod scheduler;
mod types;

#[cfg(test)]
mod tests;

pub use engine::{FrameHandle, FrameHost, Metronome, Sampler};
pub use host::{InstantHost, DEFAULT_FRAME_INTERVAL};
pub use scheduler::BeatScheduler;
pub use types::{
    Beat, Click, MetronomeSettings, BEAT_NOTE, BEAT_VELOCITY, DEFAULT_BPM, DEFAULT_LOOK_AHEAD_MS,
    DOWNBEAT_NOTE, DOWNBEAT_VELOCITY, MAX_BPM,
};
