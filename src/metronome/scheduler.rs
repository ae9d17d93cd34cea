//! Look-ahead beat scheduler
//!
//! Each tick emits every beat whose time falls inside the look-ahead window.
//! `next_beat_time` only ever advances by a fixed beat length from its own
//! previous value, never from the current clock reading, so jitter in when
//! ticks arrive does not accumulate into tempo drift.

use super::types::{Beat, DEFAULT_BPM, DEFAULT_LOOK_AHEAD_MS, MAX_BPM};

#[derive(Debug, Clone)]
pub struct BeatScheduler {
    beat_ms: f64,
    beats_per_measure: u32,
    look_ahead_ms: f64,
    beat_counter: u32,
    next_beat_time: f64,
}

fn beat_length_ms(bpm: f64) -> f64 {
    if bpm > MAX_BPM {
        tracing::warn!(bpm, "tempo too fast, clamping to {} bpm", MAX_BPM);
        60_000.0 / MAX_BPM
    } else if bpm.is_finite() && bpm > 0.0 {
        60_000.0 / bpm
    } else {
        tracing::warn!(bpm, "ignoring unusable tempo, using {} bpm", DEFAULT_BPM);
        60_000.0 / DEFAULT_BPM
    }
}

impl BeatScheduler {
    /// A scheduler at `bpm` with `beats_per_measure` beats per bar (at least 1).
    pub fn new(bpm: f64, beats_per_measure: u32) -> Self {
        Self {
            beat_ms: beat_length_ms(bpm),
            beats_per_measure: beats_per_measure.max(1),
            look_ahead_ms: DEFAULT_LOOK_AHEAD_MS,
            beat_counter: 0,
            next_beat_time: 0.0,
        }
    }

    pub fn with_look_ahead(mut self, look_ahead_ms: f64) -> Self {
        if look_ahead_ms.is_finite() && look_ahead_ms >= 0.0 {
            self.look_ahead_ms = look_ahead_ms;
        }
        self
    }

    /// Restart at the top of a measure with the first beat due at `now`.
    pub fn reset(&mut self, now: f64) {
        self.beat_counter = 0;
        self.next_beat_time = now;
    }

    /// Emit all beats due within the look-ahead window of `now`.
    ///
    /// ```
    /// use bandbuddy::metronome::BeatScheduler;
    ///
    /// let mut scheduler = BeatScheduler::new(120.0, 4);
    /// scheduler.reset(0.0);
    ///
    /// let beats = scheduler.due_beats(0.0);
    /// assert_eq!(beats.len(), 1);
    /// assert!(beats[0].is_downbeat);
    ///
    /// // Next beat is at 500 ms, so it is not due until the clock reaches 400 ms.
    /// assert!(scheduler.due_beats(399.0).is_empty());
    /// assert_eq!(scheduler.due_beats(401.0)[0].time_ms, 500.0);
    /// ```
    pub fn due_beats(&mut self, now: f64) -> Vec<Beat> {
        let mut beats = Vec::new();
        while self.next_beat_time - now < self.look_ahead_ms {
            let index = self.beat_counter;
            beats.push(Beat {
                index,
                is_downbeat: index == 0,
                time_ms: self.next_beat_time,
            });
            self.beat_counter = (self.beat_counter + 1) % self.beats_per_measure;
            self.next_beat_time += self.beat_ms;
        }
        if beats.len() > self.beats_per_measure as usize {
            tracing::debug!(
                beats = beats.len(),
                behind_ms = now - beats[0].time_ms,
                "tick fell behind, emitting missed beats together"
            );
        }
        beats
    }

    pub fn set_tempo(&mut self, bpm: f64) {
        self.beat_ms = beat_length_ms(bpm);
    }

    /// Change the bar length; the position within the bar wraps to fit.
    pub fn set_beats_per_measure(&mut self, beats_per_measure: u32) {
        self.beats_per_measure = beats_per_measure.max(1);
        self.beat_counter %= self.beats_per_measure;
    }

    pub fn beat_ms(&self) -> f64 {
        self.beat_ms
    }

    pub fn beats_per_measure(&self) -> u32 {
        self.beats_per_measure
    }

    pub fn beat_counter(&self) -> u32 {
        self.beat_counter
    }

    pub fn next_beat_time(&self) -> f64 {
        self.next_beat_time
    }
}
