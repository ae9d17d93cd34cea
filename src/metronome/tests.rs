use super::*;

/// Test host: the clock only moves when told to, frames are delivered by hand.
#[derive(Default)]
struct ManualHost {
    now: f64,
    next_handle: u64,
    pending: Option<FrameHandle>,
    requested: usize,
    cancelled: Vec<FrameHandle>,
}

impl FrameHost for ManualHost {
    fn now_ms(&self) -> f64 {
        self.now
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// Advance the clock to `now` and deliver the pending frame, if any.
fn frame_at(metronome: &mut Metronome<Vec<Click>>, host: &mut ManualHost, now: f64) -> usize {
    host.now = now;
    if host.pending.take().is_some() {
        metronome.on_frame(host)
    } else {
        0
    }
}

fn settings(bpm: f64, time_signature: &str) -> MetronomeSettings {
    MetronomeSettings {
        bpm,
        time_signature: time_signature.to_string(),
        ..MetronomeSettings::default()
    }
}

fn clicks(metronome: &Metronome<Vec<Click>>) -> &[Click] {
    metronome.voice().map(Vec::as_slice).unwrap_or_default()
}

#[test]
fn test_scheduler_first_beat_is_downbeat() {
    let mut scheduler = BeatScheduler::new(120.0, 4);
    scheduler.reset(1000.0);
    let beats = scheduler.due_beats(1000.0);
    assert_eq!(beats.len(), 1);
    assert_eq!(beats[0], Beat { index: 0, is_downbeat: true, time_ms: 1000.0 });
}

#[test]
fn test_scheduler_fifth_beat_in_four_four_is_downbeat() {
    let mut scheduler = BeatScheduler::new(120.0, 4);
    scheduler.reset(0.0);

    let mut beats = Vec::new();
    let mut now = 0.0;
    while beats.len() < 5 {
        beats.extend(scheduler.due_beats(now));
        now += 16.0;
    }

    let indices: Vec<u32> = beats.iter().map(|b| b.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 0]);
    assert!(beats[4].is_downbeat);
    assert!(beats[1..4].iter().all(|b| !b.is_downbeat));
}

#[test]
fn test_scheduler_beat_times_do_not_drift_under_jitter() {
    let mut scheduler = BeatScheduler::new(100.0, 3);
    scheduler.reset(0.0);

    // Irregular wake-ups between 3 and 41 ms apart.
    let gaps = [16.0, 3.0, 41.0, 17.0, 9.0, 33.0, 16.5, 22.0];
    let mut now = 0.0;
    let mut beats = Vec::new();
    for i in 0..2000 {
        beats.extend(scheduler.due_beats(now));
        now += gaps[i % gaps.len()];
    }

    assert!(beats.len() > 50);
    for (n, beat) in beats.iter().enumerate() {
        assert_eq!(beat.time_ms, n as f64 * 600.0);
        assert_eq!(beat.index, (n % 3) as u32);
    }
}

#[test]
fn test_scheduler_late_tick_catches_up_in_one_burst() {
    let mut scheduler = BeatScheduler::new(120.0, 4);
    scheduler.reset(0.0);
    assert_eq!(scheduler.due_beats(0.0).len(), 1);

    // A stalled host wakes up 2 s late: beats at 500, 1000, 1500, 2000.
    let beats = scheduler.due_beats(1950.0);
    let times: Vec<f64> = beats.iter().map(|b| b.time_ms).collect();
    assert_eq!(times, vec![500.0, 1000.0, 1500.0, 2000.0]);
    assert_eq!(scheduler.next_beat_time(), 2500.0);
}

#[test]
fn test_scheduler_guards_against_bad_input() {
    let scheduler = BeatScheduler::new(-10.0, 0);
    assert_eq!(scheduler.beat_ms(), 500.0);
    assert_eq!(scheduler.beats_per_measure(), 1);

    let mut scheduler = BeatScheduler::new(60.0, 1);
    scheduler.reset(0.0);
    let beats = scheduler.due_beats(2000.0);
    assert!(beats.iter().all(|b| b.is_downbeat));
}

#[test]
fn test_scheduler_clamps_excessive_tempo() {
    let mut scheduler = BeatScheduler::new(1e20, 4);
    assert_eq!(scheduler.beat_ms(), 60_000.0 / MAX_BPM);

    // A beat length below the f64 spacing at this clock would never advance.
    scheduler.reset(1.0e12);
    let beats = scheduler.due_beats(1.0e12);
    assert_eq!(beats.len(), 1);

    scheduler.set_tempo(f64::MAX);
    assert_eq!(scheduler.beat_ms(), 150.0);
    let beats = scheduler.due_beats(1.0e12 + 1000.0);
    assert_eq!(beats.len(), 7);
}

#[test]
fn test_scheduler_time_signature_change_wraps_counter() {
    let mut scheduler = BeatScheduler::new(120.0, 4);
    scheduler.reset(0.0);
    scheduler.due_beats(1000.0); // beats 0..=2 scheduled, counter now 3
    assert_eq!(scheduler.beat_counter(), 3);
    scheduler.set_beats_per_measure(3);
    assert_eq!(scheduler.beat_counter(), 0);
}

#[test]
fn test_metronome_emits_downbeat_first() {
    let mut host = ManualHost::default();
    let mut metronome = Metronome::new(&settings(120.0, "4/4"), Vec::<Click>::new());

    metronome.start(&mut host);
    assert!(metronome.is_running());
    assert_eq!(frame_at(&mut metronome, &mut host, 0.0), 1);

    let first = clicks(&metronome)[0];
    assert!(first.beat.is_downbeat);
    assert_eq!(first.note, DOWNBEAT_NOTE);
    assert_eq!(first.velocity, DOWNBEAT_VELOCITY);
}

#[test]
fn test_metronome_fifth_click_is_downbeat() {
    let mut host = ManualHost::default();
    let mut metronome = Metronome::new(&settings(120.0, "4/4"), Vec::<Click>::new());
    metronome.start(&mut host);

    let mut now = 0.0;
    while clicks(&metronome).len() < 5 {
        frame_at(&mut metronome, &mut host, now);
        now += 16.0;
    }

    let emitted = clicks(&metronome);
    assert!(emitted[4].beat.is_downbeat);
    assert_eq!(emitted[4].beat.index, 0);
    assert_eq!(emitted[1].note, BEAT_NOTE);
    assert_eq!(emitted[1].velocity, BEAT_VELOCITY);
}

#[test]
fn test_metronome_restart_resets_beat_index() {
    let mut host = ManualHost::default();
    let mut metronome = Metronome::new(&settings(120.0, "4/4"), Vec::<Click>::new());

    metronome.start(&mut host);
    frame_at(&mut metronome, &mut host, 0.0);
    frame_at(&mut metronome, &mut host, 450.0);
    assert_eq!(clicks(&metronome).len(), 2);

    metronome.stop(&mut host);
    assert!(!metronome.is_running());
    metronome.voice_mut().unwrap().clear();

    host.now = 5000.0;
    metronome.start(&mut host);
    frame_at(&mut metronome, &mut host, 5000.0);
    let restarted = clicks(&metronome);
    assert_eq!(restarted.len(), 1);
    assert_eq!(restarted[0].beat.index, 0);
    assert_eq!(restarted[0].beat.time_ms, 5000.0);
}

#[test]
fn test_metronome_stop_cancels_pending_frame() {
    let mut host = ManualHost::default();
    let mut metronome = Metronome::new(&settings(120.0, "4/4"), Vec::<Click>::new());

    metronome.start(&mut host);
    frame_at(&mut metronome, &mut host, 0.0);
    let pending = host.pending.expect("a frame should be pending while running");

    metronome.stop(&mut host);
    assert_eq!(host.cancelled, vec![pending]);
    assert!(host.pending.is_none());

    // A stray wake-up after stop plays nothing.
    host.now = 10_000.0;
    assert_eq!(metronome.on_frame(&mut host), 0);
    assert_eq!(clicks(&metronome).len(), 1);
    assert!(host.pending.is_none());
}

#[test]
fn test_metronome_set_running_follows_flag() {
    let mut host = ManualHost::default();
    let mut metronome = Metronome::new(&settings(90.0, "3/4"), Vec::<Click>::new());

    metronome.set_running(true, &mut host);
    metronome.set_running(true, &mut host);
    assert_eq!(host.requested, 1, "starting twice must not double-schedule");

    metronome.set_running(false, &mut host);
    assert!(!metronome.is_running());
    assert!(host.pending.is_none());
}

#[test]
fn test_metronome_volume_scales_velocity() {
    let mut host = ManualHost::default();
    let mut s = settings(120.0, "2/4");
    s.volume = 50;
    let mut metronome = Metronome::new(&s, Vec::<Click>::new());

    metronome.start(&mut host);
    frame_at(&mut metronome, &mut host, 0.0);
    frame_at(&mut metronome, &mut host, 420.0);

    let emitted = clicks(&metronome);
    assert_eq!(emitted[0].velocity, DOWNBEAT_VELOCITY * 0.5);
    assert_eq!(emitted[1].velocity, BEAT_VELOCITY * 0.5);

    metronome.set_volume(250);
    assert_eq!(metronome.volume(), 100);
}

#[test]
fn test_metronome_without_voice_stays_silent() {
    let mut host = ManualHost::default();
    let mut metronome: Metronome<Vec<Click>> =
        Metronome::with_voice(&MetronomeSettings::default(), Err("sample bank not found"));

    assert!(metronome.is_silent());
    metronome.start(&mut host);
    assert!(!metronome.is_running());
    assert_eq!(host.requested, 0);
    assert_eq!(metronome.on_frame(&mut host), 0);
}

#[test]
fn test_metronome_bad_time_signature_counts_in_four() {
    let metronome = Metronome::new(&settings(120.0, "waltz"), Vec::<Click>::new());
    assert_eq!(metronome.scheduler().beats_per_measure(), 4);
}

#[test]
fn test_click_serializes_flat() {
    let click = Click::for_beat(Beat { index: 1, is_downbeat: false, time_ms: 500.0 }, 100);
    let json = serde_json::to_value(click).unwrap();
    assert_eq!(json["index"], 1);
    assert_eq!(json["isDownbeat"], false);
    assert_eq!(json["timeMs"], 500.0);
    assert_eq!(json["note"], BEAT_NOTE);
}
