//! Integration tests for the BandBuddy core
//!
//! Exercises the public API the way the front-end and CLI use it.

use std::collections::BTreeMap;

use bandbuddy::chords::{is_chord_line, transpose_lyrics};
use bandbuddy::metronome::{Click, FrameHandle, FrameHost, Metronome, MetronomeSettings};
use bandbuddy::{
    build_nord_program_options, build_program_options, calculate_measures, format_duration,
    format_duration_to_string, is_chord_token, parse_duration, parse_duration_or_none,
    parse_duration_or_zero, setlist_total_seconds, transpose_key, ProgramChange, ProgramOption,
    ProgramOptions, Settings, Song,
};

#[test]
fn test_duration_round_trip() {
    for seconds in (0..7200).step_by(37) {
        assert_eq!(parse_duration(&format_duration_to_string(seconds)), Ok(seconds));
    }
}

#[test]
fn test_duration_examples() {
    assert_eq!(parse_duration("3:45"), Ok(225));
    assert_eq!(parse_duration("61:00"), Ok(3660));
    assert_eq!(parse_duration_or_zero(Some("1:60")), 0);
    assert_eq!(parse_duration_or_none(Some("1:60")), None);

    assert_eq!(format_duration(3661), "1h 1m 1s");
    assert_eq!(format_duration(65), "1m 5s");
    assert_eq!(format_duration(0), "—");
}

#[test]
fn test_measure_examples() {
    assert_eq!(calculate_measures(Some("2:00".into()), Some(120.0), Some("4/4")), Some(60));
    assert_eq!(calculate_measures(None, Some(120.0), Some("4/4")), None);
}

#[test]
fn test_chord_detection_examples() {
    assert!(is_chord_token("Cmaj7"));
    assert!(!is_chord_token("Can"));
    assert!(is_chord_token("Bb/D"));
    assert!(!is_chord_token("the"));
}

#[test]
fn test_key_transpose_properties() {
    for key in ["C", "C#m", "D", "Eb", "F#", "Ab", "Bbm", "B"] {
        assert_eq!(transpose_key(key, 12), key);
        assert_eq!(transpose_key(key, -12), key);
    }
    for key in ["C", "C#m", "D", "F#", "A#m", "B"] {
        assert_eq!(transpose_key(&transpose_key(key, 1), -1), key);
    }
}

#[test]
fn test_lyric_sheet_transpose() {
    let sheet = "\
[Chorus]
    G          D/F#
Take me home, country roads
";
    let up = transpose_lyrics(sheet, 2);
    assert_eq!(
        up,
        "\
[Chorus]
    A          E/G#
Take me home, country roads
"
    );
    let lines: Vec<&str> = up.lines().collect();
    assert!(!is_chord_line(lines[0]));
    assert!(is_chord_line(lines[1]));
    assert!(!is_chord_line(lines[2]));
}

#[test]
fn test_nord_grid_examples() {
    let grid = build_nord_program_options();
    assert_eq!(grid.len(), 8);
    assert!(grid.iter().all(|g| g.options.len() == 64));
    assert_eq!(grid[0].options[0].label, "A-11 (0)");
    assert_eq!(grid[0].options[0].value, "0");
    assert_eq!(grid[0].options[63].label, "A-88 (63)");
    assert_eq!(grid[0].options[63].value, "63");
    assert_eq!(grid[1].options[0].value, "64");
}

#[test]
fn test_named_programs_example() {
    let names = BTreeMap::from([(0, "Piano".to_string()), (2, "E.Piano".to_string())]);
    assert_eq!(
        build_program_options(Some("Yamaha"), &names),
        ProgramOptions::Flat(vec![
            ProgramOption { label: "0: Piano".to_string(), value: "0".to_string() },
            ProgramOption { label: "2: E.Piano".to_string(), value: "2".to_string() },
        ])
    );
}

#[test]
fn test_program_option_to_midi() {
    let settings = Settings::from_yaml("instruments:\n  Nord Stage 3:\n    130: Wurli\n").unwrap();
    let options = build_program_options(Some("Nord Stage 3"), &settings.program_names("Nord Stage 3"));

    let wurli = options
        .iter()
        .find(|o| o.label.ends_with("Wurli"))
        .expect("named program should be labelled");
    assert_eq!(wurli.label, "C-13 (130) - Wurli");

    let pc = ProgramChange::new(0, wurli.program().unwrap()).unwrap();
    assert_eq!(pc.to_bytes(), [0xB0, 0, 0, 0xB0, 32, 1, 0xC0, 2]);
}

#[test]
fn test_setlist_from_yaml() {
    let songs: Vec<Song> = serde_yaml::from_str(
        r#"
- title: Opener
  duration: "3:30"
  bpm: 128
  time-signature: 4/4
  key: E
- title: Ballad
  duration: "5:1x"
- title: Closer
  duration: "4:00"
"#,
    )
    .unwrap();

    assert_eq!(setlist_total_seconds(&songs), 450);
    assert_eq!(songs[0].measures(), Some(112));
    assert_eq!(songs[1].measures(), None);
    assert_eq!(songs[0].transposed_key(-2).as_deref(), Some("D"));
}

struct StepHost {
    now: f64,
    pending: Option<FrameHandle>,
    next: u64,
}

impl FrameHost for StepHost {
    fn now_ms(&self) -> f64 {
        self.now
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        self.pending = Some(FrameHandle(self.next));
        FrameHandle(self.next)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[test]
fn test_metronome_example() {
    let settings = MetronomeSettings {
        bpm: 120.0,
        time_signature: "4/4".to_string(),
        ..MetronomeSettings::default()
    };
    let mut host = StepHost { now: 0.0, pending: None, next: 0 };
    let mut metronome = Metronome::new(&settings, Vec::<Click>::new());

    let run = |metronome: &mut Metronome<Vec<Click>>, host: &mut StepHost, frames: usize| {
        for _ in 0..frames {
            if host.pending.take().is_none() {
                break;
            }
            metronome.on_frame(host);
            host.now += 16.7;
        }
    };

    metronome.set_running(true, &mut host);
    run(&mut metronome, &mut host, 150); // ~2.5 s

    let clicks = metronome.voice().unwrap().clone();
    assert!(clicks.len() >= 5);
    assert!(clicks[0].beat.is_downbeat);
    assert!(clicks[4].beat.is_downbeat);
    assert_eq!(clicks[4].beat.index, 0);
    assert!(clicks[1..4].iter().all(|c| !c.beat.is_downbeat));

    metronome.set_running(false, &mut host);
    metronome.voice_mut().unwrap().clear();
    metronome.set_running(true, &mut host);
    run(&mut metronome, &mut host, 1);

    let clicks = metronome.voice().unwrap();
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].beat.index, 0);
}
