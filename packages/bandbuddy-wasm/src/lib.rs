use std::collections::BTreeMap;

use bandbuddy::metronome::{Click, FrameHandle, FrameHost, Metronome, MetronomeSettings};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct JsError {
    message: String,
}

fn to_js_error(message: impl ToString) -> JsValue {
    let error = JsError {
        message: message.to_string(),
    };
    JsValue::from_str(&serde_json::to_string(&error).unwrap_or_else(|_| error.message.clone()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(to_js_error)
}

/// Parse m:ss into seconds; `undefined` when invalid
#[wasm_bindgen(js_name = parseDuration)]
pub fn parse_duration(text: Option<String>) -> Option<u32> {
    bandbuddy::parse_duration_or_none(text.as_deref())
}

/// Parse m:ss into seconds; `0` when missing or invalid
#[wasm_bindgen(js_name = parseDurationOrZero)]
pub fn parse_duration_or_zero(text: Option<String>) -> u32 {
    bandbuddy::parse_duration_or_zero(text.as_deref())
}

#[wasm_bindgen(js_name = formatDurationToString)]
pub fn format_duration_to_string(seconds: u32) -> String {
    bandbuddy::format_duration_to_string(seconds)
}

#[wasm_bindgen(js_name = formatDuration)]
pub fn format_duration(seconds: f64) -> String {
    bandbuddy::format_duration(seconds.trunc() as i64)
}

/// Estimated measures, `undefined` when any input is missing or invalid
#[wasm_bindgen(js_name = calculateMeasures)]
pub fn calculate_measures(
    duration: Option<String>,
    bpm: Option<f64>,
    time_signature: Option<String>,
) -> Option<u32> {
    bandbuddy::calculate_measures(
        duration.as_deref().map(Into::into),
        bpm,
        time_signature.as_deref(),
    )
}

#[wasm_bindgen(js_name = isChordToken)]
pub fn is_chord_token(token: &str) -> bool {
    bandbuddy::is_chord_token(token)
}

#[wasm_bindgen(js_name = transposeKey)]
pub fn transpose_key(key: &str, semitones: i32) -> String {
    bandbuddy::transpose_key(key, semitones)
}

#[wasm_bindgen(js_name = transposeChord)]
pub fn transpose_chord(symbol: &str, semitones: i32) -> String {
    bandbuddy::transpose_chord(symbol, semitones)
}

/// Scan lyrics into tokens (JSON array) with chords transposed by `semitones`
#[wasm_bindgen(js_name = scanLyrics)]
pub fn scan_lyrics(text: &str, semitones: i32) -> Result<String, JsValue> {
    let transposed = bandbuddy::chords::transpose_lyrics(text, semitones);
    to_json(&bandbuddy::chords::scan_lyrics(&transposed))
}

/// The Nord program grid as JSON
#[wasm_bindgen(js_name = buildNordProgramOptions)]
pub fn build_nord_program_options() -> Result<String, JsValue> {
    to_json(&bandbuddy::build_nord_program_options())
}

/// Program options for an instrument as JSON.
///
/// `custom_names` is an object keyed by program number, e.g. `{ "0": "Piano" }`.
/// Keys that are not program numbers are ignored.
#[wasm_bindgen(js_name = buildProgramOptions)]
pub fn build_program_options(
    instrument: Option<String>,
    custom_names: JsValue,
) -> Result<String, JsValue> {
    let raw: BTreeMap<String, String> = if custom_names.is_undefined() || custom_names.is_null() {
        BTreeMap::new()
    } else {
        serde_wasm_bindgen::from_value(custom_names).map_err(to_js_error)?
    };
    let names: BTreeMap<u16, String> = raw
        .into_iter()
        .filter_map(|(num, name)| num.trim().parse().ok().map(|n| (n, name)))
        .collect();
    to_json(&bandbuddy::build_program_options(instrument.as_deref(), &names))
}

/// Raw MIDI bytes for a program change on a 0-based channel
#[wasm_bindgen(js_name = programChangeBytes)]
pub fn program_change_bytes(channel: u8, program: u16) -> Result<Vec<u8>, JsValue> {
    bandbuddy::ProgramChange::new(channel, program)
        .map(|pc| pc.to_bytes().to_vec())
        .map_err(to_js_error)
}

/// Frame host for a page driving the metronome from `requestAnimationFrame`.
///
/// The page owns the real callback; this records whether the metronome wants
/// another one.
#[derive(Default)]
struct AnimationFrameHost {
    now: f64,
    next: u64,
    pending: Option<FrameHandle>,
}

impl FrameHost for AnimationFrameHost {
    fn now_ms(&self) -> f64 {
        self.now
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// Metronome driven by the page's animation frames.
///
/// ```js
/// const metronome = new BandBuddyMetronome(120, "4/4", volume);
/// metronome.start(performance.now());
/// function frame(now) {
///   for (const click of JSON.parse(metronome.tick(now))) sampler.play(click);
///   if (metronome.wantsFrame()) rafId = requestAnimationFrame(frame);
/// }
/// rafId = requestAnimationFrame(frame);
/// ```
#[wasm_bindgen(js_name = BandBuddyMetronome)]
pub struct WasmMetronome {
    metronome: Metronome<Vec<Click>>,
    host: AnimationFrameHost,
}

#[wasm_bindgen(js_class = BandBuddyMetronome)]
impl WasmMetronome {
    #[wasm_bindgen(constructor)]
    pub fn new(bpm: f64, time_signature: String, volume: u8) -> Self {
        let settings = MetronomeSettings {
            bpm,
            time_signature,
            volume,
            ..MetronomeSettings::default()
        };
        Self {
            metronome: Metronome::new(&settings, Vec::new()),
            host: AnimationFrameHost::default(),
        }
    }

    /// A metronome whose sample voice failed to load; it never clicks.
    pub fn silent(reason: String) -> Self {
        let voice: Result<Vec<Click>, String> = Err(reason);
        Self {
            metronome: Metronome::with_voice(&MetronomeSettings::default(), voice),
            host: AnimationFrameHost::default(),
        }
    }

    pub fn start(&mut self, now: f64) {
        self.host.now = now;
        self.metronome.start(&mut self.host);
    }

    pub fn stop(&mut self) {
        self.metronome.stop(&mut self.host);
    }

    #[wasm_bindgen(js_name = setRunning)]
    pub fn set_running(&mut self, running: bool, now: f64) {
        self.host.now = now;
        self.metronome.set_running(running, &mut self.host);
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.metronome.is_running()
    }

    /// Whether the page should request another animation frame.
    #[wasm_bindgen(js_name = wantsFrame)]
    pub fn wants_frame(&self) -> bool {
        self.host.pending.is_some()
    }

    /// Run one scheduling tick at `now` and return the due clicks as JSON.
    pub fn tick(&mut self, now: f64) -> Result<String, JsValue> {
        self.host.now = now;
        if self.host.pending.take().is_some() {
            self.metronome.on_frame(&mut self.host);
        }
        let clicks = self
            .metronome
            .voice_mut()
            .map(std::mem::take)
            .unwrap_or_default();
        to_json(&clicks)
    }

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, volume: u8) {
        self.metronome.set_volume(volume);
    }

    #[wasm_bindgen(js_name = setTempo)]
    pub fn set_tempo(&mut self, bpm: f64) {
        self.metronome.set_tempo(bpm);
    }

    #[wasm_bindgen(js_name = setTimeSignature)]
    pub fn set_time_signature(&mut self, time_signature: &str) {
        self.metronome.set_time_signature(time_signature);
    }
}
