//! bandbuddy - command-line access to the BandBuddy core
//!
//! Subcommands:
//! - `bandbuddy duration <m:ss>` - Parse and format a song duration
//! - `bandbuddy measures` - Estimate measures from duration, tempo and meter
//! - `bandbuddy transpose <chord> <semitones>` - Transpose a chord or key
//! - `bandbuddy lyrics <file>` - Show or transpose chords in a lyric sheet
//! - `bandbuddy programs <instrument>` - List program options as JSON
//! - `bandbuddy program-change` - Encode a program change as MIDI bytes
//! - `bandbuddy setlist <file>` - Summarize a YAML setlist
//! - `bandbuddy click` - Run the metronome in the terminal

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use bandbuddy::chords::{is_chord_line, scan_lyrics, transpose_lyrics};
use bandbuddy::metronome::{Click, InstantHost, Metronome, MetronomeSettings, Sampler};
use bandbuddy::{
    build_program_options, calculate_measures, format_duration, format_duration_to_string,
    format_setlist_length, parse_duration, setlist_total_seconds, transpose_chord, transpose_key,
    BandBuddyError, ProgramChange, Settings, Song, TimeSignature,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "bandbuddy")]
#[command(about = "Song, setlist and live-performance helpers")]
#[command(version)]
struct Cli {
    /// Settings file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an m:ss duration
    Duration {
        /// Duration text, e.g. 3:45
        text: String,
    },

    /// Estimate the number of measures in a song
    Measures {
        /// Duration as m:ss
        #[arg(short, long)]
        duration: String,

        /// Tempo in beats per minute
        #[arg(short, long)]
        bpm: f64,

        /// Time signature, e.g. 3/4
        #[arg(short, long, default_value = "4/4")]
        time_signature: String,
    },

    /// Transpose a chord symbol or song key
    Transpose {
        /// Chord or key, e.g. Bbmaj7/D or F#m
        symbol: String,

        /// Semitones to move (negative moves down)
        #[arg(allow_negative_numbers = true)]
        semitones: i32,

        /// Treat the symbol as a song key (root plus optional m)
        #[arg(short, long)]
        key: bool,
    },

    /// Print a lyric sheet, optionally with chords transposed
    Lyrics {
        /// Lyric file
        file: PathBuf,

        /// Semitones to transpose chords by
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        transpose: i32,

        /// Print scanned tokens as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List program options for an instrument as JSON
    Programs {
        /// Instrument name as configured, e.g. "Nord Stage 3"
        instrument: String,
    },

    /// Encode a program change as MIDI bytes
    ProgramChange {
        /// MIDI channel, 1-16
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=16))]
        channel: u8,

        /// Program number, 0-511
        #[arg(short, long)]
        program: u16,
    },

    /// Summarize a setlist (YAML list of songs)
    Setlist {
        /// Setlist file
        file: PathBuf,

        /// Semitones to transpose every key by
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        transpose: i32,
    },

    /// Run the metronome
    Click {
        /// Tempo (defaults to the configured tempo)
        #[arg(short, long)]
        bpm: Option<f64>,

        /// Time signature (defaults to the configured one)
        #[arg(short, long)]
        time_signature: Option<String>,

        /// Volume 0-100 (defaults to the configured volume)
        #[arg(short, long)]
        volume: Option<u8>,

        /// Stop after this many beats
        #[arg(short = 'n', long, default_value = "8")]
        beats: usize,
    },
}

/// Prints clicks to the terminal as they are scheduled.
struct ConsoleSampler {
    played: usize,
}

impl Sampler for ConsoleSampler {
    fn play(&mut self, click: &Click) {
        self.played += 1;
        let label = if click.beat.is_downbeat { "TICK" } else { "tock" };
        println!(
            "{:>8.1} ms  {}  beat {}  velocity {:.2}",
            click.beat.time_ms,
            label,
            click.beat.index + 1,
            click.velocity
        );
        let _ = io::stdout().flush();
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bandbuddy=info")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), BandBuddyError> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    match cli.command {
        Commands::Duration { text } => {
            let seconds = parse_duration(&text)?;
            println!("{} seconds", seconds);
            println!("{}", format_duration_to_string(seconds));
            println!("{}", format_duration(i64::from(seconds)));
        }

        Commands::Measures {
            duration,
            bpm,
            time_signature,
        } => {
            let seconds = parse_duration(&duration)?;
            let time_signature: TimeSignature = time_signature.parse()?;
            let meter = time_signature.to_string();
            match calculate_measures(Some(seconds.into()), Some(bpm), Some(meter.as_str())) {
                Some(measures) => println!("{}", measures),
                None => println!("—"),
            }
        }

        Commands::Transpose {
            symbol,
            semitones,
            key,
        } => {
            let result = if key {
                transpose_key(&symbol, semitones)
            } else {
                transpose_chord(&symbol, semitones)
            };
            println!("{}", result);
        }

        Commands::Lyrics {
            file,
            transpose,
            json,
        } => {
            let text = read_file(&file)?;
            if json {
                println!("{}", to_json(&scan_lyrics(&text))?);
            } else {
                for line in transpose_lyrics(&text, transpose).lines() {
                    let marker = if is_chord_line(line) { "♪" } else { " " };
                    println!("{} {}", marker, line);
                }
            }
        }

        Commands::Programs { instrument } => {
            let names = settings.program_names(&instrument);
            let options = build_program_options(Some(instrument.as_str()), &names);
            if options.is_empty() {
                tracing::info!(instrument = %instrument, "no named programs; enter a program number directly");
            }
            println!("{}", to_json(&options)?);
        }

        Commands::ProgramChange { channel, program } => {
            let pc = ProgramChange::new(channel - 1, program)?;
            let bytes: Vec<String> = pc.to_bytes().iter().map(|b| format!("{:02X}", b)).collect();
            println!("{}", bytes.join(" "));
        }

        Commands::Setlist { file, transpose } => {
            let songs: Vec<Song> = serde_yaml::from_str(&read_file(&file)?)
                .map_err(|e| BandBuddyError::ConfigError(e.to_string()))?;
            for (i, song) in songs.iter().enumerate() {
                let measures = song
                    .measures()
                    .map(|m| format!("{} bars", m))
                    .unwrap_or_default();
                let key = song.transposed_key(transpose).unwrap_or_default();
                println!(
                    "{:>2}. {:<32} {:>6} {:>4} {:>9}",
                    i + 1,
                    song.title,
                    song.duration.as_deref().unwrap_or("—"),
                    key,
                    measures
                );
            }
            println!(
                "{} songs, {} ({} s)",
                songs.len(),
                format_setlist_length(&songs),
                setlist_total_seconds(&songs)
            );
        }

        Commands::Click {
            bpm,
            time_signature,
            volume,
            beats,
        } => {
            let mut metronome_settings = settings.metronome.clone();
            if let Some(bpm) = bpm {
                metronome_settings.bpm = bpm;
            }
            if let Some(ts) = time_signature {
                metronome_settings.time_signature = ts;
            }
            if let Some(volume) = volume {
                metronome_settings.volume = volume;
            }
            run_click(&metronome_settings, beats);
        }
    }

    Ok(())
}

fn run_click(settings: &MetronomeSettings, beats: usize) {
    tracing::info!(
        bpm = settings.bpm,
        time_signature = %settings.time_signature,
        "starting metronome"
    );

    let mut host = InstantHost::default();
    let mut metronome = Metronome::new(settings, ConsoleSampler { played: 0 });
    metronome.start(&mut host);

    while host.wait_for_frame() {
        metronome.on_frame(&mut host);
        let played = metronome.voice().map_or(0, |v| v.played);
        if played >= beats {
            metronome.stop(&mut host);
        }
    }
}

fn read_file(path: &Path) -> Result<String, BandBuddyError> {
    fs::read_to_string(path)
        .map_err(|e| BandBuddyError::ConfigError(format!("reading '{}': {}", path.display(), e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, BandBuddyError> {
    serde_json::to_string_pretty(value).map_err(|e| BandBuddyError::ConfigError(e.to_string()))
}
