//! # Program Options
//!
//! Build the program pickers shown when assigning a patch to a song.
//!
//! Nord instruments number their 512 programs as eight banks (`A`-`H`) of
//! eight pages with eight slots each; the display value is `page` then
//! `slot`, so bank A runs `A-11`, `A-12`, ... `A-18`, `A-21`, ... `A-88`.
//! Other instruments only get options for programs the user has named.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Serialize;

const NORD_BANKS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];
const PROGRAMS_PER_BANK: u16 = 64;
const PROGRAMS_PER_PAGE: u16 = 8;

/// Instruments whose name contains this get the banked grid.
const NORD_MARKER: &str = "Nord";

/// A selectable program: `value` is the absolute program number as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramOption {
    pub label: String,
    pub value: String,
}

impl ProgramOption {
    /// Absolute program number this option selects.
    pub fn program(&self) -> Option<u16> {
        self.value.parse().ok()
    }
}

/// One bank of program options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramGroup {
    pub label: String,
    pub options: Vec<ProgramOption>,
}

/// Options for an instrument, either a plain list or grouped by bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProgramOptions {
    Flat(Vec<ProgramOption>),
    Grouped(Vec<ProgramGroup>),
}

impl ProgramOptions {
    /// True when there is nothing to pick from and the caller should fall
    /// back to a raw program number.
    pub fn is_empty(&self) -> bool {
        match self {
            ProgramOptions::Flat(options) => options.is_empty(),
            ProgramOptions::Grouped(groups) => groups.iter().all(|g| g.options.is_empty()),
        }
    }

    /// Iterate every option regardless of grouping.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &ProgramOption> + '_> {
        match self {
            ProgramOptions::Flat(options) => Box::new(options.iter()),
            ProgramOptions::Grouped(groups) => Box::new(groups.iter().flat_map(|g| g.options.iter())),
        }
    }
}

fn nord_label(bank: char, program_in_bank: u16, absolute: u16) -> String {
    let page = program_in_bank / PROGRAMS_PER_PAGE;
    let position = program_in_bank % PROGRAMS_PER_PAGE + 1;
    let display = (page + 1) * 10 + position;
    format!("{}-{} ({})", bank, display, absolute)
}

fn generate_nord_grid() -> Vec<ProgramGroup> {
    NORD_BANKS
        .iter()
        .zip(0u16..)
        .map(|(&bank, bank_index)| ProgramGroup {
            label: format!("Bank {}", bank),
            options: (0..PROGRAMS_PER_BANK)
                .map(|p| {
                    let absolute = bank_index * PROGRAMS_PER_BANK + p;
                    ProgramOption {
                        label: nord_label(bank, p, absolute),
                        value: absolute.to_string(),
                    }
                })
                .collect(),
        })
        .collect()
}

/// The full Nord grid: 8 banks of 64 programs.
///
/// Generated once and cached for the life of the process.
///
/// ```
/// use bandbuddy::build_nord_program_options;
///
/// let banks = build_nord_program_options();
/// assert_eq!(banks.len(), 8);
/// assert_eq!(banks[0].options[0].label, "A-11 (0)");
/// assert_eq!(banks[0].options[63].label, "A-88 (63)");
/// assert_eq!(banks[1].options[0].value, "64");
/// ```
pub fn build_nord_program_options() -> &'static [ProgramGroup] {
    static GRID: OnceLock<Vec<ProgramGroup>> = OnceLock::new();
    GRID.get_or_init(generate_nord_grid)
}

/// Whether an instrument uses the banked Nord numbering.
pub fn is_nord(instrument: &str) -> bool {
    instrument.contains(NORD_MARKER)
}

/// Build the program picker for an instrument.
///
/// - Nord instruments get the banked grid; named programs have the name
///   appended to their label.
/// - Other instruments get a flat `"{num}: {name}"` list of the named
///   programs, ascending, or nothing when no program is named.
/// - No instrument means no options.
///
/// Blank names are ignored.
///
/// ```
/// use std::collections::BTreeMap;
/// use bandbuddy::{build_program_options, ProgramOption, ProgramOptions};
///
/// let names = BTreeMap::from([(2, "E.Piano".to_string()), (0, "Piano".to_string())]);
/// assert_eq!(
///     build_program_options(Some("Yamaha"), &names),
///     ProgramOptions::Flat(vec![
///         ProgramOption { label: "0: Piano".into(), value: "0".into() },
///         ProgramOption { label: "2: E.Piano".into(), value: "2".into() },
///     ])
/// );
/// ```
pub fn build_program_options(
    instrument: Option<&str>,
    custom_names: &BTreeMap<u16, String>,
) -> ProgramOptions {
    let Some(instrument) = instrument else {
        return ProgramOptions::Flat(Vec::new());
    };

    let named: BTreeMap<u16, &str> = custom_names
        .iter()
        .map(|(&num, name)| (num, name.trim()))
        .filter(|(_, name)| !name.is_empty())
        .collect();

    if is_nord(instrument) {
        let grid = build_nord_program_options();
        if named.is_empty() {
            return ProgramOptions::Grouped(grid.to_vec());
        }
        let groups = grid
            .iter()
            .map(|group| ProgramGroup {
                label: group.label.clone(),
                options: group
                    .options
                    .iter()
                    .map(|option| {
                        match option.program().and_then(|p| named.get(&p)) {
                            Some(name) => ProgramOption {
                                label: format!("{} - {}", option.label, name),
                                value: option.value.clone(),
                            },
                            None => option.clone(),
                        }
                    })
                    .collect(),
            })
            .collect();
        return ProgramOptions::Grouped(groups);
    }

    ProgramOptions::Flat(
        named
            .into_iter()
            .map(|(num, name)| ProgramOption {
                label: format!("{}: {}", num, name),
                value: num.to_string(),
            })
            .collect(),
    )
}
