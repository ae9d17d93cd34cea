//! MIDI program-change messages
//!
//! A program number from a program picker (0-511) is sent as a bank select
//! followed by a program change: CC 0 (bank MSB, always 0), CC 32 (bank LSB,
//! `program / 128`) and then the program within the bank (`program % 128`).

use serde::Serialize;

use crate::error::BandBuddyError;

const CONTROL_CHANGE: u8 = 0xB0;
const PROGRAM_CHANGE: u8 = 0xC0;
const BANK_SELECT_MSB: u8 = 0;
const BANK_SELECT_LSB: u8 = 32;

pub const MAX_CHANNEL: u8 = 15;
pub const MAX_PROGRAM: u16 = 511;

/// A validated program change on one MIDI channel (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgramChange {
    channel: u8,
    program: u16,
}

impl ProgramChange {
    /// ```
    /// use bandbuddy::ProgramChange;
    ///
    /// assert!(ProgramChange::new(0, 511).is_ok());
    /// assert!(ProgramChange::new(16, 0).is_err());
    /// assert!(ProgramChange::new(0, 512).is_err());
    /// ```
    pub fn new(channel: u8, program: u16) -> Result<Self, BandBuddyError> {
        let error = |message: &str| BandBuddyError::InvalidProgramChange {
            channel,
            program,
            message: message.to_string(),
        };
        if channel > MAX_CHANNEL {
            return Err(error("channel must be 0-15"));
        }
        if program > MAX_PROGRAM {
            return Err(error("program must be 0-511"));
        }
        Ok(Self { channel, program })
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn program(&self) -> u16 {
        self.program
    }

    /// Bank number sent as bank select LSB.
    pub fn bank(&self) -> u8 {
        (self.program / 128) as u8
    }

    /// Program number within the bank.
    pub fn program_in_bank(&self) -> u8 {
        (self.program % 128) as u8
    }

    /// Raw MIDI bytes: bank select MSB, bank select LSB, program change.
    ///
    /// ```
    /// use bandbuddy::ProgramChange;
    ///
    /// let pc = ProgramChange::new(1, 130).unwrap();
    /// assert_eq!(pc.to_bytes(), [0xB1, 0, 0, 0xB1, 32, 1, 0xC1, 2]);
    /// ```
    pub fn to_bytes(&self) -> [u8; 8] {
        let cc = CONTROL_CHANGE | self.channel;
        [
            cc,
            BANK_SELECT_MSB,
            0,
            cc,
            BANK_SELECT_LSB,
            self.bank(),
            PROGRAM_CHANGE | self.channel,
            self.program_in_bank(),
        ]
    }
}
