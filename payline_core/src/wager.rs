//! Parsing and validation of player input.
//!
//! Each function inspects one line of input and returns a typed result; the
//! caller decides whether to re-prompt.

use crate::config::Machine;
use crate::error::{InputError, WagerError};

/// Lines and bet-per-line the player asked for, already range checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wager {
    lines: u32,
    bet_per_line: u64,
}

impl Wager {
    pub fn new(machine: &Machine, lines: u32, bet_per_line: u64) -> Result<Self, InputError> {
        if lines == 0 || lines > machine.max_lines() {
            return Err(InputError::InvalidLines {
                max: machine.max_lines(),
            });
        }
        if bet_per_line < machine.min_bet() || bet_per_line > machine.max_bet() {
            return Err(InputError::InvalidBet {
                min: machine.min_bet(),
                max: machine.max_bet(),
            });
        }
        Ok(Self {
            lines,
            bet_per_line,
        })
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn bet_per_line(&self) -> u64 {
        self.bet_per_line
    }

    pub fn total_bet(&self) -> Result<u64, WagerError> {
        self.bet_per_line
            .checked_mul(u64::from(self.lines))
            .ok_or(WagerError::Overflow {
                lines: self.lines,
                bet: self.bet_per_line,
            })
    }
}

fn parse_digits(input: &str) -> Option<u64> {
    let s = input.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

pub fn parse_deposit(input: &str) -> Result<u64, InputError> {
    match parse_digits(input) {
        Some(amount) if amount > 0 => Ok(amount),
        _ => Err(InputError::InvalidDeposit),
    }
}

pub fn parse_lines(machine: &Machine, input: &str) -> Result<u32, InputError> {
    let max = machine.max_lines();
    parse_digits(input)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| (1..=max).contains(n))
        .ok_or(InputError::InvalidLines { max })
}

pub fn parse_bet(machine: &Machine, input: &str) -> Result<u64, InputError> {
    let (min, max) = (machine.min_bet(), machine.max_bet());
    parse_digits(input)
        .filter(|n| (min..=max).contains(n))
        .ok_or(InputError::InvalidBet { min, max })
}
