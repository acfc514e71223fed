use std::fmt;

use serde::{Deserialize, Serialize};

/// Cell value on the grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Pound,
    Dollar,
    Hbar,
}

impl Symbol {
    pub const ALL: [Symbol; 3] = [Symbol::Pound, Symbol::Dollar, Symbol::Hbar];

    pub fn from_index(i: u8) -> Option<Self> {
        match i {
            0 => Some(Symbol::Pound),
            1 => Some(Symbol::Dollar),
            2 => Some(Symbol::Hbar),
            _ => None,
        }
    }

    pub fn to_index(self) -> u8 {
        match self {
            Symbol::Pound => 0,
            Symbol::Dollar => 1,
            Symbol::Hbar => 2,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Symbol::Pound => '£',
            Symbol::Dollar => '$',
            Symbol::Hbar => 'Ħ',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Supply weight and payout multiplier of one symbol.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymbolSpec {
    pub symbol: Symbol,
    /// Copies of the symbol in the draw pool.
    pub weight: u32,
    /// Paid per unit bet when a whole line shows this symbol.
    pub multiplier: u64,
}

impl SymbolSpec {
    pub const fn new(symbol: Symbol, weight: u32, multiplier: u64) -> Self {
        Self {
            symbol,
            weight,
            multiplier,
        }
    }
}
