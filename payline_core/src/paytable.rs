use crate::symbols::{Symbol, SymbolSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaytableEntry {
    pub symbol: Symbol,
    pub multiplier: u64,
}

/// Line pays keyed by symbol. A line wins only when every column matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paytable(pub Vec<PaytableEntry>);

impl Paytable {
    pub fn from_specs(specs: &[SymbolSpec]) -> Self {
        Self(
            specs
                .iter()
                .map(|s| PaytableEntry {
                    symbol: s.symbol,
                    multiplier: s.multiplier,
                })
                .collect(),
        )
    }

    /// Multiplier for a full line of `symbol`; zero when the symbol is unpaid.
    pub fn multiplier(&self, symbol: Symbol) -> u64 {
        self.0
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.multiplier)
            .unwrap_or(0)
    }
}
