//! Machine configuration: grid geometry, bet limits and the symbol table.
//!
//! [`MachineConfig`] is the raw, serializable description. It only becomes
//! usable through [`MachineConfig::validate`], which yields a [`Machine`];
//! the engine never sees an unvalidated configuration.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paytable::Paytable;
use crate::pool::SymbolPool;
use crate::symbols::{Symbol, SymbolSpec};

pub const REFERENCE_ROWS: usize = 4;
pub const REFERENCE_COLS: usize = 3;
pub const REFERENCE_MAX_LINES: u32 = 4;
pub const REFERENCE_MIN_BET: u64 = 10;
pub const REFERENCE_MAX_BET: u64 = 10_000;
/// Largest pool a machine may declare; every column draw copies the pool.
pub const MAX_POOL_SIZE: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MachineConfig {
    pub rows: usize,
    pub cols: usize,
    pub max_lines: u32,
    pub min_bet: u64,
    pub max_bet: u64,
    pub symbols: Vec<SymbolSpec>,
}

impl MachineConfig {
    /// The classic 3 column by 4 row machine with `£`, `$` and `Ħ`.
    pub fn reference() -> Self {
        Self {
            rows: REFERENCE_ROWS,
            cols: REFERENCE_COLS,
            max_lines: REFERENCE_MAX_LINES,
            min_bet: REFERENCE_MIN_BET,
            max_bet: REFERENCE_MAX_BET,
            symbols: vec![
                SymbolSpec::new(Symbol::Pound, 6, 8),
                SymbolSpec::new(Symbol::Dollar, 6, 5),
                SymbolSpec::new(Symbol::Hbar, 8, 3),
            ],
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    pub fn pool_size(&self) -> u64 {
        self.symbols.iter().map(|s| u64::from(s.weight)).sum()
    }

    pub fn validate(self) -> Result<Machine, ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.max_lines == 0 || self.max_lines as usize > self.rows {
            return Err(ConfigError::LinesOutOfRange {
                max_lines: self.max_lines,
                rows: self.rows,
            });
        }
        if self.min_bet == 0 || self.min_bet > self.max_bet {
            return Err(ConfigError::BetLimits {
                min_bet: self.min_bet,
                max_bet: self.max_bet,
            });
        }
        if self.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        let mut seen = HashSet::new();
        for spec in &self.symbols {
            if !seen.insert(spec.symbol) {
                return Err(ConfigError::DuplicateSymbol(spec.symbol));
            }
            if spec.weight == 0 {
                return Err(ConfigError::ZeroWeight(spec.symbol));
            }
        }
        let pool_size = self.pool_size();
        if pool_size > MAX_POOL_SIZE {
            return Err(ConfigError::PoolTooLarge {
                pool_size,
                max: MAX_POOL_SIZE,
            });
        }
        if self.rows as u64 > pool_size {
            return Err(ConfigError::PoolTooSmall {
                rows: self.rows,
                pool_size: pool_size as usize,
            });
        }
        let pool = SymbolPool::from_specs(&self.symbols);
        let paytable = Paytable::from_specs(&self.symbols);
        Ok(Machine {
            config: self,
            paytable,
            pool,
        })
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// A validated machine. Sampling `rows` symbols from its pool always succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    config: MachineConfig,
    paytable: Paytable,
    pool: SymbolPool,
}

impl Machine {
    pub fn reference() -> Self {
        let config = MachineConfig::reference();
        Self {
            paytable: Paytable::from_specs(&config.symbols),
            pool: SymbolPool::from_specs(&config.symbols),
            config,
        }
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn max_lines(&self) -> u32 {
        self.config.max_lines
    }

    pub fn min_bet(&self) -> u64 {
        self.config.min_bet
    }

    pub fn max_bet(&self) -> u64 {
        self.config.max_bet
    }

    pub fn symbols(&self) -> &[SymbolSpec] {
        &self.config.symbols
    }

    pub fn paytable(&self) -> &Paytable {
        &self.paytable
    }

    pub fn pool(&self) -> &SymbolPool {
        &self.pool
    }

    pub fn pool_size(&self) -> usize {
        self.pool.size()
    }

    /// Probability that a single payline shows `symbol` in every column.
    ///
    /// A row cell is a uniform draw from the pool, and columns are independent,
    /// so the line probability is `(weight / pool_size) ^ cols`.
    pub fn line_hit_probability(&self, symbol: Symbol) -> f64 {
        let weight = self
            .config
            .symbols
            .iter()
            .find(|s| s.symbol == symbol)
            .map(|s| s.weight)
            .unwrap_or(0);
        (weight as f64 / self.pool_size() as f64).powi(self.cols() as i32)
    }

    /// Expected return per unit bet on one line.
    pub fn line_rtp(&self) -> f64 {
        self.config
            .symbols
            .iter()
            .map(|s| self.line_hit_probability(s.symbol) * s.multiplier as f64)
            .sum()
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::reference()
    }
}
