use crate::symbols::Symbol;

/// Invalid machine configuration. Fatal: detected before any spin runs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid needs at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("max lines must be between 1 and {rows}, got {max_lines}")]
    LinesOutOfRange { max_lines: u32, rows: usize },
    #[error("bet limits are invalid: min {min_bet}, max {max_bet}")]
    BetLimits { min_bet: u64, max_bet: u64 },
    #[error("no symbols configured")]
    NoSymbols,
    #[error("symbol {0} is configured more than once")]
    DuplicateSymbol(Symbol),
    #[error("symbol {0} has zero supply weight")]
    ZeroWeight(Symbol),
    #[error("pool of {pool_size} symbols exceeds the limit of {max}")]
    PoolTooLarge { pool_size: u64, max: u64 },
    #[error("cannot draw {rows} rows from a pool of {pool_size} symbols")]
    PoolTooSmall { rows: usize, pool_size: usize },
    #[error("machine file: {0}")]
    Io(String),
    #[error("machine file is not valid JSON: {0}")]
    Parse(String),
}

/// A piece of player input that could not be accepted. Recovered by re-prompting.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Amount must be a positive number.")]
    InvalidDeposit,
    #[error("Please enter a valid number of lines (1 - {max}).")]
    InvalidLines { max: u32 },
    #[error("Please enter a bet amount between {min} and {max}.")]
    InvalidBet { min: u64, max: u64 },
}

/// A wager the session refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WagerError {
    #[error("Sorry, you don't have enough balance to bet {total_bet}. Your current balance is {balance}")]
    InsufficientBalance { total_bet: u64, balance: u64 },
    #[error("wager of {lines} line(s) at {bet} overflows")]
    Overflow { lines: u32, bet: u64 },
}
