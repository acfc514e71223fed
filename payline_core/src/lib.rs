pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod paytable;
pub mod pool;
pub mod rng;
pub mod session;
pub mod symbols;
pub mod wager;

pub use crate::config::{Machine, MachineConfig};
pub use crate::engine::{evaluate, generate_grid, spin_once, spin_with_seeds, verify_grid, SpinOutcome, SpinResult};
pub use crate::error::{ConfigError, InputError, WagerError};
pub use crate::grid::Grid;
pub use crate::paytable::{Paytable, PaytableEntry};
pub use crate::pool::SymbolPool;
pub use crate::rng::{derive_floats, derive_hash_hex, random_seed_hex, ProvablyFairRng, UniformStream};
pub use crate::session::{Session, SessionStats, SpinRecord};
pub use crate::symbols::{Symbol, SymbolSpec};
pub use crate::wager::{parse_bet, parse_deposit, parse_lines, Wager};
