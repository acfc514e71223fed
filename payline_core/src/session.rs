//! Per-player session state and the spin transaction.

use tracing::debug;

use crate::{
    config::Machine,
    engine::{evaluate, generate_grid, SpinResult},
    error::WagerError,
    grid::Grid,
    rng::{random_seed_hex, ProvablyFairRng},
    wager::Wager,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub spins: u64,
    pub total_wagered: u64,
    pub total_won: u64,
}

/// Everything one accepted spin produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinRecord {
    pub nonce: u64,
    pub wager: Wager,
    pub total_bet: u64,
    pub grid: Grid,
    pub result: SpinResult,
    pub balance_before: u64,
    pub balance_after: u64,
}

#[derive(Debug, Clone)]
pub struct Session {
    balance: u64,
    rng: ProvablyFairRng,
    stats: SessionStats,
}

impl Session {
    /// Fresh session with a random server seed.
    pub fn new(client_seed: impl Into<String>) -> Self {
        Self::with_seeds(random_seed_hex(), client_seed, 0)
    }

    /// Session whose first spin uses `first_nonce`.
    pub fn with_seeds(
        server_seed: impl Into<String>,
        client_seed: impl Into<String>,
        first_nonce: u64,
    ) -> Self {
        Self {
            balance: 0,
            rng: ProvablyFairRng::new(server_seed, client_seed, first_nonce),
            stats: SessionStats::default(),
        }
    }

    pub fn with_balance(mut self, balance: u64) -> Self {
        self.balance = balance;
        self
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Nonce the next spin will use.
    pub fn next_nonce(&self) -> u64 {
        self.rng.nonce
    }

    pub fn client_seed(&self) -> &str {
        &self.rng.client_seed
    }

    pub fn server_seed_hash(&self) -> String {
        self.rng.server_seed_hash_hex()
    }

    /// The secret server seed, revealed once the player is done.
    pub fn reveal_server_seed(&self) -> &str {
        &self.rng.server_seed
    }

    pub fn deposit(&mut self, amount: u64) -> u64 {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }

    /// Checks a wager against the balance without spinning.
    pub fn check_wager(&self, wager: &Wager) -> Result<u64, WagerError> {
        let total_bet = wager.total_bet()?;
        if total_bet > self.balance {
            return Err(WagerError::InsufficientBalance {
                total_bet,
                balance: self.balance,
            });
        }
        Ok(total_bet)
    }

    /// Runs one spin: check the bet, draw the grid, pay the lines, settle.
    ///
    /// A refused wager leaves the session untouched.
    pub fn spin(&mut self, machine: &Machine, wager: Wager) -> Result<SpinRecord, WagerError> {
        self.check_wager(&wager)?;
        let grid = generate_grid(&self.rng, machine);
        self.settle(machine, wager, grid)
    }

    /// Pays `wager` against an already drawn `grid` and consumes the nonce.
    pub fn settle(
        &mut self,
        machine: &Machine,
        wager: Wager,
        grid: Grid,
    ) -> Result<SpinRecord, WagerError> {
        let total_bet = self.check_wager(&wager)?;
        let result = evaluate(&grid, machine.paytable(), wager.lines(), wager.bet_per_line());
        let nonce = self.rng.nonce;

        let balance_before = self.balance;
        // total_bet <= balance, so the subtraction cannot underflow
        self.balance = (balance_before - total_bet).saturating_add(result.winnings);
        self.rng = self.rng.advanced();
        self.stats.spins += 1;
        self.stats.total_wagered = self.stats.total_wagered.saturating_add(total_bet);
        self.stats.total_won = self.stats.total_won.saturating_add(result.winnings);

        debug!(
            nonce,
            total_bet,
            winnings = result.winnings,
            balance = self.balance,
            "spin settled"
        );

        Ok(SpinRecord {
            nonce,
            wager,
            total_bet,
            grid,
            result,
            balance_before,
            balance_after: self.balance,
        })
    }
}
