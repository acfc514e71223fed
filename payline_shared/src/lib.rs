use payline_core::{Session, SpinRecord};
use serde::{Deserialize, Serialize};

pub mod store;

pub use store::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore, Recorded, StoreError};

/// Display-ready view of one spin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SpinReport {
    pub nonce: u64,
    pub lines: u32,
    pub bet_per_line: u64,
    pub total_bet: u64,
    pub reels: Vec<Vec<u8>>, // row-major symbol indices
    pub rendered: String,
    pub winnings: u64,
    pub winning_lines: Vec<u32>,
    pub balance: u64,
}

impl SpinReport {
    pub fn from_record(record: &SpinRecord) -> Self {
        Self {
            nonce: record.nonce,
            lines: record.wager.lines(),
            bet_per_line: record.wager.bet_per_line(),
            total_bet: record.total_bet,
            reels: record.grid.to_indices(),
            rendered: record.grid.to_string(),
            winnings: record.result.winnings,
            winning_lines: record.result.winning_lines.clone(),
            balance: record.balance_after,
        }
    }

    pub fn bet_line(&self) -> String {
        format!(
            "You are betting {} on {} line(s). Total bet is: {}",
            self.bet_per_line, self.lines, self.total_bet
        )
    }

    /// Win/loss lines shown under the grid.
    pub fn outcome_lines(&self) -> Vec<String> {
        if self.winnings == 0 {
            return vec!["You lost this round.".to_string()];
        }
        let lines: Vec<String> = self.winning_lines.iter().map(u32::to_string).collect();
        vec![
            format!("You win {}", self.winnings),
            format!("You won on line(s): {}", lines.join(" ")),
        ]
    }
}

/// End-of-session figures, including the revealed server seed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub final_balance: u64,
    pub spins: u64,
    pub total_wagered: u64,
    pub total_won: u64,
    pub client_seed: String,
    pub server_seed: String,
    pub server_seed_hash: String,
}

impl SessionSummary {
    pub fn from_session(session: &Session) -> Self {
        let stats = session.stats();
        Self {
            final_balance: session.balance(),
            spins: stats.spins,
            total_wagered: stats.total_wagered,
            total_won: stats.total_won,
            client_seed: session.client_seed().to_string(),
            server_seed: session.reveal_server_seed().to_string(),
            server_seed_hash: session.server_seed_hash(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payline_core::{Machine, Wager};

    fn record() -> SpinRecord {
        let machine = Machine::reference();
        let mut session = Session::with_seeds("s", "c", 0).with_balance(500);
        session
            .spin(&machine, Wager::new(&machine, 2, 10).unwrap())
            .unwrap()
    }

    #[test]
    fn report_mirrors_record() {
        let record = record();
        let report = SpinReport::from_record(&record);
        assert_eq!(report.total_bet, 20);
        assert_eq!(report.reels.len(), 4);
        assert_eq!(report.rendered.lines().count(), 4);
        assert_eq!(report.balance, record.balance_after);
        assert_eq!(
            report.bet_line(),
            "You are betting 10 on 2 line(s). Total bet is: 20"
        );
    }

    #[test]
    fn outcome_lines_describe_wins_and_losses() {
        let mut report = SpinReport::from_record(&record());
        report.winnings = 0;
        report.winning_lines.clear();
        assert_eq!(report.outcome_lines(), vec!["You lost this round."]);

        report.winnings = 80;
        report.winning_lines = vec![1, 2];
        assert_eq!(
            report.outcome_lines(),
            vec!["You win 80", "You won on line(s): 1 2"]
        );
    }

    #[test]
    fn report_serializes_to_json() {
        let report = SpinReport::from_record(&record());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_bet"], 20);
        assert!(json["reels"].is_array());
    }

    #[test]
    fn summary_reveals_seed_matching_hash() {
        let session = Session::with_seeds("secret", "c", 0).with_balance(10);
        let summary = SessionSummary::from_session(&session);
        assert_eq!(summary.server_seed, "secret");
        assert_eq!(
            summary.server_seed_hash,
            payline_core::derive_hash_hex(b"secret")
        );
        assert_eq!(summary.final_balance, 10);
    }
}
