//! The interactive play loop: deposit, spin until the player quits, record.

use std::io::{self, BufRead, Write};

use payline_core::{parse_bet, parse_deposit, parse_lines, Machine, Session, Wager};
use payline_shared::{HighScoreStore, Recorded, SessionSummary, SpinReport};
use tracing::{info, warn};

use crate::audio::{Cue, CuePlayer};
use crate::prompt::Prompter;

const SEPARATOR: &str = "-----------------------------------------------------------";

pub struct Game<'m, R, W, S, A> {
    machine: &'m Machine,
    session: Session,
    prompter: Prompter<R, W>,
    store: S,
    audio: A,
}

impl<'m, R, W, S, A> Game<'m, R, W, S, A>
where
    R: BufRead,
    W: Write,
    S: HighScoreStore,
    A: CuePlayer,
{
    pub fn new(machine: &'m Machine, session: Session, prompter: Prompter<R, W>, store: S, audio: A) -> Self {
        Self {
            machine,
            session,
            prompter,
            store,
            audio,
        }
    }

    /// Plays until the player quits or input ends, then records the high score.
    pub fn run(mut self) -> io::Result<SessionSummary> {
        self.prompter
            .say(format!("Server seed hash: {}", self.session.server_seed_hash()))?;
        if self.deposit()? {
            loop {
                self.prompter
                    .say(format!("Current balance: {}", self.session.balance()))?;
                let Some(answer) = self.prompter.ask("Press Enter to Spin or Q to Quit the game: ")?
                else {
                    break;
                };
                if answer.trim().eq_ignore_ascii_case("q") {
                    break;
                }
                if !self.spin()? {
                    break;
                }
            }
        }
        let summary = SessionSummary::from_session(&self.session);
        self.finish(&summary)?;
        Ok(summary)
    }

    /// `false` when input ended before a valid amount arrived.
    fn deposit(&mut self) -> io::Result<bool> {
        let amount = self
            .prompter
            .ask_until("Enter the amount you would like to add: ", parse_deposit)?;
        Ok(match amount {
            Some(amount) => {
                self.session.deposit(amount);
                info!(amount, balance = self.session.balance(), "deposit");
                true
            }
            None => false,
        })
    }

    /// Runs one spin. `false` when input ended mid-spin.
    fn spin(&mut self) -> io::Result<bool> {
        let machine = self.machine;
        if self.session.balance() < machine.min_bet() {
            self.prompter.say(format!(
                "Your balance of {} cannot cover the minimum bet of {}.",
                self.session.balance(),
                machine.min_bet()
            ))?;
            return self.deposit();
        }

        let lines_q = format!(
            "Enter the number of lines to bet on (1 - {}): ",
            machine.max_lines()
        );
        // balance >= min_bet here, so a single line is always affordable
        let lines = loop {
            let Some(lines) = self.prompter.ask_until(&lines_q, |s| parse_lines(machine, s))? else {
                return Ok(false);
            };
            let cheapest = machine.min_bet().saturating_mul(u64::from(lines));
            if cheapest <= self.session.balance() {
                break lines;
            }
            self.prompter.say(format!(
                "Betting on {lines} line(s) costs at least {cheapest}, but your balance is {}. Choose fewer lines.",
                self.session.balance()
            ))?;
        };

        let bet_q = format!(
            "Enter the amount you would like to bet on each line ({} - {}): ",
            machine.min_bet(),
            machine.max_bet()
        );
        let wager = loop {
            let Some(bet) = self.prompter.ask_until(&bet_q, |s| parse_bet(machine, s))? else {
                return Ok(false);
            };
            let wager = match Wager::new(machine, lines, bet) {
                Ok(wager) => wager,
                Err(e) => {
                    self.prompter.say(e)?;
                    continue;
                }
            };
            match self.session.check_wager(&wager) {
                Ok(_) => break wager,
                Err(e) => self.prompter.say(e)?,
            }
        };

        self.cue(Cue::Spin)?;
        let record = match self.session.spin(machine, wager) {
            Ok(record) => record,
            Err(e) => {
                self.prompter.say(e)?;
                return Ok(true);
            }
        };
        let report = SpinReport::from_record(&record);

        self.prompter.say(report.bet_line())?;
        self.prompter.print(&report.rendered)?;
        for line in report.outcome_lines() {
            self.prompter.say(line)?;
        }
        self.cue(if record.result.is_win() { Cue::Win } else { Cue::Loss })?;
        self.prompter.say(SEPARATOR)?;
        Ok(true)
    }

    fn cue(&mut self, cue: Cue) -> io::Result<()> {
        if let Err(e) = self.audio.play(cue) {
            warn!(?cue, error = %e, "sound cue failed");
            self.prompter.say(format!("Error playing {} sound: {e}", cue_name(cue)))?;
        }
        Ok(())
    }

    fn finish(&mut self, summary: &SessionSummary) -> io::Result<()> {
        self.prompter.say(format!(
            "Spins: {}  Wagered: {}  Won: {}",
            summary.spins, summary.total_wagered, summary.total_won
        ))?;
        self.prompter.say(format!(
            "Server seed (verify with payline-cli): {}",
            summary.server_seed
        ))?;
        match self.store.record(summary.final_balance) {
            Ok(Recorded::NewHigh(score)) => {
                self.prompter.say(format!("New high score: {score}"))?;
            }
            Ok(Recorded::Kept { high }) => {
                self.prompter.say(format!(
                    "Your final balance: {}. High score remains: {high}",
                    summary.final_balance
                ))?;
            }
            Err(e) => {
                warn!(error = %e, "could not record high score");
                self.prompter.say(format!("Could not save the high score: {e}"))?;
            }
        }
        self.prompter
            .say(format!("You left with {}", summary.final_balance))
    }
}

fn cue_name(cue: Cue) -> &'static str {
    match cue {
        Cue::Spin => "spin",
        Cue::Win => "win",
        Cue::Loss => "loss",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioError, Silent};
    use payline_shared::{MemoryHighScoreStore, StoreError};
    use std::path::PathBuf;

    struct Broken;

    impl CuePlayer for Broken {
        fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
            Err(AudioError::MissingFile(PathBuf::from(cue.file_name())))
        }
    }

    struct ReadOnlyStore;

    impl HighScoreStore for ReadOnlyStore {
        fn read_high_score(&self) -> Result<u64, StoreError> {
            Ok(0)
        }

        fn write_high_score(&mut self, _score: u64) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: PathBuf::from("leaderboard.txt"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    fn play<S: HighScoreStore, A: CuePlayer>(script: &str, store: S, audio: A) -> (SessionSummary, String) {
        let machine = Machine::reference();
        let mut out = Vec::new();
        let session = Session::with_seeds("server", "client", 0);
        let prompter = Prompter::new(script.as_bytes(), &mut out);
        let summary = Game::new(&machine, session, prompter, store, audio)
            .run()
            .unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn over_bet_is_reprompted_then_spun() {
        let (summary, out) = play("100\n\n4\n30\n10\nq\n", MemoryHighScoreStore::default(), Silent);
        assert!(out.contains(
            "Sorry, you don't have enough balance to bet 120. Your current balance is 100"
        ));
        assert!(out.contains("You are betting 10 on 4 line(s). Total bet is: 40"));
        assert_eq!(summary.spins, 1);
        assert_eq!(summary.total_wagered, 40);
        assert_eq!(summary.final_balance, 100 - 40 + summary.total_won);
        assert!(out.ends_with(&format!("You left with {}\n", summary.final_balance)));
    }

    #[test]
    fn invalid_input_is_reprompted() {
        let (summary, out) = play(
            "abc\n-3\n50\n\n9\n1\n5\n10\nQ\n",
            MemoryHighScoreStore::default(),
            Silent,
        );
        assert!(out.contains("Amount must be a positive number."));
        assert!(out.contains("Please enter a valid number of lines (1 - 4)."));
        assert!(out.contains("Please enter a bet amount between 10 and 10000."));
        assert_eq!(summary.spins, 1);
    }

    #[test]
    fn audio_failures_do_not_change_the_outcome() {
        let script = "500\n\n4\n20\n\n2\n10\nq\n";
        let (quiet, _) = play(script, MemoryHighScoreStore::default(), Silent);
        let (broken, out) = play(script, MemoryHighScoreStore::default(), Broken);
        assert_eq!(quiet, broken);
        assert!(out.contains("Error playing spin sound"));
    }

    #[test]
    fn store_failure_is_reported_and_ignored() {
        let (summary, out) = play("75\nq\n", ReadOnlyStore, Silent);
        assert_eq!(summary.final_balance, 75);
        assert!(out.contains("Could not save the high score"));
    }

    #[test]
    fn high_score_recorded_on_exit() {
        let mut store = MemoryHighScoreStore { score: 50 };
        let (_, out) = play("75\nq\n", &mut store, Silent);
        assert!(out.contains("New high score: 75"));
        assert_eq!(store.score, 75);

        let (_, out) = play("20\nq\n", &mut store, Silent);
        assert!(out.contains("Your final balance: 20. High score remains: 75"));
    }

    #[test]
    fn unaffordable_line_count_asks_for_fewer_lines() {
        let (summary, out) = play("15\n\n4\n1\n10\nq\n", MemoryHighScoreStore::default(), Silent);
        assert!(out.contains(
            "Betting on 4 line(s) costs at least 40, but your balance is 15. Choose fewer lines."
        ));
        assert!(!out.contains("Sorry, you don't have enough balance"));
        assert!(out.contains("You are betting 10 on 1 line(s). Total bet is: 10"));
        assert_eq!(summary.spins, 1);
        assert_eq!(summary.final_balance, 15 - 10 + summary.total_won);
    }

    #[test]
    fn end_of_input_quits_cleanly() {
        let (summary, out) = play("", MemoryHighScoreStore::default(), Silent);
        assert_eq!(summary.final_balance, 0);
        assert_eq!(summary.spins, 0);
        assert!(out.contains("You left with 0"));
    }

    #[test]
    fn low_balance_asks_for_another_deposit() {
        let (summary, out) = play("5\n\n100\nq\n", MemoryHighScoreStore::default(), Silent);
        assert!(out.contains("cannot cover the minimum bet of 10"));
        assert_eq!(summary.final_balance, 105);
    }
}
