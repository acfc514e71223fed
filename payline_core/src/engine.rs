use serde::{Deserialize, Serialize};

use crate::{
    config::Machine,
    grid::Grid,
    paytable::Paytable,
    rng::ProvablyFairRng,
    symbols::Symbol,
};

/// Outcome of evaluating the active paylines of one grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinResult {
    pub winnings: u64,
    /// 1-based, strictly ascending.
    pub winning_lines: Vec<u32>,
}

impl SpinResult {
    pub fn is_win(&self) -> bool {
        self.winnings > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinOutcome {
    pub grid: Grid,
    pub result: SpinResult,
}

/// Fills every column with `rows` symbols drawn without replacement from the
/// full pool. Columns consume the RNG stream in order, `rows` floats each.
pub fn generate_grid(rng: &ProvablyFairRng, machine: &Machine) -> Grid {
    let rows = machine.rows();
    let floats = rng.next_floats(rows * machine.cols());
    let columns = floats
        .chunks(rows)
        .map(|uniforms| machine.pool().draw(uniforms))
        .collect();
    // A validated machine has rows <= pool size and at least one column.
    Grid::from_columns(columns).expect("validated machine yields a full grid")
}

/// Pays every active line whose symbols all match.
///
/// Lines past the grid height are ignored and money arithmetic saturates, so
/// boundary inputs never panic.
pub fn evaluate(grid: &Grid, paytable: &Paytable, active_lines: u32, bet_per_line: u64) -> SpinResult {
    let lines = (active_lines as usize).min(grid.rows());
    let mut result = SpinResult::default();
    for line in 0..lines {
        let Some(symbol) = line_symbol(&grid.row(line)) else {
            continue;
        };
        let pay = bet_per_line.saturating_mul(paytable.multiplier(symbol));
        result.winnings = result.winnings.saturating_add(pay);
        result.winning_lines.push(line as u32 + 1);
    }
    result
}

/// The symbol shared by every cell of a line, if there is one.
fn line_symbol(cells: &[Symbol]) -> Option<Symbol> {
    let (first, rest) = cells.split_first()?;
    rest.iter().all(|s| s == first).then_some(*first)
}

pub fn spin_once(
    rng: &ProvablyFairRng,
    machine: &Machine,
    active_lines: u32,
    bet_per_line: u64,
) -> SpinOutcome {
    let grid = generate_grid(rng, machine);
    let result = evaluate(&grid, machine.paytable(), active_lines, bet_per_line);
    SpinOutcome { grid, result }
}

/// Convenience: perform a spin creating the RNG from seeds.
pub fn spin_with_seeds(
    server_seed: &str,
    client_seed: &str,
    nonce: u64,
    machine: &Machine,
    active_lines: u32,
    bet_per_line: u64,
) -> SpinOutcome {
    let rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
    spin_once(&rng, machine, active_lines, bet_per_line)
}

/// Checks that row-major symbol indices match what the seeds produce.
pub fn verify_grid(
    server_seed: &str,
    client_seed: &str,
    nonce: u64,
    machine: &Machine,
    expected_indices: &[Vec<u8>],
) -> bool {
    let rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
    generate_grid(&rng, machine).to_indices() == expected_indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Symbol::*;

    #[test]
    fn test_spin_deterministic() {
        let machine = Machine::reference();
        let rng = ProvablyFairRng::new("server", "client", 1);
        let out1 = spin_once(&rng, &machine, 4, 10);
        let out2 = spin_once(&rng, &machine, 4, 10);
        assert_eq!(out1, out2);
    }

    #[test]
    fn grid_has_machine_shape() {
        let machine = Machine::reference();
        let grid = generate_grid(&ProvablyFairRng::new("a", "b", 3), &machine);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 3);
    }

    #[test]
    fn mixed_line_pays_nothing() {
        let grid = Grid::from_rows(&[vec![Pound, Dollar, Hbar]]).unwrap();
        let result = evaluate(&grid, Machine::reference().paytable(), 1, 50);
        assert_eq!(result, SpinResult::default());
        assert!(!result.is_win());
    }

    #[test]
    fn lines_outside_the_bet_are_ignored() {
        let grid = Grid::from_rows(&[
            vec![Pound, Dollar, Hbar],
            vec![Dollar, Dollar, Dollar],
        ])
        .unwrap();
        let paytable = Machine::reference().paytable().clone();
        assert_eq!(evaluate(&grid, &paytable, 1, 10).winnings, 0);
        assert_eq!(evaluate(&grid, &paytable, 2, 10).winning_lines, vec![2]);
    }

    #[test]
    fn boundary_inputs_do_not_panic() {
        let grid = Grid::from_rows(&[vec![Pound, Pound, Pound]]).unwrap();
        let paytable = Machine::reference().paytable().clone();
        assert_eq!(evaluate(&grid, &paytable, 0, 10), SpinResult::default());
        assert_eq!(evaluate(&grid, &paytable, 99, 10).winning_lines, vec![1]);
        assert_eq!(evaluate(&grid, &paytable, 1, u64::MAX).winnings, u64::MAX);
    }

    #[test]
    fn verify_accepts_only_the_real_grid() {
        let machine = Machine::reference();
        let out = spin_with_seeds("s", "c", 5, &machine, 1, 10);
        let mut indices = out.grid.to_indices();
        assert!(verify_grid("s", "c", 5, &machine, &indices));
        indices[0][0] = (indices[0][0] + 1) % 3;
        assert!(!verify_grid("s", "c", 5, &machine, &indices));
    }
}
