use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use payline_core::{
    derive_hash_hex, random_seed_hex, spin_with_seeds, Machine, MachineConfig, Symbol, Wager,
};
use payline_shared::{FileHighScoreStore, HighScoreStore};
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(name = "payline-cli", about = "Operator CLI for the payline slot machine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Machine config JSON; the built-in machine when omitted
    #[arg(long, global = true, env = "PAYLINE_MACHINE")]
    machine: Option<PathBuf>,
    /// High score file
    #[arg(long, global = true, env = "PAYLINE_LEADERBOARD", default_value = "leaderboard.txt")]
    leaderboard: PathBuf,
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run seeded spins and report the return to player
    Simulate {
        #[arg(long, default_value_t = 10_000)]
        spins: u64,
        #[arg(long, default_value_t = 4)]
        lines: u32,
        #[arg(long, default_value_t = 10)]
        bet: u64,
        #[arg(long)]
        server_seed: Option<String>,
        #[arg(long, default_value = "simulation")]
        client_seed: String,
    },
    /// Replay one spin from revealed seeds
    Verify {
        #[arg(long)]
        server_seed: String,
        #[arg(long)]
        client_seed: String,
        #[arg(long)]
        nonce: u64,
        #[arg(long)]
        lines: Option<u32>,
        #[arg(long)]
        bet: Option<u64>,
    },
    /// Read or reset the high score
    HighScore {
        #[command(subcommand)]
        action: HighScoreAction,
    },
    /// Validate the machine and show its symbol table
    Machine,
}

#[derive(Subcommand)]
enum HighScoreAction {
    Show,
    Reset,
}

#[derive(Debug, Default, Serialize, PartialEq)]
struct SimulationReport {
    spins: u64,
    total_bet: u64,
    total_paid: u64,
    rtp: f64,
    hit_rate: f64,
    line_wins: BTreeMap<Symbol, u64>,
}

fn simulate(
    machine: &Machine,
    wager: Wager,
    spins: u64,
    server_seed: &str,
    client_seed: &str,
) -> anyhow::Result<SimulationReport> {
    let total_bet_per_spin = wager.total_bet()?;
    let mut report = SimulationReport {
        spins,
        ..Default::default()
    };
    let mut hits = 0u64;
    for nonce in 0..spins {
        let out = spin_with_seeds(
            server_seed,
            client_seed,
            nonce,
            machine,
            wager.lines(),
            wager.bet_per_line(),
        );
        report.total_bet = report.total_bet.saturating_add(total_bet_per_spin);
        report.total_paid = report.total_paid.saturating_add(out.result.winnings);
        if out.result.is_win() {
            hits += 1;
        }
        for line in &out.result.winning_lines {
            if let Some(symbol) = out.grid.cell(*line as usize - 1, 0) {
                *report.line_wins.entry(symbol).or_default() += 1;
            }
        }
    }
    if spins > 0 {
        report.rtp = report.total_paid as f64 / report.total_bet as f64;
        report.hit_rate = hits as f64 / spins as f64;
    }
    Ok(report)
}

#[derive(Serialize)]
struct VerifyReport {
    server_seed_hash: String,
    nonce: u64,
    reels: Vec<Vec<u8>>,
    rendered: String,
    winnings: Option<u64>,
    winning_lines: Vec<u32>,
}

#[derive(Serialize)]
struct SymbolRow {
    symbol: Symbol,
    glyph: char,
    weight: u32,
    multiplier: u64,
    line_probability: f64,
}

#[derive(Serialize)]
struct MachineReport {
    rows: usize,
    cols: usize,
    max_lines: u32,
    min_bet: u64,
    max_bet: u64,
    pool_size: usize,
    line_rtp: f64,
    symbols: Vec<SymbolRow>,
}

fn machine_report(machine: &Machine) -> MachineReport {
    MachineReport {
        rows: machine.rows(),
        cols: machine.cols(),
        max_lines: machine.max_lines(),
        min_bet: machine.min_bet(),
        max_bet: machine.max_bet(),
        pool_size: machine.pool_size(),
        line_rtp: machine.line_rtp(),
        symbols: machine
            .symbols()
            .iter()
            .map(|s| SymbolRow {
                symbol: s.symbol,
                glyph: s.symbol.glyph(),
                weight: s.weight,
                multiplier: s.multiplier,
                line_probability: machine.line_hit_probability(s.symbol),
            })
            .collect(),
    }
}

fn load_machine(path: Option<&PathBuf>) -> anyhow::Result<Machine> {
    let config = match path {
        Some(path) => MachineConfig::load(path)?,
        None => MachineConfig::reference(),
    };
    Ok(config.validate()?)
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();
    let machine = load_machine(cli.machine.as_ref()).context("invalid machine configuration")?;

    match cli.command {
        Commands::Simulate {
            spins,
            lines,
            bet,
            server_seed,
            client_seed,
        } => {
            let wager = Wager::new(&machine, lines, bet)?;
            let server_seed = server_seed.unwrap_or_else(random_seed_hex);
            info!(spins, lines, bet, "simulating");
            let report = simulate(&machine, wager, spins, &server_seed, &client_seed)?;
            if cli.json {
                print_json(&report)?;
            } else {
                println!(
                    "spins={} bet={} paid={} rtp={:.4} hit_rate={:.4}",
                    report.spins, report.total_bet, report.total_paid, report.rtp, report.hit_rate
                );
                for (symbol, wins) in &report.line_wins {
                    println!("  {symbol} line wins: {wins}");
                }
                println!("server_seed={server_seed}");
            }
        }
        Commands::Verify {
            server_seed,
            client_seed,
            nonce,
            lines,
            bet,
        } => {
            let wager = match (lines, bet) {
                (Some(lines), Some(bet)) => Some(Wager::new(&machine, lines, bet)?),
                (None, None) => None,
                _ => anyhow::bail!("--lines and --bet go together"),
            };
            let (lines, bet) = wager.map_or((0, 0), |w| (w.lines(), w.bet_per_line()));
            let out = spin_with_seeds(&server_seed, &client_seed, nonce, &machine, lines, bet);
            let report = VerifyReport {
                server_seed_hash: derive_hash_hex(server_seed.as_bytes()),
                nonce,
                reels: out.grid.to_indices(),
                rendered: out.grid.to_string(),
                winnings: wager.map(|_| out.result.winnings),
                winning_lines: out.result.winning_lines,
            };
            if cli.json {
                print_json(&report)?;
            } else {
                println!("server_seed_hash={} nonce={}", report.server_seed_hash, nonce);
                print!("{}", report.rendered);
                if let Some(winnings) = report.winnings {
                    println!("winnings={} lines={:?}", winnings, report.winning_lines);
                }
            }
        }
        Commands::HighScore { action } => {
            let mut store = FileHighScoreStore::new(&cli.leaderboard);
            match action {
                HighScoreAction::Show => {
                    let score = store.read_high_score()?;
                    if cli.json {
                        print_json(&serde_json::json!({ "high_score": score }))?;
                    } else {
                        println!("High score: {score}");
                    }
                }
                HighScoreAction::Reset => {
                    store.reset()?;
                    println!("High score reset in {}", store.path().display());
                }
            }
        }
        Commands::Machine => {
            let report = machine_report(&machine);
            if cli.json {
                print_json(&report)?;
            } else {
                println!(
                    "{}x{} grid, {} line(s), bets {}-{}, pool of {}, line rtp {:.4}",
                    report.cols,
                    report.rows,
                    report.max_lines,
                    report.min_bet,
                    report.max_bet,
                    report.pool_size,
                    report.line_rtp
                );
                for s in &report.symbols {
                    println!(
                        "  {} weight={} x{} p(line)={:.5}",
                        s.glyph, s.weight, s.multiplier, s.line_probability
                    );
                }
            }
        }
    }

    Ok(())
}
