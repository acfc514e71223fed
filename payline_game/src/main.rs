mod audio;
mod play;
mod prompt;
mod settings;

use std::io;

use anyhow::Context;
use payline_core::{random_seed_hex, Session};
use payline_shared::FileHighScoreStore;
use tracing::info;

use crate::audio::{CommandPlayer, CuePlayer, Silent};
use crate::play::Game;
use crate::prompt::Prompter;
use crate::settings::Settings;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let settings = Settings::from_env();
    let machine = settings
        .machine()
        .context("invalid machine configuration")?;
    info!(
        rows = machine.rows(),
        cols = machine.cols(),
        pool = machine.pool_size(),
        "machine ready"
    );

    let client_seed = settings.client_seed.clone().unwrap_or_else(random_seed_hex);
    let session = Session::new(client_seed);
    let store = FileHighScoreStore::new(&settings.leaderboard);
    let audio: Box<dyn CuePlayer> = match &settings.sound_player {
        Some(program) => Box::new(CommandPlayer::new(program, &settings.sound_dir)),
        None => Box::new(Silent),
    };

    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    let summary = Game::new(&machine, session, prompter, store, audio).run()?;
    info!(final_balance = summary.final_balance, spins = summary.spins, "session over");
    Ok(())
}
