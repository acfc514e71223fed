use std::path::PathBuf;

use payline_core::{ConfigError, Machine, MachineConfig};

/// Runtime settings, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub machine_path: Option<PathBuf>,
    pub leaderboard: PathBuf,
    pub sound_dir: PathBuf,
    pub sound_player: Option<String>,
    pub client_seed: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            machine_path: non_empty("PAYLINE_MACHINE").map(PathBuf::from),
            leaderboard: non_empty("PAYLINE_LEADERBOARD")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("leaderboard.txt")),
            sound_dir: non_empty("PAYLINE_SOUND_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            sound_player: non_empty("PAYLINE_SOUND_PLAYER"),
            client_seed: non_empty("PAYLINE_CLIENT_SEED"),
        }
    }

    /// Loads and validates the machine. Any error here is fatal.
    pub fn machine(&self) -> Result<Machine, ConfigError> {
        match &self.machine_path {
            Some(path) => MachineConfig::load(path)?.validate(),
            None => MachineConfig::reference().validate(),
        }
    }
}
