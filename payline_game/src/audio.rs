//! Sound cues. Playback is best effort: callers log failures and carry on.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Spin,
    Win,
    Loss,
}

impl Cue {
    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Spin => "spin_sound.mp3",
            Cue::Win => "win_sound.mp3",
            Cue::Loss => "loss_sound.mp3",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("sound file {0} not found")]
    MissingFile(PathBuf),
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub trait CuePlayer {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
}

impl<P: CuePlayer + ?Sized> CuePlayer for Box<P> {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        (**self).play(cue)
    }
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Hands each cue file to an external player (`aplay`, `afplay`, `mpg123`...)
/// without waiting for it to finish.
#[derive(Debug)]
pub struct CommandPlayer {
    program: String,
    sound_dir: PathBuf,
    running: Vec<Child>,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>, sound_dir: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            sound_dir: sound_dir.as_ref().to_path_buf(),
            running: Vec::new(),
        }
    }

    fn reap(&mut self) {
        self.running
            .retain_mut(|child| matches!(child.try_wait(), Ok(None)));
    }
}

impl CuePlayer for CommandPlayer {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        self.reap();
        let path = self.sound_dir.join(cue.file_name());
        if !path.is_file() {
            return Err(AudioError::MissingFile(path));
        }
        let child = Command::new(&self.program)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AudioError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        debug!(?cue, pid = child.id(), "cue started");
        self.running.push(child);
        Ok(())
    }
}
