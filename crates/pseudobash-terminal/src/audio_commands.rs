//! Audio playback commands: play, stop.

use pseudobash_fs::probe;
use pseudobash_types::error::{Result, ShellError};

use crate::interpreter::{Command, CommandOutput, Environment};

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

pub(crate) struct PlayCmd;
impl Command for PlayCmd {
    fn name(&self) -> &str {
        "play"
    }
    fn description(&self) -> &str {
        "Plays an audio file (only supports wav)."
    }
    fn usage(&self) -> &str {
        "play (file_name)"
    }
    fn arity(&self) -> usize {
        1
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let path = env.session.resolve(args[0]);
        if !probe::is_file(&*env.fs, &path) {
            return Err(ShellError::NotFound(args[0].to_string()));
        }
        let track = env.player.play(&path)?;
        Ok(CommandOutput::Text(format!(
            "Started playing \"{}\" by {}.",
            track.name, track.author
        )))
    }
}

// ---------------------------------------------------------------------------
// stop
// ---------------------------------------------------------------------------

pub(crate) struct StopCmd;
impl Command for StopCmd {
    fn name(&self) -> &str {
        "stop"
    }
    fn description(&self) -> &str {
        "Stops playing audio if there is anything playing."
    }
    fn usage(&self) -> &str {
        "stop (none)"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let track = env.player.stop()?;
        Ok(CommandOutput::Text(format!("Stopped \"{}\".", track.name)))
    }
}
