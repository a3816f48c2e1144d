//! Built-in commands for the pseudobash terminal.
//!
//! Registration order is the order `help` lists commands in.

use pseudobash_types::error::Result;

use crate::audio_commands::{PlayCmd, StopCmd};
use crate::file_commands::{DeleteCmd, MakeCmd, MoveCmd, ReadCmd, SafetyCmd};
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};
use crate::nav_commands::{GoCmd, LookHereCmd, WhereAmICmd};

/// Register all built-in commands into a registry.
///
/// `help` and `explain` are answered by the registry itself and already
/// occupy the first two slots.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(SecretsCmd));
    // Navigation.
    reg.register(Box::new(WhereAmICmd));
    reg.register(Box::new(GoCmd));
    reg.register(Box::new(LookHereCmd));
    reg.register(Box::new(ExitCmd));
    // File management.
    reg.register(Box::new(SafetyCmd));
    reg.register(Box::new(ReadCmd));
    reg.register(Box::new(MakeCmd));
    reg.register(Box::new(DeleteCmd));
    reg.register(Box::new(MoveCmd));
    reg.register(Box::new(PlayCmd));
    reg.register(Box::new(StopCmd));
    // User diagnostics.
    reg.register(Box::new(WhoAmICmd));
    reg.register(Box::new(WhoIsHostCmd));
    // Miscellaneous.
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(LogCmd));
    reg.register(Box::new(PrintCmd));
}

// ---------------------------------------------------------------------------
// secrets
// ---------------------------------------------------------------------------

struct SecretsCmd;
impl Command for SecretsCmd {
    fn name(&self) -> &str {
        "secrets"
    }
    fn description(&self) -> &str {
        "Prints a list of secret commands."
    }
    fn usage(&self) -> &str {
        "secrets (none)"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text("secret 1, secret 2 ...".to_string()))
    }
}

// ---------------------------------------------------------------------------
// exit
// ---------------------------------------------------------------------------

struct ExitCmd;
impl Command for ExitCmd {
    fn name(&self) -> &str {
        "exit"
    }
    fn description(&self) -> &str {
        "Closes the program."
    }
    fn usage(&self) -> &str {
        "exit (none)"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Exit)
    }
}

// ---------------------------------------------------------------------------
// whoami / whoishost
// ---------------------------------------------------------------------------

struct WhoAmICmd;
impl Command for WhoAmICmd {
    fn name(&self) -> &str {
        "whoami"
    }
    fn description(&self) -> &str {
        "Prints username."
    }
    fn usage(&self) -> &str {
        "whoami (none)"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.session.identity().user_name.clone()))
    }
}

struct WhoIsHostCmd;
impl Command for WhoIsHostCmd {
    fn name(&self) -> &str {
        "whoishost"
    }
    fn description(&self) -> &str {
        "Prints hostname."
    }
    fn usage(&self) -> &str {
        "whoishost (none)"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.session.identity().host_label.clone()))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Prints many newlines to push old output off screen."
    }
    fn usage(&self) -> &str {
        "clear (none)"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}

// ---------------------------------------------------------------------------
// log
// ---------------------------------------------------------------------------

struct LogCmd;
impl Command for LogCmd {
    fn name(&self) -> &str {
        "log"
    }
    fn description(&self) -> &str {
        "Prints an order of commands used in the session."
    }
    fn usage(&self) -> &str {
        "log (none)"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let log = env.session.log();
        if log.is_empty() {
            return Ok(CommandOutput::None);
        }
        let width = log.len().to_string().len();
        let lines: Vec<String> = log
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>width$} | {line}", i + 1))
            .collect();
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// print
// ---------------------------------------------------------------------------

struct PrintCmd;
impl Command for PrintCmd {
    fn name(&self) -> &str {
        "print"
    }
    fn description(&self) -> &str {
        "Prints the given text on the terminal."
    }
    fn usage(&self) -> &str {
        "print (text)"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(args.join(" ")))
    }
}
