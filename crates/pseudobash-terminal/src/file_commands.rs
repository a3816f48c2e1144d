//! File management commands: safety, read, make, delete, move.

use pseudobash_types::error::{Result, ShellError};

use crate::interpreter::{Command, CommandOutput, Environment};
use crate::resources::{Destination, ResourceOperations, parse_kind};

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

// ---------------------------------------------------------------------------
// safety
// ---------------------------------------------------------------------------

pub(crate) struct SafetyCmd;
impl Command for SafetyCmd {
    fn name(&self) -> &str {
        "safety"
    }
    fn description(&self) -> &str {
        "Disables commands that allow file changes. Ex. 'delete', 'move', etc."
    }
    fn usage(&self) -> &str {
        "safety (toggle, status)"
    }
    fn arity(&self) -> usize {
        1
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let action = args[0];
        if action.eq_ignore_ascii_case("status") {
            Ok(CommandOutput::Text(format!(
                "Resource safety is currently {}.",
                on_off(env.session.resource_safety())
            )))
        } else if action.eq_ignore_ascii_case("toggle") {
            let now = env.session.toggle_safety();
            Ok(CommandOutput::Text(format!(
                "Resource safety is now {}.",
                on_off(now)
            )))
        } else {
            Err(ShellError::InvalidArgument(format!(
                "safety takes \"status\" or \"toggle\", not \"{action}\""
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// read
// ---------------------------------------------------------------------------

pub(crate) struct ReadCmd;
impl Command for ReadCmd {
    fn name(&self) -> &str {
        "read"
    }
    fn description(&self) -> &str {
        "Prints the contents of a text file."
    }
    fn usage(&self) -> &str {
        "read (file_name)"
    }
    fn arity(&self) -> usize {
        1
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let text = ResourceOperations::from_env(env).read(args[0])?;
        if text.is_empty() {
            return Ok(CommandOutput::None);
        }
        let lines: Vec<&str> = text.lines().collect();
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// make
// ---------------------------------------------------------------------------

pub(crate) struct MakeCmd;
impl Command for MakeCmd {
    fn name(&self) -> &str {
        "make"
    }
    fn description(&self) -> &str {
        "Makes the specified resource in the working directory."
    }
    fn usage(&self) -> &str {
        "make (file, directory + resource_name)"
    }
    fn arity(&self) -> usize {
        2
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut ops = ResourceOperations::from_env(env);
        ops.check_gate()?;
        ops.make(parse_kind(args[0])?, args[1])?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

pub(crate) struct DeleteCmd;
impl Command for DeleteCmd {
    fn name(&self) -> &str {
        "delete"
    }
    fn description(&self) -> &str {
        "Deletes the specified resource in the working directory."
    }
    fn usage(&self) -> &str {
        "delete (file, directory + resource_name)"
    }
    fn arity(&self) -> usize {
        2
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut ops = ResourceOperations::from_env(env);
        ops.check_gate()?;
        ops.delete(parse_kind(args[0])?, args[1])?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// move
// ---------------------------------------------------------------------------

pub(crate) struct MoveCmd;
impl Command for MoveCmd {
    fn name(&self) -> &str {
        "move"
    }
    fn description(&self) -> &str {
        "Moves the resource to the specified directory. \
         Moving directories is currently unsupported."
    }
    fn usage(&self) -> &str {
        "move (resource_type + file_name + directory_name, up)"
    }
    fn arity(&self) -> usize {
        3
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut ops = ResourceOperations::from_env(env);
        ops.check_gate()?;
        let outcome = ops.move_resource(parse_kind(args[0])?, args[1], Destination::parse(args[2]))?;
        if outcome.overwrote {
            Ok(CommandOutput::Notice(format!(
                "The file already exists in the target directory. Overwrote {}.",
                outcome.destination.display()
            )))
        } else {
            Ok(CommandOutput::None)
        }
    }
}
