//! Navigation commands: whereami, go, lookhere.

use pseudobash_fs::{ResourceKind, probe};
use pseudobash_types::error::{Result, ShellError};

use crate::interpreter::{Command, CommandOutput, Environment, ItemStyle, ListingItem};

// ---------------------------------------------------------------------------
// whereami
// ---------------------------------------------------------------------------

pub(crate) struct WhereAmICmd;
impl Command for WhereAmICmd {
    fn name(&self) -> &str {
        "whereami"
    }
    fn description(&self) -> &str {
        "Prints the current working directory."
    }
    fn usage(&self) -> &str {
        "whereami (none)"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.session.cwd().display().to_string()))
    }
}

// ---------------------------------------------------------------------------
// go
// ---------------------------------------------------------------------------

pub(crate) struct GoCmd;
impl Command for GoCmd {
    fn name(&self) -> &str {
        "go"
    }
    fn description(&self) -> &str {
        "Will switch the working directory."
    }
    fn usage(&self) -> &str {
        "go (directory_name, up)"
    }
    fn arity(&self) -> usize {
        1
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let target = args[0];
        let next = if target.eq_ignore_ascii_case("up") {
            env.session.parent().ok_or(ShellError::AlreadyAtRoot)?
        } else {
            // Case-sensitive: the name is joined as typed, never matched
            // against the listing.
            let path = env.session.resolve(target);
            if !probe::is_dir(&*env.fs, &path) {
                return Err(ShellError::NoSuchDirectory(target.to_string()));
            }
            path
        };
        env.session.set_cwd(next);
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// lookhere
// ---------------------------------------------------------------------------

pub(crate) struct LookHereCmd;
impl Command for LookHereCmd {
    fn name(&self) -> &str {
        "lookhere"
    }
    fn description(&self) -> &str {
        "Will print the contents of the given directory."
    }
    fn usage(&self) -> &str {
        "lookhere (none, directory_name)"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let dir = match args.first() {
            None => env.session.cwd().to_path_buf(),
            Some(name) => {
                let path = env.session.resolve(name);
                if !probe::is_dir(&*env.fs, &path) {
                    return Err(ShellError::NoSuchDirectory(name.to_string()));
                }
                path
            },
        };
        let items = env
            .fs
            .read_dir(&dir)?
            .into_iter()
            .map(|entry| {
                let style = match entry.kind {
                    ResourceKind::Directory => ItemStyle::Directory,
                    ResourceKind::File if entry.hidden => ItemStyle::HiddenFile,
                    ResourceKind::File => ItemStyle::File,
                };
                ListingItem {
                    name: entry.name,
                    style,
                }
            })
            .collect();
        Ok(CommandOutput::Listing {
            header: None,
            items,
        })
    }
}
