//! Command trait, registry, and dispatch logic.
//!
//! Input is split on whitespace with no quoting: a space inside an argument
//! is always a token boundary. Only the command name is case-folded.

use std::collections::HashMap;

use pseudobash_audio::PlaybackController;
use pseudobash_fs::Filesystem;
use pseudobash_types::config::ShellConfig;
use pseudobash_types::error::{Result, ShellError};

use crate::session::Session;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// A non-fatal warning shown in the error colour (e.g. overwrite notices).
    Notice(String),
    /// Names laid out in fixed-width columns.
    Listing {
        /// Printed on its own line above the grid.
        header: Option<String>,
        items: Vec<ListingItem>,
    },
    /// Command produced no visible output.
    None,
    /// Signal to scroll the terminal clear.
    Clear,
    /// Signal to leave the run loop.
    Exit,
}

/// One cell of a [`CommandOutput::Listing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    pub name: String,
    pub style: ItemStyle,
}

/// How a listing cell is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStyle {
    Plain,
    Directory,
    File,
    HiddenFile,
}

/// Shared mutable environment passed to every command.
pub struct Environment<'a> {
    pub session: &'a mut Session,
    pub fs: &'a mut dyn Filesystem,
    pub player: &'a mut PlaybackController,
    pub config: &'a ShellConfig,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `explain`.
    fn description(&self) -> &str;

    /// Usage string, e.g. "go (directory_name, up)".
    fn usage(&self) -> &str;

    /// Minimum number of arguments. The registry refuses with
    /// `ArgumentCount` before `execute` is reached if fewer are supplied.
    fn arity(&self) -> usize {
        0
    }

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Help metadata for one registered name.
#[derive(Debug, Clone)]
struct HelpEntry {
    name: String,
    usage: String,
    description: String,
}

impl HelpEntry {
    fn line(&self) -> String {
        format!("[ {} | {} ]", self.usage, self.description)
    }
}

/// `help` and `explain` need the registry itself, so the registry answers
/// them directly. They still hold the first two slots of the help order.
const INTERCEPTED: &[(&str, &str, &str)] = &[
    ("help", "help (none)", "Prints all available commands."),
    (
        "explain",
        "explain (command_name, all)",
        "Explains the given command.",
    ),
];

const HELP_HINT: &str = "* use 'explain (command_name)' to get a description of the command *";
const EXPLAIN_MISSING: &str = "The command you want explained does not exist.";

/// Registry of available commands with dispatch.
///
/// Registration order is the order `help` and `explain all` print in.
pub struct CommandRegistry {
    order: Vec<HelpEntry>,
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry holding only `help` and `explain`.
    pub fn new() -> Self {
        let order = INTERCEPTED
            .iter()
            .map(|(name, usage, description)| HelpEntry {
                name: name.to_string(),
                usage: usage.to_string(),
                description: description.to_string(),
            })
            .collect();
        Self {
            order,
            commands: HashMap::new(),
        }
    }

    /// Register a command. Replacing an existing name keeps its position.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let entry = HelpEntry {
            name: cmd.name().to_string(),
            usage: cmd.usage().to_string(),
            description: cmd.description().to_string(),
        };
        match self.order.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.order.push(entry),
        }
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Every valid command name, in registration order.
    pub fn list_commands(&self) -> Vec<&str> {
        self.order.iter().map(|e| e.name.as_str()).collect()
    }

    /// The one-line help string for `name`.
    pub fn help_line(&self, name: &str) -> Option<String> {
        self.order
            .iter()
            .find(|e| e.name == name)
            .map(HelpEntry::line)
    }

    /// Tokenize and execute one input line.
    ///
    /// Blank lines are a no-op. Unknown names and missing arguments come back
    /// as `UnknownCommand` / `ArgumentCount`.
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let tokens = tokenize(line);
        let Some((first, args)) = tokens.split_first() else {
            return Ok(CommandOutput::None);
        };
        let name = first.to_lowercase();
        log::debug!("dispatch {name} with {} argument(s)", args.len());

        match name.as_str() {
            "help" => return Ok(self.execute_help()),
            "explain" => return self.execute_explain(args),
            _ => {},
        }

        let cmd = self
            .commands
            .get(name.as_str())
            .ok_or_else(|| ShellError::UnknownCommand(first.to_string()))?;
        if args.len() < cmd.arity() {
            return Err(ShellError::ArgumentCount {
                command: name,
                required: cmd.arity(),
                supplied: args.len(),
            });
        }
        cmd.execute(args, env)
    }

    fn execute_help(&self) -> CommandOutput {
        let items = self
            .order
            .iter()
            .map(|e| ListingItem {
                name: e.name.clone(),
                style: ItemStyle::Plain,
            })
            .collect();
        CommandOutput::Listing {
            header: Some(HELP_HINT.to_string()),
            items,
        }
    }

    fn execute_explain(&self, args: &[&str]) -> Result<CommandOutput> {
        let Some(target) = args.first() else {
            return Err(ShellError::ArgumentCount {
                command: "explain".to_string(),
                required: 1,
                supplied: 0,
            });
        };
        let target = target.to_lowercase();
        if target == "all" {
            let lines: Vec<String> = self.order.iter().map(HelpEntry::line).collect();
            return Ok(CommandOutput::Text(lines.join("\n")));
        }
        Ok(CommandOutput::Text(
            self.help_line(&target)
                .unwrap_or_else(|| EXPLAIN_MISSING.to_string()),
        ))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Split an input line into tokens. No quoting, no escapes.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Fixture;

    struct EchoCmd;
    impl Command for EchoCmd {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Print arguments"
        }
        fn usage(&self) -> &str {
            "echo (text)"
        }
        fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
            Ok(CommandOutput::Text(args.join(" ")))
        }
    }

    struct PairCmd;
    impl Command for PairCmd {
        fn name(&self) -> &str {
            "pair"
        }
        fn description(&self) -> &str {
            "Needs two"
        }
        fn usage(&self) -> &str {
            "pair (a, b)"
        }
        fn arity(&self) -> usize {
            2
        }
        fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
            Ok(CommandOutput::Text(format!("{}+{}", args[0], args[1])))
        }
    }

    fn registry() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(EchoCmd));
        reg.register(Box::new(PairCmd));
        reg
    }

    #[test]
    fn register_and_execute() {
        let reg = registry();
        let mut fx = Fixture::new();
        match reg.execute("echo hello world", &mut fx.env()).unwrap() {
            CommandOutput::Text(s) => assert_eq!(s, "hello world"),
            other => panic!("expected text output, got {other:?}"),
        }
    }

    #[test]
    fn empty_and_whitespace_input_is_noop() {
        let reg = registry();
        let mut fx = Fixture::new();
        assert_eq!(reg.execute("", &mut fx.env()).unwrap(), CommandOutput::None);
        assert_eq!(
            reg.execute("   \t  ", &mut fx.env()).unwrap(),
            CommandOutput::None
        );
    }

    #[test]
    fn unknown_command_keeps_typed_name() {
        let reg = registry();
        let mut fx = Fixture::new();
        match reg.execute("FooBar baz", &mut fx.env()) {
            Err(ShellError::UnknownCommand(name)) => assert_eq!(name, "FooBar"),
            other => panic!("expected UnknownCommand, got {other:?}"),
        }
    }

    #[test]
    fn command_name_case_insensitive_args_untouched() {
        let reg = registry();
        let mut fx = Fixture::new();
        match reg.execute("ECHO MiXeD", &mut fx.env()).unwrap() {
            CommandOutput::Text(s) => assert_eq!(s, "MiXeD"),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn too_few_arguments_is_typed_error() {
        let reg = registry();
        let mut fx = Fixture::new();
        match reg.execute("pair only", &mut fx.env()) {
            Err(ShellError::ArgumentCount {
                command,
                required,
                supplied,
            }) => {
                assert_eq!(command, "pair");
                assert_eq!(required, 2);
                assert_eq!(supplied, 1);
            },
            other => panic!("expected ArgumentCount, got {other:?}"),
        }
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let reg = registry();
        let mut fx = Fixture::new();
        match reg.execute("pair a b c", &mut fx.env()).unwrap() {
            CommandOutput::Text(s) => assert_eq!(s, "a+b"),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn help_lists_in_registration_order() {
        let reg = registry();
        let mut fx = Fixture::new();
        match reg.execute("help", &mut fx.env()).unwrap() {
            CommandOutput::Listing { header, items } => {
                assert_eq!(header.as_deref(), Some(HELP_HINT));
                let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
                assert_eq!(names, vec!["help", "explain", "echo", "pair"]);
            },
            other => panic!("expected listing, got {other:?}"),
        }
    }

    #[test]
    fn register_replaces_in_place() {
        struct LoudEcho;
        impl Command for LoudEcho {
            fn name(&self) -> &str {
                "echo"
            }
            fn description(&self) -> &str {
                "Shout arguments"
            }
            fn usage(&self) -> &str {
                "echo (text)"
            }
            fn execute(&self, args: &[&str], _: &mut Environment<'_>) -> Result<CommandOutput> {
                Ok(CommandOutput::Text(args.join(" ").to_uppercase()))
            }
        }
        let mut reg = registry();
        reg.register(Box::new(LoudEcho));
        assert_eq!(reg.list_commands(), vec!["help", "explain", "echo", "pair"]);
        let mut fx = Fixture::new();
        assert_eq!(
            reg.execute("echo hi", &mut fx.env()).unwrap(),
            CommandOutput::Text("HI".to_string())
        );
    }

    #[test]
    fn explain_known_unknown_and_all() {
        let reg = registry();
        let mut fx = Fixture::new();
        assert_eq!(
            reg.execute("explain pair", &mut fx.env()).unwrap(),
            CommandOutput::Text("[ pair (a, b) | Needs two ]".to_string())
        );
        assert_eq!(
            reg.execute("explain nope", &mut fx.env()).unwrap(),
            CommandOutput::Text(EXPLAIN_MISSING.to_string())
        );
        match reg.execute("explain all", &mut fx.env()).unwrap() {
            CommandOutput::Text(s) => {
                let lines: Vec<&str> = s.lines().collect();
                assert_eq!(lines.len(), 4);
                assert!(lines[0].starts_with("[ help"));
                assert!(lines[3].starts_with("[ pair"));
            },
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn explain_without_target() {
        let reg = registry();
        let mut fx = Fixture::new();
        assert!(matches!(
            reg.execute("explain", &mut fx.env()),
            Err(ShellError::ArgumentCount { required: 1, .. })
        ));
    }

    #[test]
    fn tokenize_collapses_runs_of_whitespace() {
        assert_eq!(tokenize("  go   my\tdir "), vec!["go", "my", "dir"]);
        assert!(tokenize("").is_empty());
    }

    proptest::proptest! {
        #[test]
        fn tokens_never_contain_whitespace(line in "[ a-zA-Z0-9\t]{0,40}") {
            for token in tokenize(&line) {
                proptest::prop_assert!(!token.is_empty());
                proptest::prop_assert!(!token.chars().any(char::is_whitespace));
            }
        }
    }
}
