//! Error types for pseudobash.

use std::io;

/// Errors produced by pseudobash command handlers and their collaborators.
///
/// Every variant except the unclassified sources at the bottom is a domain
/// refusal: the handler refused before touching any state, and the run loop
/// reports the message and carries on.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(
        "Invalid argument(s): '{command}' needs {required} argument(s) but got {supplied}. \
         Use 'explain {command}' to see the valid argument(s)."
    )]
    ArgumentCount {
        command: String,
        required: usize,
        supplied: usize,
    },

    #[error("Unknown command '{0}'.. try \"help\" to see commands.")]
    UnknownCommand(String),

    #[error("{0} cannot be found.")]
    NotFound(String),

    #[error(
        "Resource safety is currently on; cannot perform command. \
         Use \"safety toggle\" to disable safety."
    )]
    SafetyEngaged,

    #[error("You are already at the root directory.")]
    AlreadyAtRoot,

    #[error("No such directory exists: {0}")]
    NoSuchDirectory(String),

    #[error("Relocation directory unclear: {0}")]
    AmbiguousDestination(String),

    #[error("A resource named {0} already exists.")]
    AlreadyExists(String),

    #[error(
        "There is already something being played. \
         Use \"stop\" to stop playing it, then try again."
    )]
    AlreadyPlaying,

    #[error("Nothing is currently playing.")]
    NothingPlaying,

    #[error("{name} is not a {expected} file; it is unsupported.")]
    UnsupportedFormat { name: String, expected: String },

    #[error("Sorry! {0} is currently unsupported!")]
    Unsupported(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to move {0}.")]
    MoveFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("audio error: {0}")]
    Audio(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl ShellError {
    /// `true` for the recovered domain refusals, `false` for failures the
    /// run loop only knows how to report generically.
    pub fn is_refusal(&self) -> bool {
        !matches!(
            self,
            Self::Io(_) | Self::Audio(_) | Self::Config(_) | Self::TomlParse(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;
