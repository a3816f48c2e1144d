//! Command interpreter and terminal subsystem.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name. The [`Dispatcher`] reads input
//! lines, hands them to the registry, renders the result, and records every
//! non-blank line in the session log.

mod audio_commands;
mod commands;
mod dispatcher;
mod file_commands;
mod interpreter;
mod nav_commands;
mod render;
pub mod resources;
mod session;
#[cfg(test)]
pub(crate) mod test_utils;

/// Register all built-in commands into a registry.
pub use commands::register_builtins;
/// The read-dispatch-render loop.
pub use dispatcher::{Dispatcher, Flow};
pub use interpreter::{
    Command, CommandOutput, CommandRegistry, Environment, ItemStyle, ListingItem, tokenize,
};
pub use render::{Palette, Renderer};
pub use session::{Identity, Session};
