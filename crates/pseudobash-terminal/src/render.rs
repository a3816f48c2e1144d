//! Text rendering of command output: colours, column grids, prompt.

use std::io::{self, Write};

use pseudobash_types::config::ShellConfig;

use crate::interpreter::{CommandOutput, ItemStyle, ListingItem};
use crate::session::Session;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const GREY: &str = "\x1b[90m";

/// ANSI colouring, or none at all when disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    pub fn prompt(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn item(&self, item: &ListingItem, cell: &str) -> String {
        match item.style {
            ItemStyle::Plain => cell.to_string(),
            ItemStyle::Directory => self.paint(CYAN, cell),
            ItemStyle::File => self.paint(MAGENTA, cell),
            ItemStyle::HiddenFile => self.paint(GREY, cell),
        }
    }
}

/// Output layout taken from the config.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    palette: Palette,
    column_width: usize,
    columns: usize,
    clear_lines: usize,
}

impl Renderer {
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            palette: Palette::new(config.color),
            column_width: config.column_width,
            columns: config.columns.max(1),
            clear_lines: config.clear_lines,
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// `{user}@{host}:~{cwd}$ `
    pub fn prompt(&self, session: &Session) -> String {
        let identity = session.identity();
        self.palette.prompt(&format!(
            "{}@{}:~{}$ ",
            identity.user_name,
            identity.host_label,
            session.cwd().display()
        ))
    }

    /// Lay out names in rows of `columns` cells, each padded to
    /// `column_width`. Colour codes wrap the padded cell so they never
    /// count toward the width.
    pub fn grid(&self, items: &[ListingItem]) -> Vec<String> {
        items
            .chunks(self.columns)
            .map(|row| {
                let mut line = String::new();
                for item in row {
                    let cell = if item.name.chars().count() < self.column_width {
                        format!("{:<width$}", item.name, width = self.column_width)
                    } else {
                        format!("{} ", item.name)
                    };
                    line.push_str(&self.palette.item(item, &cell));
                }
                line.trim_end().to_string()
            })
            .collect()
    }

    /// Write one command result. `Exit` writes nothing.
    pub fn write_output<W: Write>(&self, out: &mut W, output: &CommandOutput) -> io::Result<()> {
        match output {
            CommandOutput::Text(text) => writeln!(out, "{text}"),
            CommandOutput::Notice(text) => writeln!(out, "{}", self.palette.error(text)),
            CommandOutput::Listing { header, items } => {
                if let Some(header) = header {
                    writeln!(out, "{header}")?;
                }
                for line in self.grid(items) {
                    writeln!(out, "{line}")?;
                }
                Ok(())
            },
            CommandOutput::Clear => write!(out, "{}", "\n".repeat(self.clear_lines)),
            CommandOutput::None | CommandOutput::Exit => Ok(()),
        }
    }

    pub fn write_error<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "{}", self.palette.error(message))
    }
}
