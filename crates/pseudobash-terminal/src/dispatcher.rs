//! The read-dispatch-render loop.

use std::io::{self, BufRead, Write};

use pseudobash_audio::PlaybackController;
use pseudobash_fs::{Filesystem, probe};
use pseudobash_types::config::ShellConfig;
use pseudobash_types::error::{Result, ShellError};

use crate::commands::register_builtins;
use crate::interpreter::{CommandOutput, CommandRegistry, Environment};
use crate::render::Renderer;
use crate::session::Session;

/// Whether the loop keeps going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Owns every piece of shell state and drives one session.
pub struct Dispatcher {
    registry: CommandRegistry,
    session: Session,
    fs: Box<dyn Filesystem>,
    player: PlaybackController,
    config: ShellConfig,
    renderer: Renderer,
}

impl Dispatcher {
    /// Wire up a dispatcher with the built-in commands.
    ///
    /// The session's working directory must exist as a directory in `fs`.
    pub fn new(
        session: Session,
        fs: Box<dyn Filesystem>,
        player: PlaybackController,
        config: ShellConfig,
    ) -> Result<Self> {
        if !probe::is_dir(fs.as_ref(), session.cwd()) {
            return Err(ShellError::NoSuchDirectory(
                session.cwd().display().to_string(),
            ));
        }
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        let renderer = Renderer::from_config(&config);
        Ok(Self {
            registry,
            session,
            fs,
            player,
            config,
            renderer,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until `exit` or end of input. Playback is stopped on the way out.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> io::Result<()> {
        log::info!(
            "Session started for {} in {}",
            self.session.identity().user_name,
            self.session.cwd().display()
        );
        let result = self.run_inner(input, out);
        self.player.shutdown();
        log::info!("Session ended after {} command(s)", self.session.log().len());
        result
    }

    fn run_inner<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            write!(out, "{}", self.renderer.prompt(&self.session))?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                // EOF behaves like `exit`; finish the prompt line.
                writeln!(out)?;
                return Ok(());
            }
            // Invalid UTF-8 is replaced, never fatal.
            let line = String::from_utf8_lossy(&buf);
            let trimmed = line.trim_end_matches(['\n', '\r']);
            if self.step(trimmed, out)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Execute one input line and render its outcome.
    ///
    /// Every non-blank line is logged, whatever the outcome.
    pub fn step<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let mut env = Environment {
            session: &mut self.session,
            fs: self.fs.as_mut(),
            player: &mut self.player,
            config: &self.config,
        };
        let result = self.registry.execute(line, &mut env);

        let flow = match result {
            Ok(CommandOutput::Exit) => Flow::Exit,
            Ok(output) => {
                self.renderer.write_output(out, &output)?;
                Flow::Continue
            },
            Err(e) if e.is_refusal() => {
                self.renderer.write_error(out, &e.to_string())?;
                Flow::Continue
            },
            Err(e) => {
                log::warn!("{line:?} failed: {e}");
                self.renderer
                    .write_error(out, &format!("Error occurred: {e}"))?;
                Flow::Continue
            },
        };
        self.session.record(line);
        Ok(flow)
    }
}
