//! Shared test utilities for command tests.
//!
//! [`Fixture`] owns everything an [`Environment`] borrows, backed by an
//! in-memory tree and a recording audio backend:
//!
//! ```text
//! /home/ada/
//!   .profile
//!   notes.txt          "buy milk\nwater plants\n"
//!   music/
//!     gruppa-krovi.wav
//!     vabere.wav
//! ```

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use pseudobash_audio::{AudioBackend, PlaybackController, PlaybackHandle};
use pseudobash_fs::MemoryFs;
use pseudobash_types::config::ShellConfig;
use pseudobash_types::error::Result;

use crate::commands::register_builtins;
use crate::interpreter::{CommandOutput, CommandRegistry, Environment};
use crate::session::{Identity, Session};

/// Audio backend that records opened paths instead of producing sound.
#[derive(Clone, Default)]
pub struct MockAudio {
    opened: Rc<RefCell<Vec<PathBuf>>>,
    running: Rc<RefCell<Vec<Rc<Cell<bool>>>>>,
}

impl MockAudio {
    pub fn opened_count(&self) -> usize {
        self.opened.borrow().len()
    }

    pub fn running_count(&self) -> usize {
        self.running.borrow().iter().filter(|r| r.get()).count()
    }
}

struct MockHandle {
    running: Rc<Cell<bool>>,
}

impl AudioBackend for MockAudio {
    fn open(&mut self, path: &Path) -> Result<Box<dyn PlaybackHandle>> {
        self.opened.borrow_mut().push(path.to_path_buf());
        let running = Rc::new(Cell::new(false));
        self.running.borrow_mut().push(Rc::clone(&running));
        Ok(Box::new(MockHandle { running }))
    }
}

impl PlaybackHandle for MockHandle {
    fn start(&mut self) -> Result<()> {
        self.running.set(true);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.running.set(false);
        Ok(())
    }

    fn is_running(&mut self) -> bool {
        self.running.get()
    }
}

/// The sample tree shown in the module docs.
pub fn sample_fs() -> MemoryFs {
    let mut fs = MemoryFs::new();
    fs.mkdir_all("/home/ada/music").unwrap();
    fs.write("/home/ada/.profile", b"export EDITOR=vi\n").unwrap();
    fs.write("/home/ada/notes.txt", b"buy milk\nwater plants\n").unwrap();
    fs.write("/home/ada/music/gruppa-krovi.wav", b"RIFF").unwrap();
    fs.write("/home/ada/music/vabere.wav", b"RIFF").unwrap();
    fs
}

pub fn identity() -> Identity {
    Identity {
        user_name: "ada".to_string(),
        host_label: "pseudobash".to_string(),
    }
}

pub struct Fixture {
    pub session: Session,
    pub fs: MemoryFs,
    pub player: PlaybackController,
    pub audio: MockAudio,
    pub config: ShellConfig,
    pub registry: CommandRegistry,
}

impl Fixture {
    /// Sample tree, working directory `/home/ada`.
    pub fn new() -> Self {
        Self::at("/home/ada")
    }

    pub fn at(cwd: &str) -> Self {
        let config = ShellConfig::default();
        let audio = MockAudio::default();
        let player = PlaybackController::from_config(Box::new(audio.clone()), &config);
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        Self {
            session: Session::new(identity(), cwd),
            fs: sample_fs(),
            player,
            audio,
            config,
            registry,
        }
    }

    pub fn env(&mut self) -> Environment<'_> {
        Environment {
            session: &mut self.session,
            fs: &mut self.fs,
            player: &mut self.player,
            config: &self.config,
        }
    }

    /// Dispatch one line through the built-in registry.
    pub fn run(&mut self, line: &str) -> Result<CommandOutput> {
        let mut env = Environment {
            session: &mut self.session,
            fs: &mut self.fs,
            player: &mut self.player,
            config: &self.config,
        };
        self.registry.execute(line, &mut env)
    }
}
