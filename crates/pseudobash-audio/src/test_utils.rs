//! Shared test utilities for the audio controller tests.
//!
//! [`ScriptedBackend`] records every `open` and lets tests end streams or
//! force failures.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use pseudobash_types::error::{Result, ShellError};

use crate::{AudioBackend, PlaybackHandle};

#[derive(Default)]
struct State {
    opened: Vec<PathBuf>,
    running: Vec<Rc<Cell<bool>>>,
    fail_next_open: bool,
}

#[derive(Clone, Default)]
pub struct ScriptedBackend {
    state: Rc<RefCell<State>>,
}

impl ScriptedBackend {
    pub fn opened(&self) -> Vec<PathBuf> {
        self.state.borrow().opened.clone()
    }

    pub fn running_count(&self) -> usize {
        self.state
            .borrow()
            .running
            .iter()
            .filter(|r| r.get())
            .count()
    }

    /// Make every started stream run to its end.
    pub fn finish_all(&self) {
        for flag in &self.state.borrow().running {
            flag.set(false);
        }
    }

    pub fn fail_next_open(&self) {
        self.state.borrow_mut().fail_next_open = true;
    }
}

struct ScriptedHandle {
    running: Rc<Cell<bool>>,
}

impl AudioBackend for ScriptedBackend {
    fn open(&mut self, path: &Path) -> Result<Box<dyn PlaybackHandle>> {
        let mut state = self.state.borrow_mut();
        if state.fail_next_open {
            state.fail_next_open = false;
            return Err(ShellError::Audio("device unavailable".to_string()));
        }
        state.opened.push(path.to_path_buf());
        let running = Rc::new(Cell::new(false));
        state.running.push(Rc::clone(&running));
        Ok(Box::new(ScriptedHandle { running }))
    }
}

impl PlaybackHandle for ScriptedHandle {
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
