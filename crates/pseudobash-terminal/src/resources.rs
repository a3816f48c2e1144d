//! Safety-gated resource operations: create, delete, move, read.
//!
//! Every mutating operation checks the session's safety gate first and
//! refuses with `SafetyEngaged` before looking at the filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use pseudobash_fs::{Filesystem, ResourceKind, probe};
use pseudobash_types::error::{Result, ShellError};

use crate::interpreter::Environment;
use crate::session::Session;

/// Parse the `file|directory` argument of `make`, `delete`, and `move`.
/// `folder` is accepted as a synonym for `directory`.
pub fn parse_kind(arg: &str) -> Result<ResourceKind> {
    if arg.eq_ignore_ascii_case("file") {
        Ok(ResourceKind::File)
    } else if arg.eq_ignore_ascii_case("directory") || arg.eq_ignore_ascii_case("folder") {
        Ok(ResourceKind::Directory)
    } else {
        Err(ShellError::InvalidArgument(format!(
            "must enter \"file\" or \"directory\", not \"{arg}\""
        )))
    }
}

/// Where `move` should put the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination<'a> {
    /// The working directory's parent.
    Up,
    /// A child directory of the working directory.
    Child(&'a str),
}

impl<'a> Destination<'a> {
    pub fn parse(arg: &'a str) -> Self {
        if arg.eq_ignore_ascii_case("up") {
            Self::Up
        } else {
            Self::Child(arg)
        }
    }
}

/// Result of a successful file move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub destination: PathBuf,
    /// A file of the same name was deleted at the destination first.
    pub overwrote: bool,
}

/// Resource operations bound to one session and filesystem.
pub struct ResourceOperations<'a> {
    session: &'a Session,
    fs: &'a mut dyn Filesystem,
    text_extension: &'a str,
}

impl<'a> ResourceOperations<'a> {
    pub fn new(session: &'a Session, fs: &'a mut dyn Filesystem, text_extension: &'a str) -> Self {
        Self {
            session,
            fs,
            text_extension,
        }
    }

    /// Borrow the operations from a command environment.
    pub fn from_env(env: &'a mut Environment<'_>) -> Self {
        Self::new(&*env.session, &mut *env.fs, &env.config.text_extension)
    }

    /// Refuse with `SafetyEngaged` while the gate is ON.
    pub fn check_gate(&self) -> Result<()> {
        if self.session.resource_safety() {
            return Err(ShellError::SafetyEngaged);
        }
        Ok(())
    }

    fn with_text_extension(&self, name: &str) -> String {
        if name.ends_with(self.text_extension) {
            name.to_string()
        } else {
            format!("{name}{}", self.text_extension)
        }
    }

    /// Create a file (text extension appended when missing) or a directory
    /// in the working directory. Existing entries are never overwritten.
    pub fn make(&mut self, kind: ResourceKind, name: &str) -> Result<PathBuf> {
        self.check_gate()?;
        match kind {
            ResourceKind::File => {
                let name = self.with_text_extension(name);
                let path = self.session.resolve(&name);
                self.fs.create_file(&path).map_err(|e| already_exists(e, &name))?;
                Ok(path)
            },
            ResourceKind::Directory => {
                let taken = self
                    .fs
                    .read_dir(self.session.cwd())?
                    .iter()
                    .any(|entry| entry.name == name);
                if taken {
                    return Err(ShellError::AlreadyExists(name.to_string()));
                }
                let path = self.session.resolve(name);
                self.fs.create_dir(&path).map_err(|e| already_exists(e, name))?;
                Ok(path)
            },
        }
    }

    /// Delete a file, or a directory together with everything below it.
    ///
    /// Both kinds verify the target first and report `NotFound` without
    /// touching anything when it is missing or of the other kind.
    pub fn delete(&mut self, kind: ResourceKind, target: &str) -> Result<PathBuf> {
        self.check_gate()?;
        let path = self.session.resolve(target);
        if !probe::exists_as(&*self.fs, &path, kind) {
            return Err(ShellError::NotFound(target.to_string()));
        }
        match kind {
            ResourceKind::File => self.fs.remove_file(&path)?,
            ResourceKind::Directory => {
                if self.session.cwd().starts_with(&path) {
                    return Err(ShellError::InvalidArgument(format!(
                        "cannot delete {target}: it contains the working directory"
                    )));
                }
                remove_tree(&mut *self.fs, &path)?;
            },
        }
        Ok(path)
    }

    /// Move a file from the working directory into `destination`.
    ///
    /// A same-named file already at the destination is deleted first and
    /// reported through [`MoveOutcome::overwrote`].
    pub fn move_resource(
        &mut self,
        kind: ResourceKind,
        name: &str,
        destination: Destination<'_>,
    ) -> Result<MoveOutcome> {
        self.check_gate()?;
        if kind == ResourceKind::Directory {
            return Err(ShellError::Unsupported("Directory relocation".to_string()));
        }

        let source = self.session.resolve(name);
        if !probe::is_file(&*self.fs, &source) {
            return Err(ShellError::NotFound(name.to_string()));
        }

        let target_dir = match destination {
            Destination::Up => self.session.parent().ok_or(ShellError::AlreadyAtRoot)?,
            Destination::Child(dir) => {
                let path = self.session.resolve(dir);
                if !probe::is_dir(&*self.fs, &path) {
                    return Err(ShellError::AmbiguousDestination(dir.to_string()));
                }
                path
            },
        };

        let file_name = source
            .file_name()
            .ok_or_else(|| ShellError::NotFound(name.to_string()))?;
        let target = target_dir.join(file_name);
        if target == source {
            return Err(ShellError::InvalidArgument(format!(
                "{name} is already in {}",
                target_dir.display()
            )));
        }

        let overwrote = match self.fs.kind(&target) {
            Some(ResourceKind::File) => {
                log::warn!("Overwriting {} during move", target.display());
                self.fs.remove_file(&target)?;
                true
            },
            Some(ResourceKind::Directory) => {
                return Err(ShellError::MoveFailed(format!(
                    "{name}: a directory with that name exists at the destination"
                )));
            },
            None => false,
        };

        self.fs.rename(&source, &target).map_err(|e| {
            log::warn!("Move of {} failed: {e}", source.display());
            ShellError::MoveFailed(format!("{name} ({e})"))
        })?;
        Ok(MoveOutcome {
            destination: target,
            overwrote,
        })
    }

    /// Read a text file (extension appended when missing). Not gated.
    pub fn read(&self, name: &str) -> Result<String> {
        let name = self.with_text_extension(name);
        let path = self.session.resolve(&name);
        if !probe::is_file(&*self.fs, &path) {
            return Err(ShellError::NotFound(name));
        }
        let data = self.fs.read(&path)?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}

fn already_exists(err: ShellError, name: &str) -> ShellError {
    match err {
        ShellError::Io(e) if e.kind() == ErrorKind::AlreadyExists => {
            ShellError::AlreadyExists(name.to_string())
        },
        other => other,
    }
}

/// Remove `root` and everything below it, depth-first, with an explicit
/// stack instead of recursion.
///
/// Each directory is visited twice: once to delete its files and queue its
/// subdirectories, and again (after all of those are gone) to remove it.
fn remove_tree(fs: &mut dyn Filesystem, root: &Path) -> Result<()> {
    let mut stack: Vec<(PathBuf, bool)> = vec![(root.to_path_buf(), false)];
    while let Some((dir, emptied)) = stack.pop() {
        if emptied {
            fs.remove_dir(&dir)?;
            continue;
        }
        stack.push((dir.clone(), true));
        for entry in fs.read_dir(&dir)? {
            let child = dir.join(&entry.file_name);
            match entry.kind {
                ResourceKind::Directory => stack.push((child, false)),
                ResourceKind::File => fs.remove_file(&child)?,
            }
        }
    }
    Ok(())
}
