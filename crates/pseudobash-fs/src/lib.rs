//! Filesystem provider for pseudobash.
//!
//! The shell never talks to `std::fs` directly. Every resource operation goes
//! through the [`Filesystem`] trait so the same handlers run against the real
//! disk ([`HostFs`]) and against an in-memory tree ([`MemoryFs`]).
//!
//! Primitive failures are reported as [`ShellError::Io`] carrying a
//! [`std::io::ErrorKind`], identically for both implementations, so callers
//! can classify them without knowing which provider they hold.
//!
//! [`ShellError::Io`]: pseudobash_types::error::ShellError::Io

mod host;
mod memory;
pub mod probe;

use std::ffi::OsString;
use std::path::Path;

use pseudobash_types::error::Result;

pub use host::HostFs;
pub use memory::MemoryFs;

/// What a path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    File,
    Directory,
}

/// A single entry returned by [`Filesystem::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Display name. Lossy when the real name is not valid UTF-8.
    pub name: String,
    /// The name exactly as the provider stores it. Join paths with this.
    pub file_name: OsString,
    pub kind: ResourceKind,
    /// Dot-files.
    pub hidden: bool,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        let name = name.into();
        Self::from_os(OsString::from(&name), kind)
    }

    /// Build an entry from a raw name, keeping it intact for path joins.
    pub fn from_os(file_name: OsString, kind: ResourceKind) -> Self {
        let name = file_name.to_string_lossy().into_owned();
        let hidden = name.starts_with('.');
        Self {
            name,
            file_name,
            kind,
            hidden,
        }
    }
}

/// Primitive filesystem operations consumed by the shell.
pub trait Filesystem {
    /// The kind of resource at `path`, or `None` if nothing is there.
    fn kind(&self, path: &Path) -> Option<ResourceKind>;

    /// List the direct children of a directory in provider order.
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Read a whole file.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Create an empty file. Fails with `AlreadyExists` (and leaves the
    /// existing file untouched) if anything is already at `path`.
    fn create_file(&mut self, path: &Path) -> Result<()>;

    /// Create a single directory; the parent must exist.
    fn create_dir(&mut self, path: &Path) -> Result<()>;

    /// Remove a file.
    fn remove_file(&mut self, path: &Path) -> Result<()>;

    /// Remove an empty directory.
    fn remove_dir(&mut self, path: &Path) -> Result<()>;

    /// Rename `from` to `to`. The destination must not exist.
    fn rename(&mut self, from: &Path, to: &Path) -> Result<()>;
}
