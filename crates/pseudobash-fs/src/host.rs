//! Real-disk filesystem provider backed by `std::fs`.

use std::fs::{self, OpenOptions};
use std::path::Path;

use pseudobash_types::error::Result;

use crate::{DirEntry, Filesystem, ResourceKind};

/// Filesystem provider for the host operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFs;

impl HostFs {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for HostFs {
    /// Symlinks report as files, matching [`Filesystem::read_dir`].
    fn kind(&self, path: &Path) -> Option<ResourceKind> {
        let meta = fs::symlink_metadata(path).ok()?;
        if meta.is_dir() {
            Some(ResourceKind::Directory)
        } else if meta.is_file() || meta.file_type().is_symlink() {
            Some(ResourceKind::File)
        } else {
            None
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            // Symlinks are not followed: recursive deletion must remove the
            // link, never descend into its target.
            let kind = match entry.file_type() {
                Ok(ft) if ft.is_dir() => ResourceKind::Directory,
                Ok(_) => ResourceKind::File,
                Err(e) => {
                    log::debug!("Listing {} as a file: {e}", file_name.to_string_lossy());
                    ResourceKind::File
                },
            };
            entries.push(DirEntry::from_os(file_name, kind));
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn create_file(&mut self, path: &Path) -> Result<()> {
        OpenOptions::new().write(true).create_new(true).open(path)?;
        Ok(())
    }

    fn create_dir(&mut self, path: &Path) -> Result<()> {
        Ok(fs::create_dir(path)?)
    }

    fn remove_file(&mut self, path: &Path) -> Result<()> {
        Ok(fs::remove_file(path)?)
    }

    fn remove_dir(&mut self, path: &Path) -> Result<()> {
        Ok(fs::remove_dir(path)?)
    }

    fn rename(&mut self, from: &Path, to: &Path) -> Result<()> {
        if fs::symlink_metadata(to).is_ok() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("destination exists: {}", to.display()),
            )
            .into());
        }
        Ok(fs::rename(from, to)?)
    }
}
