//! In-memory filesystem.
//!
//! Useful for unit tests and for exercising the shell without touching the
//! disk. The whole tree lives in a `BTreeMap<String, Node>` keyed by
//! normalized absolute paths, so the root `/` has no parent just like a real
//! filesystem root.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::{self, ErrorKind};
use std::path::Path;

use pseudobash_types::error::Result;

use crate::{DirEntry, Filesystem, ResourceKind};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
}

/// A fully in-memory filesystem.
#[derive(Debug)]
pub struct MemoryFs {
    nodes: BTreeMap<String, Node>,
}

impl MemoryFs {
    /// Create a filesystem holding only the root directory.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Dir);
        Self { nodes }
    }

    /// Create or replace a file with the given contents. The parent must
    /// already exist.
    pub fn write(&mut self, path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
        let path = normalize(path.as_ref());
        self.require_dir(parent(&path))?;
        self.nodes
            .insert(path.into_owned(), Node::File(data.to_vec()));
        Ok(())
    }

    /// Create a directory and any missing ancestors.
    pub fn mkdir_all(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = normalize(path.as_ref()).into_owned();
        let mut current = String::new();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            current.push('/');
            current.push_str(part);
            match self.nodes.get(&current) {
                Some(Node::Dir) => {},
                Some(Node::File(_)) => return Err(fail(ErrorKind::NotADirectory, &current)),
                None => {
                    self.nodes.insert(current.clone(), Node::Dir);
                },
            }
        }
        Ok(())
    }

    fn require_dir(&self, path: &str) -> Result<()> {
        match self.nodes.get(path) {
            Some(Node::Dir) => Ok(()),
            Some(Node::File(_)) => Err(fail(ErrorKind::NotADirectory, path)),
            None => Err(fail(ErrorKind::NotFound, path)),
        }
    }

    fn has_children(&self, path: &str) -> bool {
        let prefix = child_prefix(path);
        self.nodes
            .range(prefix.clone()..)
            .next()
            .is_some_and(|(k, _)| k.starts_with(&prefix))
    }
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

fn fail(kind: ErrorKind, path: &str) -> pseudobash_types::error::ShellError {
    io::Error::new(kind, format!("{kind}: {path}")).into()
}

/// Normalize a path: ensure a leading `/`, collapse `//`, drop `.` segments,
/// and strip a trailing `/` (except for root).
fn normalize(path: &Path) -> Cow<'static, str> {
    let raw = path.to_string_lossy();
    let mut parts: Vec<&str> = Vec::new();
    for component in raw.split('/') {
        match component {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", parts.join("/")))
    }
}

/// Return the parent of a normalized path.
fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(i) => &path[..i],
    }
}

fn child_prefix(path: &str) -> String {
    if path == "/" {
        "/".to_string()
    } else {
        format!("{path}/")
    }
}

impl Filesystem for MemoryFs {
    fn kind(&self, path: &Path) -> Option<ResourceKind> {
        match self.nodes.get(normalize(path).as_ref())? {
            Node::File(_) => Some(ResourceKind::File),
            Node::Dir => Some(ResourceKind::Directory),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let path = normalize(path);
        self.require_dir(&path)?;

        let prefix = child_prefix(&path);
        let mut entries = Vec::new();
        for (key, node) in self.nodes.range(prefix.clone()..) {
            if !key.starts_with(&prefix) {
                break;
            }
            // Direct children only.
            let rest = &key[prefix.len()..];
            if !rest.is_empty() && !rest.contains('/') {
                let kind = match node {
                    Node::Dir => ResourceKind::Directory,
                    Node::File(_) => ResourceKind::File,
                };
                entries.push(DirEntry::new(rest, kind));
            }
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::File(data)) => Ok(data.clone()),
            Some(Node::Dir) => Err(fail(ErrorKind::IsADirectory, &path)),
            None => Err(fail(ErrorKind::NotFound, &path)),
        }
    }

    fn create_file(&mut self, path: &Path) -> Result<()> {
        let path = normalize(path);
        if self.nodes.contains_key(path.as_ref()) {
            return Err(fail(ErrorKind::AlreadyExists, &path));
        }
        self.require_dir(parent(&path))?;
        self.nodes.insert(path.into_owned(), Node::File(Vec::new()));
        Ok(())
    }

    fn create_dir(&mut self, path: &Path) -> Result<()> {
        let path = normalize(path);
        if self.nodes.contains_key(path.as_ref()) {
            return Err(fail(ErrorKind::AlreadyExists, &path));
        }
        self.require_dir(parent(&path))?;
        self.nodes.insert(path.into_owned(), Node::Dir);
        Ok(())
    }

    fn remove_file(&mut self, path: &Path) -> Result<()> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::File(_)) => {
                self.nodes.remove(path.as_ref());
                Ok(())
            },
            Some(Node::Dir) => Err(fail(ErrorKind::IsADirectory, &path)),
            None => Err(fail(ErrorKind::NotFound, &path)),
        }
    }

    fn remove_dir(&mut self, path: &Path) -> Result<()> {
        let path = normalize(path);
        if path.as_ref() == "/" {
            return Err(fail(ErrorKind::PermissionDenied, &path));
        }
        match self.nodes.get(path.as_ref()) {
            Some(Node::Dir) => {
                if self.has_children(&path) {
                    return Err(fail(ErrorKind::DirectoryNotEmpty, &path));
                }
                self.nodes.remove(path.as_ref());
                Ok(())
            },
            Some(Node::File(_)) => Err(fail(ErrorKind::NotADirectory, &path)),
            None => Err(fail(ErrorKind::NotFound, &path)),
        }
    }

    fn rename(&mut self, from: &Path, to: &Path) -> Result<()> {
        let from = normalize(from).into_owned();
        let to = normalize(to).into_owned();
        if self.nodes.contains_key(&to) {
            return Err(fail(ErrorKind::AlreadyExists, &to));
        }
        self.require_dir(parent(&to))?;
        match self.nodes.get(&from) {
            Some(Node::File(_)) => {
                if let Some(node) = self.nodes.remove(&from) {
                    self.nodes.insert(to, node);
                }
                Ok(())
            },
            // Directory renames would need every descendant key rewritten;
            // the shell never relocates directories.
            Some(Node::Dir) => Err(fail(ErrorKind::Unsupported, &from)),
            None => Err(fail(ErrorKind::NotFound, &from)),
        }
    }
}
