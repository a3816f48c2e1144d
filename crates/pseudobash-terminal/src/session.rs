//! Session state: identity, working directory, command log, safety gate.

use std::path::{Component, Path, PathBuf};

/// Who is at the keyboard, and what the machine calls itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_name: String,
    pub host_label: String,
}

/// All mutable state of one shell run.
///
/// The working directory is an absolute path that referred to an existing
/// directory when it was last set. Handlers only replace it after verifying
/// the new target, so a refused `go` leaves it untouched.
#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
    cwd: PathBuf,
    log: Vec<String>,
    resource_safety: bool,
}

impl Session {
    /// Start a session in `cwd` with the safety gate ON and an empty log.
    pub fn new(identity: Identity, cwd: impl Into<PathBuf>) -> Self {
        Self {
            identity,
            cwd: normalize_lexically(&cwd.into()),
            log: Vec::new(),
            resource_safety: true,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Replace the working directory. Callers verify the target first.
    pub(crate) fn set_cwd(&mut self, dir: PathBuf) {
        log::debug!("cwd: {} -> {}", self.cwd.display(), dir.display());
        self.cwd = dir;
    }

    /// Parent of the working directory, `None` at the filesystem root.
    pub fn parent(&self) -> Option<PathBuf> {
        self.cwd.parent().map(Path::to_path_buf)
    }

    /// Resolve a user-supplied path against the working directory.
    ///
    /// Absolute inputs are taken as-is. `.` and `..` are folded lexically;
    /// `..` never climbs above the root.
    pub fn resolve(&self, input: &str) -> PathBuf {
        normalize_lexically(&self.cwd.join(input))
    }

    /// Commands entered so far, oldest first.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Append a raw input line. Blank and whitespace-only lines are skipped.
    pub fn record(&mut self, line: &str) {
        if !line.trim().is_empty() {
            self.log.push(line.to_string());
        }
    }

    /// `true` while destructive resource operations are refused.
    pub fn resource_safety(&self) -> bool {
        self.resource_safety
    }

    /// Flip the safety gate and return the new state.
    pub fn toggle_safety(&mut self) -> bool {
        self.resource_safety = !self.resource_safety;
        log::info!(
            "Resource safety {}",
            if self.resource_safety { "ON" } else { "OFF" }
        );
        self.resource_safety
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                // `pop` refuses to remove the root, which is what we want.
                out.pop();
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(Component::RootDir.as_os_str());
    }
    out
}
