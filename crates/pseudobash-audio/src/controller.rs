//! Playback controller: owns at most one active stream.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pseudobash_types::config::ShellConfig;
use pseudobash_types::error::{Result, ShellError};

use crate::{AudioBackend, PlaybackHandle};

/// Display metadata for a started track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    /// File name without its directory.
    pub name: String,
    /// Author from the allow-list, or `"Unknown"`.
    pub author: String,
    pub path: PathBuf,
}

struct ActivePlayback {
    handle: Box<dyn PlaybackHandle>,
    track: TrackInfo,
}

/// Enforces "only one playing stream at a time".
///
/// Starting a new stream while one is running is refused; there is no
/// queueing and no implicit stop-and-restart. A stream that finished on its
/// own no longer counts as active and is released on the next `play`/`stop`.
pub struct PlaybackController {
    backend: Box<dyn AudioBackend>,
    extension: String,
    authors: BTreeMap<String, String>,
    active: Option<ActivePlayback>,
}

impl PlaybackController {
    /// Create a controller that accepts files ending in `extension`.
    pub fn new(
        backend: Box<dyn AudioBackend>,
        extension: impl Into<String>,
        authors: BTreeMap<String, String>,
    ) -> Self {
        Self {
            backend,
            extension: extension.into(),
            authors,
            active: None,
        }
    }

    pub fn from_config(backend: Box<dyn AudioBackend>, config: &ShellConfig) -> Self {
        Self::new(
            backend,
            config.audio_extension.clone(),
            config.audio.authors.clone(),
        )
    }

    /// The one supported extension, including the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `true` if a stream is currently running.
    pub fn is_active(&mut self) -> bool {
        self.active
            .as_mut()
            .is_some_and(|playback| playback.handle.is_running())
    }

    /// The running track, if any.
    pub fn now_playing(&mut self) -> Option<&TrackInfo> {
        if self.is_active() {
            self.active.as_ref().map(|playback| &playback.track)
        } else {
            None
        }
    }

    /// Open and start `path`.
    ///
    /// The caller has already verified the file exists. Refuses with
    /// `AlreadyPlaying` while another stream runs, and with
    /// `UnsupportedFormat` for any other extension.
    pub fn play(&mut self, path: &Path) -> Result<TrackInfo> {
        if self.is_active() {
            return Err(ShellError::AlreadyPlaying);
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        if !name.ends_with(&self.extension) {
            return Err(ShellError::UnsupportedFormat {
                name,
                expected: self.extension.clone(),
            });
        }

        self.release_finished();

        let mut handle = self.backend.open(path)?;
        handle.start()?;

        let track = TrackInfo {
            author: self.author_of(&name),
            name,
            path: path.to_path_buf(),
        };
        log::info!("Playback started: {}", track.path.display());
        self.active = Some(ActivePlayback {
            handle,
            track: track.clone(),
        });
        Ok(track)
    }

    /// Stop and release the running stream.
    pub fn stop(&mut self) -> Result<TrackInfo> {
        if !self.is_active() {
            self.release_finished();
            return Err(ShellError::NothingPlaying);
        }
        let Some(mut playback) = self.active.take() else {
            return Err(ShellError::NothingPlaying);
        };
        playback.handle.stop()?;
        log::info!("Playback stopped: {}", playback.track.path.display());
        Ok(playback.track)
    }

    /// Stop whatever is left, ignoring "nothing playing". Used on shell exit.
    pub fn shutdown(&mut self) {
        if let Some(mut playback) = self.active.take()
            && let Err(e) = playback.handle.stop()
        {
            log::warn!("Failed to stop {}: {e}", playback.track.name);
        }
    }

    fn release_finished(&mut self) {
        if let Some(mut playback) = self.active.take() {
            // Already ended on its own; stop() only frees the handle.
            if let Err(e) = playback.handle.stop() {
                log::debug!("Releasing finished track {}: {e}", playback.track.name);
            }
        }
    }

    fn author_of(&self, name: &str) -> String {
        self.authors
            .get(name)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string())
    }
}
