//! Audio subsystem: backend traits and the single-stream playback controller.
//!
//! Decoding and output are delegated to an [`AudioBackend`]. The shell only
//! needs to open a track, start it, stop it, and ask whether it is still
//! running; everything else about playback lives behind the trait.

mod controller;
mod process;
#[cfg(test)]
pub(crate) mod test_utils;

use std::path::Path;

use pseudobash_types::error::Result;

pub use controller::{PlaybackController, TrackInfo};
pub use process::ProcessBackend;

/// Audio playback backend.
pub trait AudioBackend {
    /// Prepare a track for playback. Nothing is audible until
    /// [`PlaybackHandle::start`] is called.
    fn open(&mut self, path: &Path) -> Result<Box<dyn PlaybackHandle>>;
}

/// A single opened track.
pub trait PlaybackHandle {
    /// Begin playback.
    fn start(&mut self) -> Result<()>;

    /// Stop playback and release the underlying resources.
    fn stop(&mut self) -> Result<()>;

    /// `true` while the stream is still producing audio. A track that ran to
    /// its end reports `false`.
    fn is_running(&mut self) -> bool;
}
