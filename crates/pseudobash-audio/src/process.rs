//! Backend that hands each track to an external player process.
//!
//! The configured command line (for example `aplay -q`) is run with the
//! track path appended. The stream counts as running for as long as the
//! child process is alive.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use pseudobash_types::error::{Result, ShellError};

use crate::{AudioBackend, PlaybackHandle};

/// Spawns the configured player for every opened track.
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    program: String,
    args: Vec<String>,
}

impl ProcessBackend {
    /// `command` is the program followed by its fixed arguments.
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ShellError::Config("empty player command".to_string()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl AudioBackend for ProcessBackend {
    fn open(&mut self, path: &Path) -> Result<Box<dyn PlaybackHandle>> {
        check_wave_header(path)?;
        Ok(Box::new(ProcessHandle {
            program: self.program.clone(),
            args: self.args.clone(),
            path: path.to_path_buf(),
            child: None,
        }))
    }
}

/// Reject files that are not RIFF/WAVE before a player ever sees them.
fn check_wave_header(path: &Path) -> Result<()> {
    let mut header = [0u8; 12];
    File::open(path)?
        .read_exact(&mut header)
        .map_err(|_| ShellError::Audio(format!("{}: stream too short", path.display())))?;
    if &header[0..4] != b"RIFF" || &header[8..12] != b"WAVE" {
        return Err(ShellError::Audio(format!(
            "{}: not a RIFF/WAVE stream",
            path.display()
        )));
    }
    Ok(())
}

struct ProcessHandle {
    program: String,
    args: Vec<String>,
    path: PathBuf,
    child: Option<Child>,
}

impl PlaybackHandle for ProcessHandle {
    fn start(&mut self) -> Result<()> {
        if self.child.is_some() {
            return Ok(());
        }
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ShellError::Audio(format!("cannot start {}: {e}", self.program)))?;
        log::debug!("Spawned {} (pid {})", self.program, child.id());
        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        if child.try_wait()?.is_none() {
            child.kill()?;
        }
        child.wait()?;
        Ok(())
    }

    fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::warn!("Failed to reap player for {}: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes() -> Vec<u8> {
        let mut data = b"RIFF".to_vec();
        data.extend_from_slice(&36u32.to_le_bytes());
        data.extend_from_slice(b"WAVEfmt ");
        data
    }

    #[test]
    fn empty_command_rejected() {
        assert!(matches!(
            ProcessBackend::new(&[]).unwrap_err(),
            ShellError::Config(_)
        ));
    }

    #[test]
    fn open_accepts_wave_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        std::fs::write(&path, wav_bytes()).unwrap();
        let mut backend = ProcessBackend::new(&["true".to_string()]).unwrap();
        let mut handle = backend.open(&path).unwrap();
        assert!(!handle.is_running());
    }

    #[test]
    fn open_rejects_non_wave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.wav");
        std::fs::write(&path, b"ID3\x03 this is an mp3").unwrap();
        let mut backend = ProcessBackend::new(&["true".to_string()]).unwrap();
        let err = backend.open(&path).err().unwrap();
        assert!(matches!(err, ShellError::Audio(_)));
    }

    #[test]
    fn missing_player_is_audio_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        std::fs::write(&path, wav_bytes()).unwrap();
        let mut backend =
            ProcessBackend::new(&["pseudobash-no-such-player".to_string()]).unwrap();
        let mut handle = backend.open(&path).unwrap();
        assert!(matches!(handle.start().unwrap_err(), ShellError::Audio(_)));
        assert!(!handle.is_running());
    }

    #[cfg(unix)]
    #[test]
    fn stop_kills_long_running_player() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        std::fs::write(&path, wav_bytes()).unwrap();
        // Stand-in player that outlives the test; the path lands in $0.
        let mut backend =
            ProcessBackend::new(&["sh".to_string(), "-c".to_string(), "sleep 30".to_string()])
                .unwrap();
        let mut handle = backend.open(&path).unwrap();
        handle.start().unwrap();
        assert!(handle.is_running());
        handle.stop().unwrap();
        assert!(!handle.is_running());
    }
}
