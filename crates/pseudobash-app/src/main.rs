//! pseudobash interactive entry point.
//!
//! Reads commands from stdin until `exit` or end of input. The config file
//! path comes from the first CLI argument or `PSEUDOBASH_CONFIG`; without
//! either the built-in defaults apply.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use pseudobash_audio::{PlaybackController, ProcessBackend};
use pseudobash_fs::HostFs;
use pseudobash_terminal::{Dispatcher, Identity, Session};
use pseudobash_types::config::ShellConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PSEUDOBASH_CONFIG").ok())
        .map(PathBuf::from);
    let config = load_config(config_path)?;

    let identity = Identity {
        user_name: resolve_user_name(
            config.user_name.as_deref(),
            std::env::var("USER").ok(),
            std::env::var("USERNAME").ok(),
        ),
        host_label: config.host_label.clone(),
    };
    let cwd = std::env::current_dir().context("reading the current directory")?;
    let session = Session::new(identity, cwd);

    let backend = ProcessBackend::new(&config.audio.player)?;
    let player = PlaybackController::from_config(Box::new(backend), &config);

    let mut dispatcher = Dispatcher::new(session, Box::new(HostFs::new()), player, config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    dispatcher.run(&mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<ShellConfig> {
    match path {
        Some(path) => {
            let config = ShellConfig::load(&path)
                .with_context(|| format!("loading config {}", path.display()))?;
            log::info!("Using config {}", path.display());
            Ok(config)
        },
        None => Ok(ShellConfig::default()),
    }
}

/// Config override first, then the OS user variables, then `"user"`.
fn resolve_user_name(
    configured: Option<&str>,
    user: Option<String>,
    username: Option<String>,
) -> String {
    let usable = |name: &String| !name.trim().is_empty();
    configured
        .map(str::to_string)
        .filter(usable)
        .or_else(|| user.filter(usable))
        .or_else(|| username.filter(usable))
        .unwrap_or_else(|| "user".to_string())
}
