use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use directories::ProjectDirs;
use rainpage_config::APP_NAME;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding `EnvFilter` directives.
pub const LOG_ENV: &str = "RAINPAGE_LOG";

/// Log to a file in the platform data directory; the terminal belongs to
/// the UI. Returns the log path, or `None` when no file could be opened or
/// a global subscriber is already installed.
pub fn init_logging() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", APP_NAME)?;
    init_logging_in(dirs.data_local_dir())
}

fn init_logging_in(dir: &Path) -> Option<PathBuf> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    fs::create_dir_all(dir).ok()?;
    let path = dir.join(format!("{APP_NAME}.log"));
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok()?;
    Some(path)
}
