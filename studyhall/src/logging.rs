use log::LevelFilter;
use std::path::PathBuf;

const APP_NAME: &str = "studyhall";
const LOG_FILE_NAME: &str = "studyhall.log";

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// Log level from `STUDYHALL_LOG` (e.g. `debug`, `trace`); falls back to
/// the default on absence or an unparseable value.
pub fn log_level() -> LevelFilter {
    std::env::var("STUDYHALL_LOG")
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

/// Where the rolling log files land. `STUDYHALL_LOG_FILE` overrides the
/// platform cache directory.
pub fn log_file() -> PathBuf {
    if let Ok(path) = std::env::var("STUDYHALL_LOG_FILE")
        && !path.is_empty()
    {
        return PathBuf::from(path);
    }
    cache_dir().join(LOG_FILE_NAME)
}

fn cache_dir() -> PathBuf {
    #[cfg(unix)]
    {
        if let Ok(xdg_cache_home) = std::env::var("XDG_CACHE_HOME")
            && !xdg_cache_home.is_empty()
        {
            return PathBuf::from(xdg_cache_home).join(APP_NAME);
        }
    }
    match dirs::cache_dir() {
        Some(cache) => cache.join(APP_NAME),
        None => std::env::temp_dir().join(APP_NAME),
    }
}

pub fn setup_logging(level: LevelFilter) -> anyhow::Result<()> {
    let log_file = log_file();
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    simple_log::file(log_file.to_string_lossy().into_owned(), level, 10, 10)
        .map_err(|e| anyhow::anyhow!(e))?;
    log::info!("logging to {} at {level}", log_file.display());
    Ok(())
}
