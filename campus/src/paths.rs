//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "campus";
const APPLICATION: &str = "campus";

/// Name of the log file written by the running process.
pub const LATEST_LOG: &str = "latest.log";

/// Maximum number of old log files to keep.
pub const MAX_OLD_LOGS: usize = 25;

/// Name format of archived logs, without the `.log` extension.
const ARCHIVE_FORMAT: &str = "%Y%m%d_%H%M%S%.3f";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/campus` or `~/.config/campus`
/// - macOS: `~/Library/Application Support/io.campus.campus`
/// - Windows: `C:\Users\<User>\AppData\Roaming\campus\campus\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Cache directory, home of the log files.
///
/// - Linux: `$XDG_CACHE_HOME/campus` or `~/.cache/campus`
/// - macOS: `~/Library/Caches/io.campus.campus`
/// - Windows: `C:\Users\<User>\AppData\Local\campus\campus\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path of `config.json`.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Path of the current log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Create (or truncate) the log file at `path`, creating its directory.
pub fn create_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    File::create(path)
}

/// Rotate logs in the platform cache directory. Call at startup, before the
/// logger opens a new `latest.log`.
pub fn rotate_logs() -> io::Result<()> {
    match cache_dir() {
        Some(cache) if cache.exists() => rotate_logs_in(&cache, MAX_OLD_LOGS),
        _ => Ok(()),
    }
}

/// Rename `latest.log` in `dir` to a timestamped name and delete the oldest
/// archived logs beyond `keep`.
pub fn rotate_logs_in(dir: &Path, keep: usize) -> io::Result<()> {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let timestamp = chrono::Local::now().format(ARCHIVE_FORMAT);
        fs::rename(&latest, dir.join(format!("{timestamp}.log")))?;
    }
    prune_logs(dir, keep)
}

/// Timestamp of an archived log, `None` for any other file.
fn archive_timestamp(name: &str) -> Option<NaiveDateTime> {
    let stem = name.strip_suffix(".log")?;
    NaiveDateTime::parse_from_str(stem, ARCHIVE_FORMAT).ok()
}

fn prune_logs(dir: &Path, keep: usize) -> io::Result<()> {
    let mut logs: Vec<(NaiveDateTime, PathBuf)> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let stamp = archive_timestamp(&entry.file_name().to_string_lossy())?;
            Some((stamp, entry.path()))
        })
        .collect();

    if logs.len() <= keep {
        return Ok(());
    }

    logs.sort();
    let excess = logs.len() - keep;
    for (_, path) in logs.into_iter().take(excess) {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_archives_latest_and_prunes_oldest() {
        let dir = tempfile::tempdir().unwrap();
        for i in 1..=4 {
            fs::write(dir.path().join(format!("2024010{i}_000000.000.log")), "old").unwrap();
        }
        fs::write(dir.path().join(LATEST_LOG), "current").unwrap();

        rotate_logs_in(dir.path(), 3).unwrap();

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names.len(), 3);
        assert!(!names.contains(&LATEST_LOG.to_string()));
        assert!(!names.contains(&"20240101_000000.000.log".to_string()));
        assert!(!names.contains(&"20240102_000000.000.log".to_string()));
    }

    #[test]
    fn rotation_without_latest_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();
        rotate_logs_in(dir.path(), MAX_OLD_LOGS).unwrap();
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn pruning_ignores_other_log_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("server.log"), "foreign").unwrap();
        fs::write(dir.path().join("00000000_000000.000.log"), "not a date").unwrap();
        for day in 1..=3 {
            fs::write(dir.path().join(format!("2024010{day}_120000.000.log")), "old").unwrap();
        }

        rotate_logs_in(dir.path(), 1).unwrap();

        assert!(dir.path().join("server.log").exists());
        assert!(dir.path().join("00000000_000000.000.log").exists());
        assert!(dir.path().join("20240103_120000.000.log").exists());
        assert!(!dir.path().join("20240101_120000.000.log").exists());
        assert!(!dir.path().join("20240102_120000.000.log").exists());
    }

    #[test]
    fn log_file_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("campus").join(LATEST_LOG);
        create_log_file(&path).unwrap();
        assert!(path.exists());

        let blocked = dir.path().join("file");
        fs::write(&blocked, "x").unwrap();
        assert!(create_log_file(&blocked.join(LATEST_LOG)).is_err());
    }
}
