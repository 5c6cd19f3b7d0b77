use std::{
    env,
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::Local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DesktopLogCategory {
    Runtime,
    Startup,
    Bridge,
    Shutdown,
}

impl DesktopLogCategory {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Runtime => "runtime",
            Self::Startup => "startup",
            Self::Bridge => "bridge",
            Self::Shutdown => "shutdown",
        }
    }
}

pub(crate) fn resolve_desktop_log_path(log_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    log_dir
        .unwrap_or_else(|| env::temp_dir().join("desktop-shell"))
        .join(file_name)
}

fn format_log_line(category: DesktopLogCategory, message: &str, timestamp: &str) -> String {
    format!("[{timestamp}] [{}] {message}\n", category.as_str())
}

/// Appends one line to the desktop log, rotating the file first when it has
/// grown past `max_bytes`. Failures are reported on stderr and never returned.
pub(crate) fn append_desktop_log(
    category: DesktopLogCategory,
    message: &str,
    log_dir: Option<PathBuf>,
    file_name: &str,
    max_bytes: u64,
    backup_count: usize,
    write_lock: &Mutex<()>,
) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
    let line = format_log_line(category, message, &timestamp);

    #[cfg(debug_assertions)]
    eprint!("{line}");

    let path = resolve_desktop_log_path(log_dir, file_name);
    let _guard = match write_lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Err(error) = write_log_line(&path, &line, max_bytes, backup_count) {
        eprintln!("failed to write desktop log {}: {error}", path.display());
    }
}

fn write_log_line(
    path: &Path,
    line: &str,
    max_bytes: u64,
    backup_count: usize,
) -> Result<(), String> {
    if let Some(parent_dir) = path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }

    rotate_log_if_needed(path, max_bytes, backup_count)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log file: {error}"))?;
    file.write_all(line.as_bytes())
        .map_err(|error| format!("Failed to append log line: {error}"))
}

fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    file_name.push(format!(".{index}"));
    path.with_file_name(file_name)
}

pub(crate) fn rotate_log_if_needed(
    path: &Path,
    max_bytes: u64,
    backup_count: usize,
) -> Result<bool, String> {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(false),
        Err(error) => {
            return Err(format!(
                "Failed to stat log file {}: {}",
                path.display(),
                error
            ))
        }
    };
    if size < max_bytes {
        return Ok(false);
    }

    if backup_count == 0 {
        fs::remove_file(path)
            .map_err(|error| format!("Failed to truncate log file {}: {}", path.display(), error))?;
        return Ok(true);
    }

    let oldest = backup_path(path, backup_count);
    if oldest.exists() {
        fs::remove_file(&oldest).map_err(|error| {
            format!(
                "Failed to drop oldest log backup {}: {}",
                oldest.display(),
                error
            )
        })?;
    }
    for index in (1..backup_count).rev() {
        let from = backup_path(path, index);
        if from.exists() {
            let to = backup_path(path, index + 1);
            fs::rename(&from, &to).map_err(|error| {
                format!(
                    "Failed to shift log backup {} -> {}: {}",
                    from.display(),
                    to.display(),
                    error
                )
            })?;
        }
    }
    let first_backup = backup_path(path, 1);
    fs::rename(path, &first_backup).map_err(|error| {
        format!(
            "Failed to rotate log file {} -> {}: {}",
            path.display(),
            first_backup.display(),
            error
        )
    })?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Mutex};

    use super::*;

    #[test]
    fn format_log_line_tags_category() {
        let line = format_log_line(
            DesktopLogCategory::Startup,
            "window created",
            "2024-01-01 00:00:00.000",
        );
        assert_eq!(line, "[2024-01-01 00:00:00.000] [startup] window created\n");
    }

    #[test]
    fn append_desktop_log_creates_missing_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let log_dir = temp.path().join("nested").join("logs");
        let lock = Mutex::new(());

        append_desktop_log(
            DesktopLogCategory::Bridge,
            "channel rejected",
            Some(log_dir.clone()),
            "desktop.log",
            1024,
            2,
            &lock,
        );

        let content = fs::read_to_string(log_dir.join("desktop.log")).expect("log content");
        assert!(content.ends_with("[bridge] channel rejected\n"));
    }

    #[test]
    fn rotate_log_if_needed_keeps_small_files_in_place() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("desktop.log");
        fs::write(&path, "short").expect("write log");

        assert_eq!(rotate_log_if_needed(&path, 1024, 3), Ok(false));
        assert!(path.exists());
    }

    #[test]
    fn rotate_log_if_needed_shifts_backups_and_drops_oldest() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("desktop.log");
        fs::write(&path, "current-current").expect("write log");
        fs::write(backup_path(&path, 1), "first").expect("write backup 1");
        fs::write(backup_path(&path, 2), "second").expect("write backup 2");

        assert_eq!(rotate_log_if_needed(&path, 4, 2), Ok(true));

        assert!(!path.exists());
        assert_eq!(
            fs::read_to_string(backup_path(&path, 1)).expect("backup 1"),
            "current-current"
        );
        assert_eq!(
            fs::read_to_string(backup_path(&path, 2)).expect("backup 2"),
            "first"
        );
        assert!(!backup_path(&path, 3).exists());
    }

    #[test]
    fn rotate_log_if_needed_ignores_missing_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("absent.log");
        assert_eq!(rotate_log_if_needed(&path, 1, 1), Ok(false));
    }
}
