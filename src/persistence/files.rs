use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the rupt data directory - checks for a local .rupt first, then
/// falls back to the global ~/.rupt
pub fn get_data_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".rupt"))
}

/// Find a local .rupt directory by walking up the directory tree
fn find_local_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let data_dir = current.join(".rupt");
        if data_dir.exists() && data_dir.is_dir() {
            return Some(data_dir);
        }
        current = current.parent()?;
    }
}

/// Ensure the data directory exists
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = get_data_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .rupt directory in the current directory
pub fn init_local_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let data_dir = current_dir.join(".rupt");

    if data_dir.exists() {
        anyhow::bail!("Rupt directory already exists: {}", data_dir.display());
    }

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create directory: {}", data_dir.display()))?;

    Ok(data_dir)
}

/// Path to the task snapshot (tasks.json)
pub fn tasks_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("tasks.json"))
}

/// Path to the settings file (settings.json)
pub fn settings_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("settings.json"))
}

/// Default path for a plain-text activity log export
pub fn log_export_file(date: Option<chrono::NaiveDate>) -> Result<PathBuf> {
    let filename = match date {
        Some(date) => format!("rupt-log-{}.txt", date.format("%Y-%m-%d")),
        None => "rupt-log-full.txt".to_string(),
    };
    Ok(ensure_data_dir()?.join(filename))
}

/// Default path for a JSON task export
pub fn json_export_file(today: chrono::NaiveDate) -> Result<PathBuf> {
    let filename = format!("rupt-tasks-{}.json", today.format("%Y-%m-%d"));
    Ok(ensure_data_dir()?.join(filename))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().context("File path has no parent directory")?;

    let mut temp_file =
        NamedTempFile::new_in(dir).context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}
