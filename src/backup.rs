//! Timestamped snapshots of the data file.
//!
//! Backups live in a `backups/` directory next to the data file. The store
//! itself never creates backups; callers snapshot before destructive
//! operations.

use chrono::Utc;
use eyre::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

const BACKUPS_DIRNAME: &str = "backups";

fn backups_dir_for(data_path: &Path) -> Result<PathBuf> {
    let parent = data_path.parent().unwrap_or_else(|| Path::new("."));
    let dir = parent.join(BACKUPS_DIRNAME);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create backups directory {}", dir.display()))?;
    Ok(dir)
}

/// Copy the data file into the backups directory under a timestamped name.
/// `name` replaces the default "backup" base when given.
pub fn create_backup(data_path: &Path, name: Option<&str>) -> Result<PathBuf> {
    if !data_path.exists() {
        bail!("data file not found: {}", data_path.display());
    }

    let dir = backups_dir_for(data_path)?;
    let ts = Utc::now().format("%Y%m%d_%H%M%S");
    let base = name.unwrap_or("backup");
    let backup_path = dir.join(format!("{}_{}.json", base, ts));

    fs::copy(data_path, &backup_path)
        .with_context(|| format!("failed to write backup {}", backup_path.display()))?;
    Ok(backup_path)
}

/// List backup files for the data file, newest first.
pub fn list_backups(data_path: &Path) -> Result<Vec<PathBuf>> {
    let dir = backups_dir_for(data_path)?;
    let mut files: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("failed to read backups directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .collect();

    // Timestamped names sort chronologically, so name order is enough.
    files.sort();
    files.reverse();
    Ok(files)
}

/// Copy a backup over the data file. `backup` is either a path or a bare
/// file name inside the backups directory.
pub fn restore_backup(backup: &str, data_path: &Path) -> Result<PathBuf> {
    let candidate = PathBuf::from(backup);
    let src = if candidate.is_file() {
        candidate
    } else {
        let in_dir = backups_dir_for(data_path)?.join(backup);
        if !in_dir.is_file() {
            bail!("backup not found: {}", backup);
        }
        in_dir
    };

    if let Some(parent) = data_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::copy(&src, data_path)
        .with_context(|| format!("failed to restore from {}", src.display()))?;
    Ok(data_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_data(temp: &TempDir, content: &str) -> PathBuf {
        let path = temp.path().join("tasks.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_create_backup_copies_file() {
        let temp = TempDir::new().unwrap();
        let data = write_data(&temp, r#"{"next_id":1,"tasks":[]}"#);

        let backup = create_backup(&data, None).unwrap();
        assert!(backup.starts_with(temp.path().join("backups")));
        assert_eq!(fs::read_to_string(&backup).unwrap(), fs::read_to_string(&data).unwrap());
    }

    #[test]
    fn test_create_backup_missing_data_fails() {
        let temp = TempDir::new().unwrap();
        assert!(create_backup(&temp.path().join("absent.json"), None).is_err());
    }

    #[test]
    fn test_named_backup() {
        let temp = TempDir::new().unwrap();
        let data = write_data(&temp, "[]");

        let backup = create_backup(&data, Some("pre-clear")).unwrap();
        assert!(backup.file_name().unwrap().to_string_lossy().starts_with("pre-clear_"));
    }

    #[test]
    fn test_list_backups_newest_first() {
        let temp = TempDir::new().unwrap();
        let data = write_data(&temp, "[]");

        let dir = backups_dir_for(&data).unwrap();
        fs::write(dir.join("backup_20240101_000000.json"), "[]").unwrap();
        fs::write(dir.join("backup_20250101_000000.json"), "[]").unwrap();

        let backups = list_backups(&data).unwrap();
        assert_eq!(backups.len(), 2);
        assert!(
            backups[0]
                .file_name()
                .unwrap()
                .to_string_lossy()
                .contains("2025")
        );
    }

    #[test]
    fn test_restore_by_name_and_missing() {
        let temp = TempDir::new().unwrap();
        let data = write_data(&temp, r#"{"next_id":2,"tasks":[]}"#);

        let backup = create_backup(&data, None).unwrap();
        fs::write(&data, r#"{"next_id":9,"tasks":[]}"#).unwrap();

        let name = backup.file_name().unwrap().to_string_lossy().into_owned();
        restore_backup(&name, &data).unwrap();
        assert_eq!(fs::read_to_string(&data).unwrap(), r#"{"next_id":2,"tasks":[]}"#);

        assert!(restore_backup("no-such-backup.json", &data).is_err());
    }
}
