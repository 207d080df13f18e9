//! Storage engine: durable load/save of the task collection as a single
//! JSON document with atomic replace.

use crate::store::StoreError;
use crate::types::Task;
use eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix for the scratch file written before the atomic rename.
const TMP_SUFFIX: &str = ".tmp";

/// The persisted document: the id counter plus all tasks in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    /// Monotone counter for assigning new task ids
    pub next_id: u64,

    /// Stable iteration order, insertion order by default
    pub tasks: Vec<Task>,
}

impl Default for Collection {
    fn default() -> Self {
        Self { next_id: 1, tasks: Vec::new() }
    }
}

impl Collection {
    pub fn find(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }
}

/// Accepted on-disk shapes. Legacy files are a bare array of tasks with no
/// id counter; saves always use the versioned object form.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Versioned { next_id: u64, tasks: Vec<Task> },
    Legacy(Vec<Task>),
}

/// Handle on the single data file holding the collection.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Create a storage handle for the given data file path.
    ///
    /// The path comes from explicit configuration; there is no process-wide
    /// default.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection from disk.
    ///
    /// A missing file yields an empty collection with `next_id = 1` and
    /// creates the parent directory so the first save can succeed. A file
    /// with unparseable content is a `CorruptStorage` error, never silently
    /// discarded.
    pub fn load(&self) -> Result<Collection> {
        if !self.path.exists() {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| io_error("create data directory", &e))?;
            }
            return Ok(Collection::default());
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| io_error("read data file", &e))?;

        let document: Document = serde_json::from_str(&raw).map_err(|e| {
            eyre::eyre!(StoreError::CorruptStorage(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        Ok(match document {
            Document::Versioned { next_id, tasks } => Collection { next_id, tasks },
            Document::Legacy(tasks) => {
                let max_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
                Collection { next_id: max_id + 1, tasks }
            }
        })
    }

    /// Persist the full collection atomically.
    ///
    /// Serializes to a temp file in the same directory, then renames over
    /// the target, so a crash mid-write leaves the previous document intact.
    pub fn save(&self, collection: &Collection) -> Result<()> {
        let json = serde_json::to_string_pretty(collection)
            .map_err(|e| eyre::eyre!("failed to serialize collection: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| io_error("create data directory", &e))?;
        }

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(TMP_SUFFIX);
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(|e| io_error("write temp file", &e))?;
        fs::rename(&tmp, &self.path).map_err(|e| io_error("replace data file", &e))?;

        Ok(())
    }
}

fn io_error(action: &str, e: &std::io::Error) -> eyre::Report {
    eyre::eyre!(StoreError::StorageIo(format!("{}: {}", action, e)))
}
