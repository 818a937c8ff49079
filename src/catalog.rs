//! Snapshot and question catalog.
//!
//! The catalog is an explicit object holding the practice databases
//! directory, the display names of the snapshots, and the question lists
//! keyed by snapshot filename. It is loaded once and passed to callers;
//! nothing here is re-read per request.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DrillError, Result};

/// One practice question for a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within the snapshot's question list.
    pub id: u32,

    /// Short human-readable title.
    pub title: String,

    /// Reference solution query.
    pub solution: String,

    /// Query text shown in the editor as a starting point.
    #[serde(default)]
    pub starter_sql: Option<String>,

    /// Optional hint text.
    #[serde(default)]
    pub hint: Option<String>,
}

/// A snapshot file together with its friendly display name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SnapshotInfo {
    /// Filename within the databases directory, e.g. `db1.sqlite`.
    pub file: String,

    /// Display name; falls back to the filename when none is configured.
    pub name: String,
}

/// Catalog of practice snapshots and their questions.
#[derive(Debug, Clone)]
pub struct Catalog {
    databases_dir: PathBuf,
    display_names: HashMap<String, String>,
    questions: HashMap<String, Vec<Question>>,
}

impl Catalog {
    /// Loads the catalog from a questions JSON file.
    ///
    /// The file maps snapshot filenames to question lists. A missing
    /// questions file is a catalog error; a snapshot without an entry in it
    /// simply has no questions.
    pub fn load(
        databases_dir: impl Into<PathBuf>,
        questions_file: &Path,
        display_names: HashMap<String, String>,
    ) -> Result<Self> {
        let content = std::fs::read_to_string(questions_file).map_err(|e| {
            DrillError::catalog(format!(
                "Failed to read questions file {}: {e}",
                questions_file.display()
            ))
        })?;

        let questions: HashMap<String, Vec<Question>> =
            serde_json::from_str(&content).map_err(|e| {
                DrillError::catalog(format!(
                    "Invalid questions file {}: {e}",
                    questions_file.display()
                ))
            })?;

        Ok(Self {
            databases_dir: databases_dir.into(),
            display_names,
            questions,
        })
    }

    /// Creates an empty catalog rooted at the given databases directory.
    pub fn empty(databases_dir: impl Into<PathBuf>) -> Self {
        Self {
            databases_dir: databases_dir.into(),
            display_names: HashMap::new(),
            questions: HashMap::new(),
        }
    }

    /// Lists the available snapshots, sorted by filename.
    pub fn snapshots(&self) -> Result<Vec<SnapshotInfo>> {
        let entries = std::fs::read_dir(&self.databases_dir).map_err(|e| {
            DrillError::config(format!(
                "Cannot read databases directory {}: {e}",
                self.databases_dir.display()
            ))
        })?;

        let mut snapshots: Vec<SnapshotInfo> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|file| file.ends_with(".sqlite"))
            .map(|file| {
                let name = self
                    .display_names
                    .get(&file)
                    .cloned()
                    .unwrap_or_else(|| file.clone());
                SnapshotInfo { file, name }
            })
            .collect();

        snapshots.sort_by(|a, b| a.file.cmp(&b.file));
        Ok(snapshots)
    }

    /// Returns the questions for a snapshot (empty if none are configured).
    pub fn questions_for(&self, snapshot_file: &str) -> &[Question] {
        self.questions
            .get(snapshot_file)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Looks up one question by snapshot filename and id.
    pub fn question(&self, snapshot_file: &str, id: u32) -> Result<&Question> {
        self.questions_for(snapshot_file)
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| {
                DrillError::catalog(format!(
                    "no question with id {id} for snapshot '{snapshot_file}'"
                ))
            })
    }

    /// Resolves a snapshot filename to its on-disk path.
    ///
    /// The filename comes from the caller, so anything that would escape the
    /// databases directory is rejected.
    pub fn snapshot_path(&self, snapshot_file: &str) -> Result<PathBuf> {
        if snapshot_file.contains('/') || snapshot_file.contains('\\') || snapshot_file == ".." {
            return Err(DrillError::config(format!(
                "invalid snapshot name '{snapshot_file}'"
            )));
        }

        Ok(self.databases_dir.join(snapshot_file))
    }
}
