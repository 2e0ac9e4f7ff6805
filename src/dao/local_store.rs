//! File-backed fallback for the active question of each show.
//!
//! The file is a flat JSON object mapping show identifiers to question identifiers.
//! Reads always go back to disk so several workers sharing the file observe each
//! other's writes; an in-memory copy answers when the file cannot be read.

use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use dashmap::DashMap;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Persisted mapping of show identifier to active question identifier.
pub type ActiveMapping = IndexMap<String, String>;

/// Failures raised while reading or writing the fallback file.
#[derive(Debug, Error)]
pub enum LocalStoreError {
    /// The file exists but could not be read.
    #[error("failed to read local active question file `{}`", path.display())]
    Read {
        /// Location of the fallback file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The file does not contain a JSON object of strings.
    #[error("local active question file `{}` is corrupt", path.display())]
    Corrupt {
        /// Location of the fallback file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The mapping could not be encoded.
    #[error("failed to encode local active question mapping")]
    Serialize {
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The temp file could not be written or moved into place.
    #[error("failed to write local active question file `{}`", path.display())]
    Write {
        /// Location of the fallback file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Show → active question store persisted to a single JSON file.
pub struct LocalActiveStore {
    path: PathBuf,
    default_question_id: String,
    memory: DashMap<String, String>,
    write_gate: Mutex<()>,
}

impl LocalActiveStore {
    /// Create a store persisting to `path` and answering `default_question_id` for unknown shows.
    pub fn new(path: impl Into<PathBuf>, default_question_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            default_question_id: default_question_id.into(),
            memory: DashMap::new(),
            write_gate: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `question_id` as active for `show_id`.
    ///
    /// The in-memory copy is updated under the same gate as the file, after the write
    /// attempt, so both hold the last writer's value. It is updated even when persisting
    /// fails. Entries of other shows already on disk are preserved.
    pub fn put(&self, show_id: &str, question_id: &str) -> Result<(), LocalStoreError> {
        let _gate = self.write_gate.lock().unwrap_or_else(PoisonError::into_inner);
        let persisted = self.persist(show_id, question_id);
        self.memory.insert(show_id.to_owned(), question_id.to_owned());
        persisted?;

        debug!(show_id, question_id, path = %self.path.display(), "persisted local active question");
        Ok(())
    }

    /// Overlay one entry on the file's mapping and write it back. Caller holds the gate.
    fn persist(&self, show_id: &str, question_id: &str) -> Result<(), LocalStoreError> {
        let mut mapping = match self.read_persisted() {
            Ok(mapping) => mapping,
            Err(err @ LocalStoreError::Corrupt { .. }) => {
                warn!(error = %err, "discarding corrupt local active question file");
                ActiveMapping::new()
            }
            Err(err) => return Err(err),
        };
        mapping.insert(show_id.to_owned(), question_id.to_owned());
        write_atomically(&self.path, &mapping)
    }

    /// Return the active question of `show_id`, never failing.
    ///
    /// Lookup order: the file on disk, the in-memory copy, the configured default.
    pub fn get(&self, show_id: &str) -> String {
        match self.read_persisted() {
            Ok(mapping) => {
                if let Some(question_id) = mapping.get(show_id).filter(|id| !id.is_empty()) {
                    return question_id.clone();
                }
            }
            Err(err) => {
                warn!(show_id, error = %err, "local active question file unusable; using memory copy");
            }
        }

        self.memory
            .get(show_id)
            .map(|entry| entry.value().clone())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.default_question_id.clone())
    }

    /// Every known entry: the file's content overlaid with this process' in-memory writes.
    pub fn entries(&self) -> ActiveMapping {
        let mut mapping = self.read_persisted().unwrap_or_else(|err| {
            warn!(error = %err, "local active question file unusable; listing memory copy only");
            ActiveMapping::new()
        });
        for entry in self.memory.iter() {
            mapping.insert(entry.key().clone(), entry.value().clone());
        }
        mapping
    }

    /// Load the mapping stored on disk. A missing or empty file is an empty mapping.
    pub fn read_persisted(&self) -> Result<ActiveMapping, LocalStoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ActiveMapping::new()),
            Err(source) => {
                return Err(LocalStoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ActiveMapping::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| LocalStoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

/// Write `mapping` next to `path` under a unique name, then rename it over `path`.
fn write_atomically(path: &Path, mapping: &ActiveMapping) -> Result<(), LocalStoreError> {
    let write_err = |source| LocalStoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let bytes =
        serde_json::to_vec_pretty(mapping).map_err(|source| LocalStoreError::Serialize { source })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "active_questions.json".to_owned());
    let tmp_path = path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()));

    fs::write(&tmp_path, bytes).map_err(write_err)?;
    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(source));
    }
    Ok(())
}
