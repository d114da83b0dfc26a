//! Repository layer: one JSON array file per record collection
//!
//! Every collection lives in `<data_dir>/<collection>Data.json`. Appends are
//! a full read-modify-write of that file, serialized per collection by an
//! in-process mutex and committed with a temp-file + rename so a crash
//! leaves either the old or the new array on disk.

pub mod equipment;
pub mod maintenance;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::{
    fs,
    io::AsyncWriteExt,
    sync::{Mutex, OwnedMutexGuard},
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::RecordKind,
};

pub const FORM_TYPE_REQUIRED: &str = "Form type is required";

/// Map a request's collection selector to a known collection.
///
/// Only the fixed collection names are accepted so a selector can never
/// steer the file path outside the data directory.
pub fn resolve_collection(name: Option<&str>) -> AppResult<RecordKind> {
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest(FORM_TYPE_REQUIRED.to_string()))?;
    RecordKind::from_name(name)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown form type: {}", name)))
}

/// File-backed record collections
#[derive(Clone)]
pub struct Repository {
    data_dir: PathBuf,
    equipment_lock: Arc<Mutex<()>>,
    maintenance_lock: Arc<Mutex<()>>,
}

impl Repository {
    /// Create a repository rooted at `data_dir` (created lazily on first write)
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            equipment_lock: Arc::new(Mutex::new(())),
            maintenance_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Lock serializing every read and read-modify-write of `kind`
    pub fn lock_for(&self, kind: RecordKind) -> &Arc<Mutex<()>> {
        match kind {
            RecordKind::Equipment => &self.equipment_lock,
            RecordKind::Maintenance => &self.maintenance_lock,
        }
    }

    pub fn file_name(kind: RecordKind) -> String {
        format!("{}Data.json", kind.as_str())
    }

    pub fn path_for(&self, kind: RecordKind) -> PathBuf {
        self.data_dir.join(Self::file_name(kind))
    }

    /// Append one record to the end of a collection
    pub async fn append<T: Serialize>(&self, kind: RecordKind, record: &T) -> AppResult<()> {
        let value = serde_json::to_value(record)?;
        let guard = self.lock_for(kind).clone().lock_owned().await;
        self.commit(kind, value, guard).await
    }

    /// Append one record, giving up if the collection lock is not acquired
    /// within `wait`.
    ///
    /// Only the lock wait is bounded. Once the lock is held the
    /// read-modify-write runs to completion on its own task, so a caller
    /// that stops waiting never leaves a half-written file behind.
    pub async fn append_within<T: Serialize>(
        &self,
        kind: RecordKind,
        record: &T,
        wait: Duration,
    ) -> AppResult<()> {
        let value = serde_json::to_value(record)?;
        let guard = tokio::time::timeout(wait, self.lock_for(kind).clone().lock_owned())
            .await
            .map_err(|_| {
                AppError::Timeout(format!(
                    "Collection {} stayed locked for longer than {} ms",
                    kind,
                    wait.as_millis()
                ))
            })?;
        self.commit(kind, value, guard).await
    }

    async fn commit(
        &self,
        kind: RecordKind,
        value: Value,
        guard: OwnedMutexGuard<()>,
    ) -> AppResult<()> {
        let repository = self.clone();
        tokio::spawn(async move {
            let _guard = guard;
            let mut records = repository.read_snapshot(kind).await?;
            records.push(value);
            repository.write_snapshot(kind, &records).await?;

            tracing::debug!(collection = %kind, len = records.len(), "Appended record");
            Ok::<(), AppError>(())
        })
        .await
        .map_err(|e| AppError::Internal(format!("Append to {} did not finish: {}", kind, e)))?
    }

    /// Append to the collection named by a request selector
    pub async fn append_named<T: Serialize>(
        &self,
        collection: Option<&str>,
        record: &T,
    ) -> AppResult<()> {
        let kind = resolve_collection(collection)?;
        self.append(kind, record).await
    }

    /// Load a whole collection as typed records
    pub async fn load<T: DeserializeOwned>(&self, kind: RecordKind) -> AppResult<Vec<T>> {
        self.load_raw(kind)
            .await?
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value(value).map_err(|e| AppError::MalformedCollection {
                    collection: kind.to_string(),
                    reason: format!("record {}: {}", index, e),
                })
            })
            .collect()
    }

    /// Load a whole collection as stored
    pub async fn load_raw(&self, kind: RecordKind) -> AppResult<Vec<Value>> {
        let _guard = self.lock_for(kind).lock().await;
        self.read_snapshot(kind).await
    }

    /// Read the collection file without taking the collection lock.
    ///
    /// A missing or blank file is an empty collection. Anything that is not
    /// a JSON array is reported as malformed instead of being discarded.
    pub async fn read_snapshot(&self, kind: RecordKind) -> AppResult<Vec<Value>> {
        let path = self.path_for(kind);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let malformed = |reason: String| AppError::MalformedCollection {
            collection: kind.to_string(),
            reason,
        };
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(records)) => Ok(records),
            Ok(other) => Err(malformed(format!(
                "expected a JSON array, found {}",
                json_type(&other)
            ))),
            Err(e) => Err(malformed(e.to_string())),
        }
    }

    /// Replace the collection file without taking the collection lock
    pub async fn write_snapshot(&self, kind: RecordKind, records: &[Value]) -> AppResult<()> {
        fs::create_dir_all(&self.data_dir).await?;

        let path = self.path_for(kind);
        let tmp = self.data_dir.join(format!(
            ".{}.tmp.{}",
            Self::file_name(kind),
            Uuid::new_v4().simple()
        ));
        let bytes = serde_json::to_vec_pretty(records)?;

        let written = async {
            let mut file = fs::File::create(&tmp).await?;
            file.write_all(&bytes).await?;
            file.sync_all().await?;
            fs::rename(&tmp, &path).await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Move a malformed collection file aside so appends can resume.
    ///
    /// Returns the path the file was moved to. A collection that still parses
    /// is left alone.
    pub async fn quarantine(&self, kind: RecordKind) -> AppResult<PathBuf> {
        let _guard = self.lock_for(kind).lock().await;

        match self.read_snapshot(kind).await {
            Err(AppError::MalformedCollection { .. }) => {}
            Err(e) => return Err(e),
            Ok(_) => {
                return Err(AppError::BadRequest(format!(
                    "Collection {} is not malformed",
                    kind
                )))
            }
        }

        let path = self.path_for(kind);
        let target = self.data_dir.join(format!(
            "{}.corrupt-{}",
            Self::file_name(kind),
            chrono::Utc::now().format("%Y%m%dT%H%M%S%.3f")
        ));
        fs::rename(&path, &target).await?;

        tracing::warn!(
            collection = %kind,
            target = %target.display(),
            "Quarantined malformed collection file"
        );
        Ok(target)
    }

    /// Make sure the data directory exists and is a directory
    pub async fn ensure_data_dir(&self) -> AppResult<()> {
        fs::create_dir_all(&self.data_dir).await?;
        let meta = fs::metadata(&self.data_dir).await?;
        if !meta.is_dir() {
            return Err(AppError::Internal(format!(
                "{} is not a directory",
                self.data_dir.display()
            )));
        }
        Ok(())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
pub(crate) fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("maintrack-test-{}", Uuid::new_v4()))
}
