//! Offline doctor directory persisted as a JSON file.
//!
//! Every CLI invocation is its own process, so `--offline` keeps the
//! directory on disk: the file is read once on open and rewritten after
//! each successful create, update or delete. Writes go to a sibling
//! `.tmp` file first and are then renamed over the store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::memory::InMemoryDoctorDirectory;
use crate::domain::ports::{DoctorDirectory, DoctorDirectoryError};
use crate::domain::{DoctorDraft, DoctorId, DoctorRecord};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    #[serde(default)]
    last_id: u64,
    #[serde(default)]
    doctors: Vec<StoredDoctor>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDoctor {
    id: String,
    doctor_name: String,
    contact: String,
    address: String,
    timing: String,
    available_days: String,
}

impl From<&DoctorRecord> for StoredDoctor {
    fn from(record: &DoctorRecord) -> Self {
        let details = record.details();
        Self {
            id: record.id().as_ref().to_owned(),
            doctor_name: details.doctor_name.clone(),
            contact: details.contact.clone(),
            address: details.address.clone(),
            timing: details.timing.clone(),
            available_days: details.available_days.clone(),
        }
    }
}

impl StoredDoctor {
    fn into_domain(self) -> Result<DoctorRecord, DoctorDirectoryError> {
        let id = DoctorId::new(&self.id)
            .map_err(|err| DoctorDirectoryError::decode(format!("stored doctor id: {err}")))?;
        Ok(DoctorRecord::new(
            id,
            DoctorDraft {
                doctor_name: self.doctor_name,
                contact: self.contact,
                address: self.address,
                timing: self.timing,
                available_days: self.available_days,
            },
        ))
    }
}

fn io_failure(path: &Path, error: &std::io::Error) -> DoctorDirectoryError {
    DoctorDirectoryError::transport(format!("{}: {error}", path.display()))
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|dir| !dir.as_os_str().is_empty())
}

/// Doctor directory kept in a local JSON file between runs.
#[derive(Debug)]
pub struct JsonFileDoctorDirectory {
    path: PathBuf,
    records: InMemoryDoctorDirectory,
}

impl JsonFileDoctorDirectory {
    /// Load the store at `path`; a missing file is an empty directory.
    ///
    /// # Errors
    ///
    /// Returns [`DoctorDirectoryError::Transport`] when the file cannot be
    /// read and [`DoctorDirectoryError::Decode`] when it is not a store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DoctorDirectoryError> {
        let path = path.into();
        let stored = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<StoreFile>(&bytes).map_err(|err| {
                DoctorDirectoryError::decode(format!("{}: {err}", path.display()))
            })?,
            Err(error) if error.kind() == ErrorKind::NotFound => StoreFile::default(),
            Err(error) => return Err(io_failure(&path, &error)),
        };
        let records = stored
            .doctors
            .into_iter()
            .map(StoredDoctor::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(path = %path.display(), doctors = records.len(), "offline store loaded");
        Ok(Self {
            records: InMemoryDoctorDirectory::restore(stored.last_id, records),
            path,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self) -> Result<(), DoctorDirectoryError> {
        let (last_id, records) = self.records.snapshot()?;
        let file = StoreFile {
            last_id,
            doctors: records.iter().map(StoredDoctor::from).collect(),
        };
        let bytes = serde_json::to_vec_pretty(&file)
            .map_err(|err| DoctorDirectoryError::decode(err.to_string()))?;

        if let Some(parent) = non_empty_parent(&self.path) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| io_failure(parent, &err))?;
        }
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, bytes)
            .await
            .map_err(|err| io_failure(&staging, &err))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|err| io_failure(&self.path, &err))?;
        debug!(path = %self.path.display(), doctors = records.len(), "offline store written");
        Ok(())
    }
}

#[async_trait]
impl DoctorDirectory for JsonFileDoctorDirectory {
    async fn list(&self) -> Result<Vec<DoctorRecord>, DoctorDirectoryError> {
        self.records.list().await
    }

    async fn create(&self, draft: &DoctorDraft) -> Result<DoctorRecord, DoctorDirectoryError> {
        let record = self.records.create(draft).await?;
        self.persist().await?;
        Ok(record)
    }

    async fn update(
        &self,
        id: &DoctorId,
        draft: &DoctorDraft,
    ) -> Result<DoctorRecord, DoctorDirectoryError> {
        let record = self.records.update(id, draft).await?;
        self.persist().await?;
        Ok(record)
    }

    async fn delete(&self, id: &DoctorId) -> Result<(), DoctorDirectoryError> {
        self.records.delete(id).await?;
        self.persist().await
    }
}
