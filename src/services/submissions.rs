//! Submission pipeline: validate, assign an id, persist

use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Record, RecordKind, ValidatedRecord},
    repository::{resolve_collection, Repository},
    validation::{self, FieldErrors},
};

pub const UNKNOWN_EQUIPMENT: &str = "Selected equipment does not exist";

#[derive(Clone)]
pub struct SubmissionService {
    repository: Repository,
    write_timeout: Duration,
}

impl SubmissionService {
    pub fn new(repository: Repository, write_timeout: Duration) -> Self {
        Self {
            repository,
            write_timeout,
        }
    }

    /// Submit a record for the collection named by a request's `formType`
    pub async fn submit_named(&self, form_type: Option<&str>, input: &Value) -> AppResult<Record> {
        let kind = resolve_collection(form_type)?;
        self.submit(kind, input).await
    }

    /// Validate `input`, attach a fresh id and append it to its collection.
    ///
    /// Invalid input never reaches the repository. Waiting for the collection
    /// is bounded by the configured write timeout; once the write starts it
    /// either fully succeeds or fails.
    pub async fn submit(&self, kind: RecordKind, input: &Value) -> AppResult<Record> {
        let validated = validation::validate(kind, input).map_err(|errors| {
            tracing::debug!(collection = %kind, "Submission rejected: {}", errors);
            AppError::Validation(errors)
        })?;

        if let ValidatedRecord::Maintenance(record) = &validated {
            self.check_equipment_reference(&record.equipment).await?;
        }

        let record = validated.with_id(Uuid::new_v4());
        self.persist(&record).await?;

        tracing::info!(collection = %kind, id = %record.id(), "Record saved");
        Ok(record)
    }

    async fn check_equipment_reference(&self, reference: &str) -> AppResult<()> {
        let exists = match Uuid::parse_str(reference) {
            Ok(id) => self.repository.equipment_exists(id).await?,
            Err(_) => false,
        };
        if exists {
            Ok(())
        } else {
            let mut errors = FieldErrors::default();
            errors.add("equipment", UNKNOWN_EQUIPMENT);
            Err(AppError::Validation(errors))
        }
    }

    async fn persist(&self, record: &Record) -> AppResult<()> {
        match record {
            Record::Equipment(e) => self.repository.equipment_create(e, self.write_timeout).await,
            Record::Maintenance(m) => {
                self.repository.maintenance_create(m, self.write_timeout).await
            }
        }
    }
}
