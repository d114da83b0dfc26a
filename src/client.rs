//! HTTP client for the Maintrack API, with form drafts that survive failed
//! submissions.

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    api::{dashboard::DashboardSummary, submissions::SubmissionResponse},
    error::ErrorResponse,
    models::{Equipment, MaintenanceRecord, RecordKind},
    validation::{self, FieldErrors},
};

macro_rules! api {
    ($api:expr, $($tt:tt)*) => {
        format!("{}/{}", $api, format!($($tt)*))
    };
}

/// Failure of a client call
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Rejected before sending, or by the server with field messages
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Request rejected with status {status}: {message}")]
    Rejected {
        status: u16,
        message: String,
        fields: Option<FieldErrors>,
    },

    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// In-progress form input for one record kind
#[derive(Debug, Clone, PartialEq)]
pub struct FormDraft {
    kind: RecordKind,
    fields: Map<String, Value>,
}

impl FormDraft {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            fields: Map::new(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

pub struct MaintrackClient {
    api: String,
    inner: reqwest::Client,
}

impl Debug for MaintrackClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MaintrackClient {{ api: {}, client: reqwest::Client }}", self.api)
    }
}

impl MaintrackClient {
    pub const DEFAULT_API: &'static str = "http://localhost:8080/api/v1";

    /// Client for the API rooted at `api`; every request is bounded by `timeout`
    pub fn new(api: &str, timeout: Duration) -> reqwest::Result<Self> {
        let inner = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api: api.trim_end_matches('/').to_owned(),
            inner,
        })
    }

    /// Validate the draft locally, then submit it.
    ///
    /// The draft is cleared only once the server has acknowledged the save;
    /// on any failure it is left untouched for another attempt. Nothing is
    /// sent when local validation fails.
    pub async fn submit(&self, draft: &mut FormDraft) -> Result<SubmissionResponse, SubmitError> {
        let record =
            validation::validate(draft.kind, &draft.to_value()).map_err(SubmitError::Validation)?;

        let res = self
            .inner
            .post(api!(self.api, "submissions"))
            .query(&[("formType", draft.kind.as_str())])
            .json(&record)
            .send()
            .await
            .map_err(transport)?;
        let saved: SubmissionResponse = read_json(res).await?;

        tracing::debug!("Saved {} record {}", draft.kind, saved.id);
        draft.clear();
        Ok(saved)
    }

    pub async fn equipment(&self) -> Result<Vec<Equipment>, SubmitError> {
        self.fetch(api!(self.api, "equipment")).await
    }

    pub async fn maintenance(&self) -> Result<Vec<MaintenanceRecord>, SubmitError> {
        self.fetch(api!(self.api, "maintenance")).await
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary, SubmitError> {
        self.fetch(api!(self.api, "dashboard")).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: String) -> Result<T, SubmitError> {
        let res = self.inner.get(url).send().await.map_err(transport)?;
        read_json(res).await
    }
}

fn transport(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        SubmitError::Timeout
    } else {
        SubmitError::Transport(err)
    }
}

async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, SubmitError> {
    let status = res.status();
    if status.is_success() {
        return res.json().await.map_err(transport);
    }
    if status == StatusCode::GATEWAY_TIMEOUT {
        return Err(SubmitError::Timeout);
    }

    let body = res.bytes().await.map_err(transport)?;
    let (message, fields) = match serde_json::from_slice::<ErrorResponse>(&body) {
        Ok(error) => (error.message, error.fields),
        Err(_) => (String::from_utf8_lossy(&body).into_owned(), None),
    };

    match (status, fields) {
        (StatusCode::UNPROCESSABLE_ENTITY, Some(fields)) => Err(SubmitError::Validation(fields)),
        (status, fields) => Err(SubmitError::Rejected {
            status: status.as_u16(),
            message,
            fields,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_set_and_clear() {
        let mut draft = FormDraft::new(RecordKind::Equipment);
        assert!(draft.is_empty());

        draft.set("name", "Press A").set("status", "Down");
        assert_eq!(draft.get("name"), Some(&Value::from("Press A")));
        assert_eq!(draft.to_value()["status"], "Down");

        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft.kind(), RecordKind::Equipment);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_kept_and_not_sent() {
        // Nothing listens on port 9; a network attempt would be a transport error
        let client = MaintrackClient::new("http://127.0.0.1:9/api/v1", Duration::from_secs(1))
            .unwrap();
        let mut draft = FormDraft::new(RecordKind::Equipment);
        draft.set("name", "AB");

        match client.submit(&mut draft).await {
            Err(SubmitError::Validation(errors)) => {
                assert!(errors.contains("name"));
                assert!(errors.contains("serialNumber"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert_eq!(draft.get("name"), Some(&Value::from("AB")));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = MaintrackClient::new("http://localhost:8080/api/v1/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(api!(client.api, "equipment"), "http://localhost:8080/api/v1/equipment");
    }
}
