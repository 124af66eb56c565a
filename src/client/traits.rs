//! Trait abstraction for the form backend to enable mocking in tests

use super::error::ClientError;
use crate::form::{FieldSchema, FieldValueStore};
use async_trait::async_trait;

/// Operations the form session needs from the server
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormBackend: Send + Sync {
    /// Fetch the field schema (`GET /form`)
    async fn fetch_schema(&self) -> Result<Vec<FieldSchema>, ClientError>;

    /// Fetch the raw option list of a choice field (`GET /choice/{id}`)
    ///
    /// The body is returned undecoded so the caller can tell an empty or
    /// oddly shaped list apart from a failed request.
    async fn fetch_choices(&self, field_id: &str) -> Result<serde_json::Value, ClientError>;

    /// Post the completed form (`POST /save`) and return the response body
    async fn submit(&self, values: &FieldValueStore) -> Result<serde_json::Value, ClientError>;
}
