//! Trait abstraction for the document service to enable mocking in tests

use super::ServiceError;
use crate::state::PartyRecord;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Remote operations used by the app: one directory read, one document POST per submit
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Fetch the lawyer/beneficiary directory
    async fn list_parties(&self) -> Result<Vec<PartyRecord>, ServiceError>;

    /// POST the JSON payload to `endpoint` and return the generated file
    async fn generate_document(
        &self,
        endpoint: &str,
        payload: JsonValue,
    ) -> Result<Vec<u8>, ServiceError>;
}
