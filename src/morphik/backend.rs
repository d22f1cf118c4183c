//! Backend abstraction shared by the HTTP service and the ingestion tool.

use crate::morphik::types::{CompletionResponse, Document, MorphikError, QueryRequest};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::Path;

/// Operations the navigator needs from a retrieval backend.
///
/// [`crate::morphik::MorphikClient`] implements this over HTTP; tests substitute stubs.
#[async_trait]
pub trait RetrievalBackend: Send + Sync {
    /// Run a query and return the generated completion with its citations.
    async fn query(&self, request: &QueryRequest) -> Result<CompletionResponse, MorphikError>;

    /// Fetch a single document record by its external identifier.
    async fn get_document(&self, document_id: &str) -> Result<Document, MorphikError>;

    /// List every document visible to the configured credentials.
    async fn list_documents(&self) -> Result<Vec<Document>, MorphikError>;

    /// Upload a local file with the given metadata.
    async fn ingest_file(
        &self,
        path: &Path,
        filename: &str,
        metadata: &Map<String, Value>,
        use_colpali: bool,
    ) -> Result<Document, MorphikError>;
}
