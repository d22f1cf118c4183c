//! Request and response contracts for the Morphik REST API.
//!
//! Every field Morphik may omit is optional here and validated once, at deserialization.

use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while interacting with Morphik.
#[derive(Debug, Error)]
pub enum MorphikError {
    /// Connection URI failed to parse.
    #[error("Invalid Morphik URI: {0}")]
    InvalidUri(String),
    /// HTTP layer failed before a usable response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Morphik responded with an unexpected status code.
    #[error("Unexpected Morphik response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned from Morphik.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
    /// A local file could not be read for ingestion.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}

/// Body of `POST /query`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryRequest {
    /// Natural language question.
    pub query: String,
    /// Equality filters applied to document metadata.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub filters: Map<String, Value>,
    /// Number of chunks to retrieve before completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<usize>,
    /// Request multi-vector (ColPali) retrieval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_colpali: Option<bool>,
}

impl QueryRequest {
    /// Create a query without filters.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Add a metadata equality filter.
    pub fn with_filter(mut self, key: &str, value: impl Into<String>) -> Self {
        self.filters
            .insert(key.to_string(), Value::String(value.into()));
        self
    }
}

/// Response of `POST /query`: generated completion plus cited chunks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompletionResponse {
    /// Generated answer; absent when Morphik produced none.
    #[serde(default)]
    pub completion: Option<String>,
    /// Chunks that contributed to the completion, best first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<ChunkSource>,
}

/// A citation attached to a completion.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChunkSource {
    /// External identifier of the cited document.
    #[serde(default)]
    pub document_id: Option<String>,
    /// Chunk index within the document.
    #[serde(default)]
    pub chunk_number: Option<u64>,
    /// Relevance reported for the chunk.
    #[serde(default)]
    pub score: Option<f64>,
}

/// Document record as stored by Morphik.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Document {
    /// Morphik-assigned identifier.
    #[serde(default)]
    pub external_id: Option<String>,
    /// Original filename supplied at ingestion.
    #[serde(default)]
    pub filename: Option<String>,
    /// User metadata supplied at ingestion.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Map<String, Value>,
    /// Morphik bookkeeping such as processing `status`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub system_metadata: Map<String, Value>,
    /// MIME type detected by Morphik.
    #[serde(default)]
    pub content_type: Option<String>,
}

impl Document {
    /// Processing status reported in `system_metadata.status`.
    pub fn status(&self) -> Option<&str> {
        self.system_metadata.get("status").and_then(Value::as_str)
    }
}

/// `POST /documents` answers with either a bare list or an object wrapping one.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ListDocumentsResponse {
    Documents(Vec<Document>),
    Object {
        #[serde(default)]
        documents: Vec<Document>,
    },
}

impl ListDocumentsResponse {
    pub(crate) fn into_documents(self) -> Vec<Document> {
        match self {
            Self::Documents(documents) | Self::Object { documents } => documents,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
