//! Converts Morphik completions into the frontend's flat result shape.

use crate::metadata::{FilenameMetadata, UNKNOWN};
use crate::morphik::{CompletionResponse, Document, MorphikError, RetrievalBackend};
use crate::search::types::{PLACEHOLDER_SCORE, SearchResult};
use async_trait::async_trait;

/// Title used when the cited document could not be resolved.
pub const FALLBACK_TITLE: &str = "ECSS Document";
/// Identifier used when the completion cites nothing.
pub const FALLBACK_ID: &str = "1";

/// Source of document records for resolving citations.
#[async_trait]
pub trait DocumentLookup: Send + Sync {
    /// Fetch the document record with the given identifier.
    async fn fetch_document(&self, document_id: &str) -> Result<Document, MorphikError>;
}

#[async_trait]
impl<B> DocumentLookup for B
where
    B: RetrievalBackend + ?Sized,
{
    async fn fetch_document(&self, document_id: &str) -> Result<Document, MorphikError> {
        self.get_document(document_id).await
    }
}

/// Build the result list for a completion.
///
/// Yields at most one result, built from the completion and its first citation. A completion
/// without text yields no results. Failing to resolve the cited document is logged and the
/// fallback title and metadata are used instead.
pub async fn normalize_completion<L>(
    response: CompletionResponse,
    lookup: &L,
) -> Vec<SearchResult>
where
    L: DocumentLookup + ?Sized,
{
    let CompletionResponse {
        completion,
        sources,
    } = response;
    let Some(content) = completion else {
        return Vec::new();
    };
    let top = sources.into_iter().next();

    let mut document = None;
    if let Some(document_id) = top
        .as_ref()
        .and_then(|source| source.document_id.as_deref())
        .filter(|id| !id.is_empty())
    {
        match lookup.fetch_document(document_id).await {
            Ok(found) => document = Some(found),
            Err(err) => {
                tracing::warn!(document_id, error = %err, "Failed to resolve cited document");
            }
        }
    }

    let (title, metadata) = match document {
        Some(document) => (
            document.filename.unwrap_or_else(|| UNKNOWN.to_string()),
            document.metadata,
        ),
        None => (
            FALLBACK_TITLE.to_string(),
            FilenameMetadata::fallback().to_metadata_map(),
        ),
    };

    let (id, relevance) = match top {
        Some(source) => (
            source.document_id.unwrap_or_else(|| FALLBACK_ID.to_string()),
            source.score.unwrap_or(0.0),
        ),
        None => (FALLBACK_ID.to_string(), 0.0),
    };

    vec![SearchResult {
        id,
        title,
        content,
        score: PLACEHOLDER_SCORE,
        relevance,
        metadata,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphik::ChunkSource;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubLookup {
        document: Option<Document>,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl DocumentLookup for StubLookup {
        async fn fetch_document(&self, document_id: &str) -> Result<Document, MorphikError> {
            self.requested
                .lock()
                .expect("lock")
                .push(document_id.to_string());
            self.document
                .clone()
                .ok_or_else(|| MorphikError::UnexpectedStatus {
                    status: StatusCode::NOT_FOUND,
                    body: "missing".into(),
                })
        }
    }

    fn completion(text: Option<&str>, sources: Vec<ChunkSource>) -> CompletionResponse {
        CompletionResponse {
            completion: text.map(str::to_string),
            sources,
        }
    }

    fn source(id: Option<&str>, score: Option<f64>) -> ChunkSource {
        ChunkSource {
            document_id: id.map(str::to_string),
            chunk_number: Some(0),
            score,
        }
    }

    #[tokio::test]
    async fn missing_completion_yields_no_results() {
        let lookup = StubLookup::default();
        let response = completion(None, vec![source(Some("a"), None)]);
        let results = normalize_completion(response, &lookup).await;
        assert!(results.is_empty());
        assert!(lookup.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_sources_use_fallbacks() {
        let lookup = StubLookup::default();
        let results = normalize_completion(completion(Some("answer"), vec![]), &lookup).await;

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.id, "1");
        assert_eq!(result.title, "ECSS Document");
        assert_eq!(result.content, "answer");
        assert_eq!(result.score, 0.95);
        assert_eq!(result.relevance, 0.0);
        assert_eq!(result.metadata, FilenameMetadata::fallback().to_metadata_map());
        assert_eq!(result.metadata["filename"], "Unknown");
    }

    #[tokio::test]
    async fn resolved_document_supplies_title_and_metadata() {
        let document: Document = serde_json::from_value(json!({
            "external_id": "doc-70",
            "filename": "ECSS-Q-ST-70C-Rev.2(15October2019).pdf",
            "metadata": { "branch": "Q", "revision": "2" }
        }))
        .unwrap();
        let lookup = StubLookup {
            document: Some(document),
            ..StubLookup::default()
        };
        let sources = vec![
            source(Some("doc-70"), Some(0.83)),
            source(Some("doc-99"), Some(0.9)),
        ];

        let results =
            normalize_completion(completion(Some("Materials..."), sources), &lookup).await;

        assert_eq!(*lookup.requested.lock().unwrap(), vec!["doc-70".to_string()]);
        let result = &results[0];
        assert_eq!(result.id, "doc-70");
        assert_eq!(result.title, "ECSS-Q-ST-70C-Rev.2(15October2019).pdf");
        assert_eq!(result.relevance, 0.83);
        assert_eq!(
            serde_json::Value::Object(result.metadata.clone()),
            json!({ "branch": "Q", "revision": "2" })
        );
    }

    #[tokio::test]
    async fn failed_lookup_keeps_citation_id_and_falls_back() {
        let lookup = StubLookup::default();
        let response = completion(Some("text"), vec![source(Some("gone"), Some(0.4))]);
        let results = normalize_completion(response, &lookup).await;

        let result = &results[0];
        assert_eq!(result.id, "gone");
        assert_eq!(result.title, "ECSS Document");
        assert_eq!(result.relevance, 0.4);
        assert_eq!(result.metadata["branch"], "S");
    }

    #[tokio::test]
    async fn citation_without_document_id_skips_lookup() {
        let lookup = StubLookup::default();
        let response = completion(Some("text"), vec![source(None, Some(0.2))]);
        let results = normalize_completion(response, &lookup).await;

        assert!(lookup.requested.lock().unwrap().is_empty());
        assert_eq!(results[0].id, "1");
        assert_eq!(results[0].relevance, 0.2);
    }

    #[tokio::test]
    async fn resolved_document_without_filename_is_titled_unknown() {
        let lookup = StubLookup {
            document: Some(Document::default()),
            ..StubLookup::default()
        };
        let response = completion(Some("text"), vec![source(Some("d"), None)]);
        let results = normalize_completion(response, &lookup).await;
        assert_eq!(results[0].title, "Unknown");
        assert!(results[0].metadata.is_empty());
    }
}
