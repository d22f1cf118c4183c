//! Result shapes returned to the frontend.

use crate::metadata::UNKNOWN;
use crate::morphik::{Document, QueryRequest};
use serde::Serialize;
use serde_json::{Map, Value};

/// Confidence reported for every synthesized answer; Morphik exposes no whole-answer score.
pub const PLACEHOLDER_SCORE: f64 = 0.95;

/// One synthesized answer for a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Identifier of the top cited document, `"1"` when nothing was cited.
    pub id: String,
    /// Filename of the cited document, or `"ECSS Document"`.
    pub title: String,
    /// Completion text, verbatim.
    pub content: String,
    /// Always [`PLACEHOLDER_SCORE`].
    pub score: f64,
    /// Relevance Morphik reported for the top citation, `0` when absent.
    pub relevance: f64,
    /// Metadata of the cited document, or the fallback classification.
    pub metadata: Map<String, Value>,
}

/// Listing entry for `GET /api/documents`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    /// Morphik external identifier.
    pub id: String,
    /// Original filename.
    pub filename: String,
    /// Processing status (`completed`, `processing`, ...).
    pub status: String,
    /// Stored document metadata.
    pub metadata: Map<String, Value>,
}

impl From<Document> for DocumentSummary {
    fn from(document: Document) -> Self {
        let status = document.status().unwrap_or(UNKNOWN).to_string();
        Self {
            id: document.external_id.unwrap_or_else(|| UNKNOWN.into()),
            filename: document.filename.unwrap_or_else(|| UNKNOWN.into()),
            status,
            metadata: document.metadata,
        }
    }
}

/// Optional classification filters accepted by `GET /api/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Branch letter (`E`, `M`, `Q`, `S`, `U`).
    pub branch: Option<String>,
    /// Discipline code (`ST`, `HB`, `TM`).
    pub discipline: Option<String>,
    /// Revision number.
    pub revision: Option<String>,
}

impl SearchFilters {
    /// Build the Morphik query for `query`, forwarding every non-blank filter.
    pub fn to_query_request(&self, query: &str) -> QueryRequest {
        [
            ("branch", &self.branch),
            ("discipline", &self.discipline),
            ("revision", &self.revision),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value.as_deref()?.trim();
            (!value.is_empty()).then(|| (key, value.to_string()))
        })
        .fold(QueryRequest::new(query), |request, (key, value)| {
            request.with_filter(key, value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_defaults_missing_fields() {
        let summary = DocumentSummary::from(Document::default());
        assert_eq!(summary.id, "Unknown");
        assert_eq!(summary.filename, "Unknown");
        assert_eq!(summary.status, "Unknown");
        assert!(summary.metadata.is_empty());
    }

    #[test]
    fn summary_copies_backend_fields() {
        let document: Document = serde_json::from_value(json!({
            "external_id": "doc-7",
            "filename": "ECSS-Q-ST-70C-Rev.2(15October2019).pdf",
            "metadata": { "branch": "Q" },
            "system_metadata": { "status": "completed" }
        }))
        .unwrap();
        let summary = DocumentSummary::from(document);
        assert_eq!(summary.id, "doc-7");
        assert_eq!(summary.status, "completed");
        assert_eq!(summary.metadata["branch"], "Q");
    }

    #[test]
    fn blank_filters_are_not_forwarded() {
        let filters = SearchFilters {
            branch: Some("E".into()),
            discipline: Some("  ".into()),
            revision: None,
        };
        let request = filters.to_query_request("software");
        assert_eq!(request.query, "software");
        assert_eq!(Value::Object(request.filters), json!({ "branch": "E" }));
    }
}
