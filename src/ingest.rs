//! Batch ingestion of ECSS PDFs into the retrieval backend.
//!
//! Each file is classified from its name, uploaded with that metadata, and counted. A missing
//! file or a rejected upload is logged and counted as failed; the run always continues.

use crate::metadata::FilenameMetadata;
use crate::metrics::{IngestMetrics, IngestionSummary};
use crate::morphik::RetrievalBackend;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory holding the published standards in the project checkout.
pub const DEFAULT_PDF_DIRECTORY: &str = "ECSS Published Standards/1-Active Standards";

/// The standards ingested when no files are named explicitly.
pub const INITIAL_DOCUMENTS: [&str; 5] = [
    "ECSS-S-ST-00C Rev.1(15June2020).pdf",
    "ECSS-Q-ST-70C-Rev.2(15October2019).pdf",
    "ECSS-E-ST-50C-Rev.1(1March2021).pdf",
    "ECSS-M-ST-10C_Rev.1(6March2009).pdf",
    "ECSS-E-ST-20-08C_Rev.2(20April2023).pdf",
];

/// Knobs applied to every upload in a run.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Ask the backend to build multi-vector (ColPali) embeddings.
    pub use_colpali: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { use_colpali: true }
    }
}

/// Per-file outcome of an ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Backend accepted the upload.
    Ingested {
        /// Filename sent to the backend.
        filename: String,
        /// Identifier assigned by the backend, if reported.
        document_id: Option<String>,
        /// Processing status reported by the backend, if any.
        status: Option<String>,
    },
    /// File did not exist under the PDF directory.
    Missing {
        /// Path that was checked.
        path: PathBuf,
    },
    /// Backend call failed.
    Failed {
        /// Filename sent to the backend.
        filename: String,
        /// Error description.
        error: String,
    },
}

/// Result of [`ingest_documents`].
#[derive(Debug, Clone)]
pub struct IngestionReport {
    /// Outcome for every requested path, in order.
    pub outcomes: Vec<IngestOutcome>,
    /// Aggregate counters.
    pub summary: IngestionSummary,
}

/// Ingest `document_paths` (relative to `pdf_directory`) into `backend`.
pub async fn ingest_documents<B>(
    backend: &B,
    pdf_directory: &Path,
    document_paths: &[PathBuf],
    options: IngestOptions,
) -> IngestionReport
where
    B: RetrievalBackend + ?Sized,
{
    let metrics = IngestMetrics::new();
    let mut outcomes = Vec::with_capacity(document_paths.len());

    for relative in document_paths {
        let outcome = ingest_one(backend, &pdf_directory.join(relative), options).await;
        match &outcome {
            IngestOutcome::Ingested { .. } => metrics.record_success(),
            IngestOutcome::Missing { .. } | IngestOutcome::Failed { .. } => {
                metrics.record_failure()
            }
        }
        outcomes.push(outcome);
    }

    let summary = metrics.snapshot();
    tracing::info!(
        successful = summary.successful,
        failed = summary.failed,
        total = summary.total,
        "Ingestion summary"
    );
    IngestionReport { outcomes, summary }
}

async fn ingest_one<B>(backend: &B, full_path: &Path, options: IngestOptions) -> IngestOutcome
where
    B: RetrievalBackend + ?Sized,
{
    if !full_path.is_file() {
        tracing::warn!(path = %full_path.display(), "File not found");
        return IngestOutcome::Missing {
            path: full_path.to_path_buf(),
        };
    }

    let filename = full_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let metadata = FilenameMetadata::from_filename(&filename);
    if !metadata.is_classified() {
        tracing::warn!(%filename, "Filename does not follow the ECSS convention");
    }
    tracing::info!(%filename, path = %full_path.display(), ?metadata, "Ingesting document");

    match backend
        .ingest_file(
            full_path,
            &filename,
            &metadata.to_metadata_map(),
            options.use_colpali,
        )
        .await
    {
        Ok(document) => {
            let status = document.status().map(str::to_string);
            tracing::info!(
                %filename,
                document_id = document.external_id.as_deref().unwrap_or("N/A"),
                status = status.as_deref().unwrap_or("N/A"),
                "Document ingested"
            );
            IngestOutcome::Ingested {
                filename,
                document_id: document.external_id,
                status,
            }
        }
        Err(err) => {
            tracing::error!(%filename, error = %err, "Ingestion failed");
            IngestOutcome::Failed {
                filename,
                error: err.to_string(),
            }
        }
    }
}

/// Find every `*.pdf` under `directory`, returned relative to it and sorted.
pub fn discover_pdfs(directory: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(directory)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(directory)
                .ok()
                .map(Path::to_path_buf)
        })
        .collect();
    found.sort();
    found
}
