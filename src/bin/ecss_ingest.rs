//! Ingest ECSS standards into Morphik.
//!
//! Classifies each PDF from its filename and uploads it with that metadata. Without arguments
//! the five initial standards are ingested from the default standards directory.
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use ecss_navigator::{config, ingest, logging, morphik::MorphikClient};

/// Backend used when `MORPHIK_URI` is not configured.
const LOCAL_MORPHIK_URI: &str = "http://localhost:8000";

#[derive(Parser)]
#[command(name = "ecss-ingest", about = "Ingest ECSS standards into Morphik")]
struct Cli {
    /// Directory containing the ECSS PDFs.
    #[arg(long, default_value = ingest::DEFAULT_PDF_DIRECTORY)]
    dir: PathBuf,
    /// Ingest every PDF found under `--dir`.
    #[arg(long, conflicts_with = "files")]
    all: bool,
    /// Disable multi-vector (ColPali) embeddings.
    #[arg(long)]
    no_colpali: bool,
    /// PDF paths relative to `--dir`.
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() {
    logging::init_tracing("ecss-ingest");
    if let Err(err) = run().await {
        tracing::error!(error = %err, "Ingestion aborted");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = config::init_config().context("failed to load configuration")?;

    let uri = match config.morphik_uri.as_deref() {
        Some(uri) => uri,
        None => {
            tracing::warn!(
                uri = LOCAL_MORPHIK_URI,
                "MORPHIK_URI is not set; using the default local Morphik instance"
            );
            LOCAL_MORPHIK_URI
        }
    };
    let client = MorphikClient::from_uri(uri).context("failed to connect to Morphik")?;
    tracing::info!(url = client.base_url(), "Connected to Morphik");

    let documents: Vec<PathBuf> = if cli.all {
        ingest::discover_pdfs(&cli.dir)
    } else if cli.files.is_empty() {
        ingest::INITIAL_DOCUMENTS.iter().map(PathBuf::from).collect()
    } else {
        cli.files
    };
    tracing::info!(
        directory = %cli.dir.display(),
        documents = documents.len(),
        "Starting ECSS document ingestion"
    );

    let options = ingest::IngestOptions {
        use_colpali: !cli.no_colpali,
    };
    let report = ingest::ingest_documents(&client, &cli.dir, &documents, options).await;

    if report.summary.nothing_ingested() {
        bail!(
            "no documents were ingested ({} failed); check the errors above",
            report.summary.failed
        );
    }
    if report.summary.successful > 0 {
        tracing::info!(
            successful = report.summary.successful,
            "ECSS documents ingested; they are searchable once Morphik finishes processing"
        );
    }
    Ok(())
}
