#![deny(missing_docs)]

//! Core library for the ECSS Standards Navigator.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Batch ingestion of standards into the retrieval backend.
pub mod ingest;
/// Structured logging and tracing setup.
pub mod logging;
/// Classification metadata parsed from ECSS filenames.
pub mod metadata;
/// Ingestion counters.
pub mod metrics;
/// Morphik retrieval backend integration.
pub mod morphik;
/// Search result normalization.
pub mod search;
/// Request-scoped orchestration between the HTTP surface and Morphik.
pub mod service;
