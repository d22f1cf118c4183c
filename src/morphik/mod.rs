//! Morphik retrieval backend integration.

pub mod backend;
pub mod client;
pub mod types;
pub mod uri;

pub use backend::RetrievalBackend;
pub use client::MorphikClient;
pub use types::{ChunkSource, CompletionResponse, Document, MorphikError, QueryRequest};
pub use uri::{Endpoint, parse_uri};
