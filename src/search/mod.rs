//! Search result normalization and listing shapes.

pub mod normalizer;
pub mod types;

pub use normalizer::{DocumentLookup, normalize_completion};
pub use types::{DocumentSummary, PLACEHOLDER_SCORE, SearchFilters, SearchResult};
