//! Classification metadata derived from ECSS standard filenames.
//!
//! ECSS publishes standards under names such as `ECSS-Q-ST-70C-Rev.2(15October2019).pdf`:
//! a branch letter, a two-letter discipline, the document number and an optional revision.
//! Names that do not follow the convention still produce a record carrying only the filename.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Constant `document_type` attached to every classified record.
pub const DOCUMENT_TYPE: &str = "ECSS_Standard";
/// Constant `source` attached to every classified record.
pub const DOCUMENT_SOURCE: &str = "ECSS_Published_Standards";
/// Label used for codes outside the known tables.
pub const UNKNOWN: &str = "Unknown";
/// Revision assumed when the filename carries none.
pub const DEFAULT_REVISION: &str = "1";

static FILENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ECSS-([A-Z])-([A-Z]{2})-(\d+[A-Z]?)(?:[_-]Rev\.?(\d+))?")
        .expect("ECSS filename pattern is valid")
});

/// Human-readable name of a branch code, or `"Unknown"`.
pub fn branch_name(code: &str) -> &'static str {
    match code {
        "E" => "Engineering",
        "M" => "Management",
        "Q" => "Quality Assurance",
        "S" => "Space Product Assurance",
        "U" => "Space Sustainability",
        _ => UNKNOWN,
    }
}

/// Human-readable name of a discipline code, or `"Unknown"`.
pub fn discipline_name(code: &str) -> &'static str {
    match code {
        "ST" => "Space Systems",
        "HB" => "Handbooks",
        "TM" => "Technical Memoranda",
        _ => UNKNOWN,
    }
}

/// Fields recovered from a filename that follows the ECSS naming convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Single-letter branch code.
    pub branch: String,
    /// Resolved branch label.
    pub branch_name: &'static str,
    /// Two-letter discipline code.
    pub discipline: String,
    /// Resolved discipline label.
    pub discipline_name: &'static str,
    /// Document number including the optional trailing letter (`70C`).
    pub document_number: String,
    /// Revision number, `"1"` when absent.
    pub revision: String,
    /// Always [`DOCUMENT_TYPE`].
    pub document_type: &'static str,
    /// Always [`DOCUMENT_SOURCE`].
    pub source: &'static str,
}

/// Metadata attached to an ingested ECSS document.
///
/// Serializes to the flat object stored by the retrieval backend. An unclassified record
/// serializes to exactly `{"filename": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilenameMetadata {
    /// Original filename, unchanged.
    pub filename: String,
    /// Classification fields; `None` when the name does not follow the convention.
    #[serde(flatten)]
    pub classification: Option<Classification>,
}

impl FilenameMetadata {
    /// Parse `filename` against the ECSS naming convention. Never fails.
    pub fn from_filename(filename: &str) -> Self {
        let classification = FILENAME_PATTERN.captures(filename).map(|caps| {
            let branch = caps[1].to_string();
            let discipline = caps[2].to_string();
            Classification {
                branch_name: branch_name(&branch),
                discipline_name: discipline_name(&discipline),
                branch,
                discipline,
                document_number: caps[3].to_string(),
                revision: caps
                    .get(4)
                    .map_or_else(|| DEFAULT_REVISION.to_string(), |m| m.as_str().to_string()),
                document_type: DOCUMENT_TYPE,
                source: DOCUMENT_SOURCE,
            }
        });

        Self {
            filename: filename.to_string(),
            classification,
        }
    }

    /// Default classification reported for search hits whose document could not be resolved.
    pub fn fallback() -> Self {
        Self {
            filename: UNKNOWN.to_string(),
            classification: Some(Classification {
                branch: "S".into(),
                branch_name: branch_name("S"),
                discipline: "ST".into(),
                discipline_name: discipline_name("ST"),
                document_number: "00C".into(),
                revision: DEFAULT_REVISION.into(),
                document_type: DOCUMENT_TYPE,
                source: DOCUMENT_SOURCE,
            }),
        }
    }

    /// Whether the filename matched the naming convention.
    pub fn is_classified(&self) -> bool {
        self.classification.is_some()
    }

    /// Flatten into the JSON object sent to the backend as document metadata.
    pub fn to_metadata_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::from_iter([("filename".to_string(), Value::from(self.filename.as_str()))]),
        }
    }
}
