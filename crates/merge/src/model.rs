use serde::{Deserialize, Serialize};

use crate::config::{MergeConfig, MergePolicy};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One candidate line-item detected by the OCR collaborator.
///
/// Immutable value object: the engine selects or replaces whole records,
/// it never edits one in place. `confidence` is the OCR engine's own
/// estimate and is not trusted — it gets clamped to [0, 1] on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPriceRecord {
    /// Item name as recognized. May be empty.
    pub item_name: String,
    /// Non-negative amount, minor-unit precision, currency-unit-less.
    pub price: f64,
    /// Raw OCR snippet the record was derived from. Diagnostic/display only.
    #[serde(default)]
    pub original_text: String,
    /// OCR self-reported certainty, nominally in [0, 1].
    pub confidence: f64,
    /// Vertical offset on the source image, used to recover receipt order.
    pub position: f64,
    /// Full bounding box, when the OCR collaborator provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Result of one merge invocation. Created once, immutable, handed to the
/// presentation layer for review before submission.
#[derive(Debug, Clone, Serialize)]
pub struct MergedResult {
    /// Surviving records, deduplicated, sorted by `position` ascending.
    pub prices: Vec<ExtractedPriceRecord>,
    /// Number of input sections considered, empty ones included.
    pub total_sections: usize,
    /// Mean surviving confidence plus the multi-section bonus, in [0, 1].
    pub aggregate_confidence: f64,
}

/// Counts describing what the dedup pass did, for human and CI consumption.
#[derive(Debug, Clone, Serialize)]
pub struct MergeSummary {
    pub sections: usize,
    pub input_records: usize,
    pub surviving: usize,
    /// Candidates dropped because an existing record won the conflict.
    pub duplicates_dropped: usize,
    /// Conflicts where the newcomer's higher confidence replaced the incumbent.
    pub replaced_by_confidence: usize,
}

// ---------------------------------------------------------------------------
// Report (CLI output aggregate)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct MergeMeta {
    pub config_name: String,
    pub policy: MergePolicy,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub meta: MergeMeta,
    pub summary: MergeSummary,
    pub result: MergedResult,
}

impl MergeReport {
    /// Assemble the serializable report for a finished merge. The engine
    /// itself is deterministic; the timestamp is stamped only here.
    pub fn new(config: &MergeConfig, summary: MergeSummary, result: MergedResult) -> Self {
        Self {
            meta: MergeMeta {
                config_name: config.name.clone(),
                policy: config.policy,
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                run_at: chrono::Utc::now().to_rfc3339(),
            },
            summary,
            result,
        }
    }
}
