//! `pricelens-merge` — Receipt line-item merge & deduplication engine.
//!
//! Pure engine crate: receives OCR-extracted price records (one list per
//! scanned receipt section), returns a single deduplicated, position-ordered
//! list with an aggregate confidence score. No CLI or IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod similarity;

pub use config::{MergeConfig, MergePolicy, ToleranceConfig};
pub use engine::{load_section_records, merge, merge_with_summary};
pub use error::MergeError;
pub use model::{ExtractedPriceRecord, MergeReport, MergeSummary, MergedResult};
