use std::cmp::Ordering;

use crate::config::MergeConfig;
use crate::error::MergeError;
use crate::model::{ExtractedPriceRecord, MergeSummary, MergedResult};
use crate::similarity::is_duplicate;

/// Merge one or more OCR-scanned sections into a single deduplicated,
/// position-ordered list of line-items. A single scan is simply a
/// one-section input.
///
/// Candidates are processed in input order (section order, then
/// within-section order). Each candidate is checked against the current
/// survivors; the first match under the active policy is the conflict
/// partner. Higher confidence wins the conflict, replacing the incumbent
/// in place so its slot in the output ordering is preserved; equal
/// confidence keeps the incumbent, so reruns never flap.
///
/// Pure and deterministic: no IO, nothing to fail on. Empty input yields
/// an empty result with aggregate confidence 0.0.
pub fn merge(config: &MergeConfig, sections: &[Vec<ExtractedPriceRecord>]) -> MergedResult {
    let (result, _) = merge_with_summary(config, sections);
    result
}

/// Merge and also report what the dedup pass did.
pub fn merge_with_summary(
    config: &MergeConfig,
    sections: &[Vec<ExtractedPriceRecord>],
) -> (MergedResult, MergeSummary) {
    let policy = config.policy;
    let tolerance = &config.tolerance;

    let mut survivors: Vec<ExtractedPriceRecord> = Vec::new();
    let mut duplicates_dropped = 0usize;
    let mut replaced_by_confidence = 0usize;
    let mut input_records = 0usize;

    for candidate in sections.iter().flatten() {
        input_records += 1;

        let existing = survivors
            .iter()
            .position(|e| is_duplicate(candidate, e, policy, tolerance));

        match existing {
            None => survivors.push(candidate.clone()),
            Some(i) => {
                if candidate.confidence > survivors[i].confidence {
                    survivors[i] = candidate.clone();
                    replaced_by_confidence += 1;
                } else {
                    duplicates_dropped += 1;
                }
            }
        }
    }

    // Recover top-to-bottom receipt order even when sections arrived out of
    // physical order. Stable: equal positions keep post-dedup order.
    survivors.sort_by(|a, b| a.position.partial_cmp(&b.position).unwrap_or(Ordering::Equal));

    // Upstream confidence values are not validated; clamp on output.
    for record in &mut survivors {
        record.confidence = record.confidence.clamp(0.0, 1.0);
    }

    let aggregate_confidence = aggregate_confidence(
        &survivors,
        sections.len(),
        config.confidence.section_bonus,
    );

    let summary = MergeSummary {
        sections: sections.len(),
        input_records,
        surviving: survivors.len(),
        duplicates_dropped,
        replaced_by_confidence,
    };

    let result = MergedResult {
        prices: survivors,
        total_sections: sections.len(),
        aggregate_confidence,
    };

    (result, summary)
}

/// Mean surviving confidence plus the per-extra-section bonus, clamped to
/// [0, 1]. Empty output scores 0.0 with no bonus.
fn aggregate_confidence(
    survivors: &[ExtractedPriceRecord],
    section_count: usize,
    section_bonus: f64,
) -> f64 {
    if survivors.is_empty() {
        return 0.0;
    }

    let mean: f64 =
        survivors.iter().map(|r| r.confidence).sum::<f64>() / survivors.len() as f64;
    let bonus = section_bonus * section_count.saturating_sub(1) as f64;

    (mean + bonus).clamp(0.0, 1.0)
}

/// Parse one OCR section dump (a JSON array of records) into validated
/// records. The OCR collaborator's output is not trusted: non-finite or
/// negative prices and non-finite confidences are rejected with the record's
/// address in the error.
pub fn load_section_records(
    section_label: &str,
    json_data: &str,
) -> Result<Vec<ExtractedPriceRecord>, MergeError> {
    let records: Vec<ExtractedPriceRecord> =
        serde_json::from_str(json_data).map_err(|e| MergeError::RecordParse {
            section: section_label.into(),
            index: 0,
            reason: format!("invalid JSON: {e}"),
        })?;

    for (index, record) in records.iter().enumerate() {
        if !record.price.is_finite() || record.price < 0.0 {
            return Err(MergeError::RecordParse {
                section: section_label.into(),
                index,
                reason: format!("price must be a non-negative number, got {}", record.price),
            });
        }
        if !record.confidence.is_finite() {
            return Err(MergeError::RecordParse {
                section: section_label.into(),
                index,
                reason: format!("confidence must be a finite number, got {}", record.confidence),
            });
        }
        if !record.position.is_finite() {
            return Err(MergeError::RecordParse {
                section: section_label.into(),
                index,
                reason: format!("position must be a finite number, got {}", record.position),
            });
        }
    }

    Ok(records)
}
