use std::collections::BTreeSet;

use crate::config::{MergePolicy, ToleranceConfig};
use crate::model::ExtractedPriceRecord;

/// Jaccard word-set similarity between two strings.
///
/// Byte-equal strings score 1.0; otherwise an empty string scores 0.0.
/// Tokens are produced by splitting on the single ASCII space character and
/// collapse into a set, so duplicate words count once. Case folding is the
/// caller's responsibility.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let tokens_a: BTreeSet<&str> = a.split(' ').collect();
    let tokens_b: BTreeSet<&str> = b.split(' ').collect();

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();

    intersection as f64 / union as f64
}

/// Relative price difference over the mean of the two prices.
/// `None` when both prices are zero (the ratio is undefined).
fn relative_price_difference(a: f64, b: f64) -> Option<f64> {
    let mean = (a + b) / 2.0;
    if mean == 0.0 {
        return None;
    }
    Some((a - b).abs() / mean)
}

/// Whether two records denote the same real-world line-item.
///
/// Rule 1 (both policies): prices equal to the cent.
/// Rule 2 (`Strict` only): fuzzy name match above the similarity threshold
/// and relative price difference inside the tolerance band. First match
/// wins; the zero/zero price case is explicitly not a fuzzy duplicate.
pub fn is_duplicate(
    x: &ExtractedPriceRecord,
    y: &ExtractedPriceRecord,
    policy: MergePolicy,
    tolerance: &ToleranceConfig,
) -> bool {
    if (x.price - y.price).abs() < tolerance.price_epsilon {
        return true;
    }

    if policy == MergePolicy::Simple {
        return false;
    }

    let similarity = text_similarity(&x.item_name.to_lowercase(), &y.item_name.to_lowercase());
    if similarity <= tolerance.name_similarity {
        return false;
    }

    match relative_price_difference(x.price, y.price) {
        Some(diff) => diff < tolerance.relative_price,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, price: f64) -> ExtractedPriceRecord {
        ExtractedPriceRecord {
            item_name: name.into(),
            price,
            original_text: format!("{name} {price:.2}"),
            confidence: 0.9,
            position: 0.0,
            bounds: None,
            category: None,
            unit: None,
        }
    }

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(text_similarity("rice 1kg", "rice 1kg"), 1.0);
        // Byte-equality is checked before the empty-string rule.
        assert_eq!(text_similarity("", ""), 1.0);
    }

    #[test]
    fn empty_string_scores_zero() {
        assert_eq!(text_similarity("", "rice"), 0.0);
        assert_eq!(text_similarity("rice", ""), 0.0);
    }

    #[test]
    fn jaccard_over_word_sets() {
        // {chicken, breast} vs {chicken, breast, boneless}: 2 / 3
        let s = text_similarity("chicken breast", "chicken breast boneless");
        assert!((s - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn duplicate_tokens_collapse() {
        // {rice} vs {rice}: identical sets despite repetition.
        assert_eq!(text_similarity("rice rice", "rice"), 1.0);
    }

    #[test]
    fn spacing_changes_the_token_sets() {
        // "chicken breast 1kg" -> {chicken, breast, 1kg}
        // "chicken breast 1 kg" -> {chicken, breast, 1, kg}
        // intersection 2, union 5
        let s = text_similarity("chicken breast 1kg", "chicken breast 1 kg");
        assert!((s - 2.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn exact_price_rule_ignores_names() {
        let tol = ToleranceConfig::default();
        let x = record("Rice", 120.00);
        let y = record("Brown Rice 1lb", 120.005);
        assert!(is_duplicate(&x, &y, MergePolicy::Simple, &tol));
        assert!(is_duplicate(&x, &y, MergePolicy::Strict, &tol));
    }

    #[test]
    fn simple_policy_never_fuzzy_matches() {
        let tol = ToleranceConfig::default();
        let x = record("chicken breast 500g fresh", 105.0);
        let y = record("chicken breast 500g fresh", 100.0);
        assert!(!is_duplicate(&x, &y, MergePolicy::Simple, &tol));
        assert!(is_duplicate(&x, &y, MergePolicy::Strict, &tol));
    }

    #[test]
    fn fuzzy_rule_needs_similarity_above_threshold() {
        let tol = ToleranceConfig::default();
        // Jaccard 2/4 = 0.5 < 0.85, prices 5% apart: not a duplicate.
        let x = record("chicken breast", 100.0);
        let y = record("chicken breast boneless skinless", 105.0);
        assert!(!is_duplicate(&x, &y, MergePolicy::Strict, &tol));
    }

    #[test]
    fn fuzzy_rule_needs_prices_inside_band() {
        let tol = ToleranceConfig::default();
        // Identical names but 20% apart on the mean: not a duplicate.
        let x = record("olive oil 1l", 90.0);
        let y = record("olive oil 1l", 110.0);
        assert!(!is_duplicate(&x, &y, MergePolicy::Strict, &tol));
    }

    #[test]
    fn fuzzy_name_match_is_case_insensitive() {
        let tol = ToleranceConfig::default();
        let x = record("Olive Oil 1L", 100.0);
        let y = record("olive oil 1l", 105.0);
        assert!(is_duplicate(&x, &y, MergePolicy::Strict, &tol));
    }

    #[test]
    fn zero_zero_prices_hit_the_exact_rule_not_a_division() {
        let tol = ToleranceConfig::default();
        let x = record("mystery item", 0.0);
        let y = record("other mystery", 0.0);
        // |0 - 0| < 0.01 catches this before the relative test can divide.
        assert!(is_duplicate(&x, &y, MergePolicy::Strict, &tol));
    }

    #[test]
    fn zero_zero_guard_in_relative_difference() {
        assert_eq!(relative_price_difference(0.0, 0.0), None);
        let diff = relative_price_difference(100.0, 110.0).unwrap();
        assert!((diff - 10.0 / 105.0).abs() < 1e-12);
    }
}
