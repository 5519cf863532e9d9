use serde::{Deserialize, Serialize};

use crate::error::MergeError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MergeConfig {
    pub name: String,
    #[serde(default)]
    pub policy: MergePolicy,
    /// OCR section dump files (JSON arrays of records), in capture order.
    pub sections: Vec<String>,
    #[serde(default)]
    pub tolerance: ToleranceConfig,
    #[serde(default)]
    pub confidence: ConfidenceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Duplicate-detection policy.
///
/// `Simple` applies the exact-price rule only; `Strict` additionally accepts
/// the fuzzy name + relative-price rule. Both behaviors are preserved from
/// the original capture workflows, unified behind one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    Simple,
    Strict,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self::Simple
    }
}

impl std::fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tolerance + Confidence + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ToleranceConfig {
    /// Two prices within this amount are the same to the cent.
    #[serde(default = "default_price_epsilon")]
    pub price_epsilon: f64,
    /// Jaccard word-set similarity a fuzzy name match must exceed.
    #[serde(default = "default_name_similarity")]
    pub name_similarity: f64,
    /// Relative price difference (over the mean) a fuzzy match must stay under.
    #[serde(default = "default_relative_price")]
    pub relative_price: f64,
}

fn default_price_epsilon() -> f64 {
    0.01
}

fn default_name_similarity() -> f64 {
    0.85
}

fn default_relative_price() -> f64 {
    0.10
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            price_epsilon: default_price_epsilon(),
            name_similarity: default_name_similarity(),
            relative_price: default_relative_price(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfidenceConfig {
    /// Aggregate-confidence bonus per extra section beyond the first.
    /// Ad hoc heuristic carried over verbatim from the capture workflows.
    #[serde(default = "default_section_bonus")]
    pub section_bonus: f64,
}

fn default_section_bonus() -> f64 {
    0.05
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            section_bonus: default_section_bonus(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MergeConfig {
    pub fn from_toml(input: &str) -> Result<Self, MergeError> {
        let config: MergeConfig =
            toml::from_str(input).map_err(|e| MergeError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        if self.sections.is_empty() {
            return Err(MergeError::ConfigValidation(
                "at least 1 section file is required".into(),
            ));
        }

        let tol = &self.tolerance;
        if !(tol.price_epsilon > 0.0) {
            return Err(MergeError::ConfigValidation(format!(
                "tolerance.price_epsilon must be > 0, got {}",
                tol.price_epsilon
            )));
        }
        if !(0.0..=1.0).contains(&tol.name_similarity) {
            return Err(MergeError::ConfigValidation(format!(
                "tolerance.name_similarity must be in [0, 1], got {}",
                tol.name_similarity
            )));
        }
        if !(tol.relative_price > 0.0) {
            return Err(MergeError::ConfigValidation(format!(
                "tolerance.relative_price must be > 0, got {}",
                tol.relative_price
            )));
        }
        if self.confidence.section_bonus < 0.0 {
            return Err(MergeError::ConfigValidation(format!(
                "confidence.section_bonus must be >= 0, got {}",
                self.confidence.section_bonus
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
