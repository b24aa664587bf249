//! Tunable parameters for the frame pipeline.
//!
//! `PipelineParams::default()` is the stock behaviour: the per-frame pass
//! uses gamma 0.85 and saturation 1.15 with noise reduction, the post-stack
//! refinement uses gamma 0.9 and saturation 1.08 without it. Parameters can
//! be loaded from JSON; any block left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enhance::stretch::{DEFAULT_HIGH_PERCENTILE, DEFAULT_LOW_PERCENTILE};
use crate::error::{Error, Result};

/// Settings for one pass (per-frame or refinement).
///
/// All fields are required when a stage block appears in JSON, since the
/// two passes have different defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageParams {
    /// Tone curve parameter. The curve exponent is `1 / gamma`.
    pub gamma: f64,
    /// Saturation multiplier. 1.0 = neutral.
    pub saturation: f32,
    /// Whether the 3×3 noise reduction runs in this pass.
    pub reduce_noise: bool,
}

impl StageParams {
    /// Per-frame enhancement defaults.
    pub const FRAME: Self = Self {
        gamma: 0.85,
        saturation: 1.15,
        reduce_noise: true,
    };

    /// Post-stack refinement defaults. Averaging already suppresses noise.
    pub const REFINE: Self = Self {
        gamma: 0.9,
        saturation: 1.08,
        reduce_noise: false,
    };

    fn validate(&self, pass: &str) -> Result<()> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "{pass}.gamma must be finite and positive, got {}",
                self.gamma
            )));
        }
        if !self.saturation.is_finite() || self.saturation < 0.0 {
            return Err(Error::InvalidInput(format!(
                "{pass}.saturation must be finite and non-negative, got {}",
                self.saturation
            )));
        }
        Ok(())
    }
}

/// Luminance percentile cutoffs for the histogram stretch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StretchParams {
    /// Fraction of pixels at or below the black point. Default: 0.01.
    pub low_percentile: f64,
    /// Fraction of pixels at or below the white point. Default: 0.99.
    pub high_percentile: f64,
}

impl Default for StretchParams {
    fn default() -> Self {
        Self {
            low_percentile: DEFAULT_LOW_PERCENTILE,
            high_percentile: DEFAULT_HIGH_PERCENTILE,
        }
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Histogram stretch cutoffs, shared by both passes.
    pub stretch: StretchParams,
    /// Per-frame enhancement pass.
    pub process: StageParams,
    /// Post-stack refinement pass.
    pub refine: StageParams,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            stretch: StretchParams::default(),
            process: StageParams::FRAME,
            refine: StageParams::REFINE,
        }
    }
}

impl PipelineParams {
    /// Reject values that would make a stage meaningless.
    pub fn validate(&self) -> Result<()> {
        self.process.validate("process")?;
        self.refine.validate("refine")?;

        let StretchParams {
            low_percentile: low,
            high_percentile: high,
        } = self.stretch;
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(low) || !in_unit(high) || low >= high {
            return Err(Error::InvalidInput(format!(
                "stretch percentiles must satisfy 0 <= low < high <= 1, got {low}..{high}"
            )));
        }
        Ok(())
    }

    /// Parse and validate parameters from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("pipeline parameters: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    /// Read, parse, and validate parameters from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::InvalidInput(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Pretty-printed JSON, suitable for writing out as a starting template.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::InvalidInput(format!("pipeline parameters: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_passes() {
        let params = PipelineParams::default();
        assert_eq!(params.process.gamma, 0.85);
        assert_eq!(params.process.saturation, 1.15);
        assert!(params.process.reduce_noise);
        assert_eq!(params.refine.gamma, 0.9);
        assert_eq!(params.refine.saturation, 1.08);
        assert!(!params.refine.reduce_noise);
        assert_eq!(params.stretch.low_percentile, 0.01);
        assert_eq!(params.stretch.high_percentile, 0.99);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let params = PipelineParams::from_json_str("{}").unwrap();
        assert_eq!(params, PipelineParams::default());
    }

    #[test]
    fn test_partial_json_keeps_other_blocks() {
        let json = r#"{ "refine": { "gamma": 1.0, "saturation": 1.0, "reduce_noise": true } }"#;
        let params = PipelineParams::from_json_str(json).unwrap();
        assert_eq!(params.process, StageParams::FRAME);
        assert_eq!(params.refine.gamma, 1.0);
        assert!(params.refine.reduce_noise);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut params = PipelineParams::default();
        params.stretch.high_percentile = 0.995;
        let json = params.to_json_string().unwrap();
        assert_eq!(PipelineParams::from_json_str(&json).unwrap(), params);
    }

    #[test]
    fn test_rejects_bad_gamma() {
        let mut params = PipelineParams::default();
        params.process.gamma = 0.0;
        assert!(matches!(params.validate(), Err(Error::InvalidInput(_))));
        params.process.gamma = f64::NAN;
        assert!(matches!(params.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_inverted_percentiles() {
        let json = r#"{ "stretch": { "low_percentile": 0.9, "high_percentile": 0.1 } }"#;
        assert!(matches!(PipelineParams::from_json_str(json), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(PipelineParams::from_json_str("{ gamma"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        let json = r#"{ "process": { "gamma": 1.2, "saturation": 1.0, "reduce_noise": false } }"#;
        std::fs::write(&path, json).unwrap();
        let params = PipelineParams::from_json_file(&path).unwrap();
        assert_eq!(params.process.gamma, 1.2);
        assert!(PipelineParams::from_json_file(&dir.path().join("missing.json")).is_err());
    }
}
