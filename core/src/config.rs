use crate::{
    error::{SimError, SimResult},
    types::Column,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A root variable: pure Gaussian draw, no predecessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootConfig {
    pub column: Column,
    pub mean: f64,
    pub std_dev: f64,
}

/// How a predictor column enters a derived column's equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PredictorTransform {
    /// Z-score against the predictor's own realized sample.
    #[default]
    Standardized,
    /// The predictor's value as is.
    Raw,
    /// Divided by the predictor's sample maximum.
    ScaledByMax,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorTerm {
    pub column: Column,
    pub coefficient: f64,
    #[serde(default)]
    pub transform: PredictorTransform,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRange {
    pub low: f64,
    pub high: f64,
}

/// A derived variable: intercept + Σ coefficient × predictor + noise, then clipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedConfig {
    pub column: Column,
    pub intercept: f64,
    pub terms: Vec<PredictorTerm>,
    pub noise_std_dev: f64,
    pub clip: ClipRange,
}

/// The whole causal map. Roots are drawn in listed order, then derived
/// columns are computed in listed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub roots: Vec<RootConfig>,
    pub derived: Vec<DerivedConfig>,
}

/// Which built-in preset to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Canonical,
    Raw,
}

impl Variant {
    pub fn parse(s: &str) -> Option<Variant> {
        match s {
            "canonical" => Some(Variant::Canonical),
            "raw"       => Some(Variant::Raw),
            _           => None,
        }
    }

    pub fn config(self) -> ModelConfig {
        match self {
            Variant::Canonical => ModelConfig::balanced_scorecard(),
            Variant::Raw       => ModelConfig::raw_variant(),
        }
    }
}

fn root(column: Column, mean: f64, std_dev: f64) -> RootConfig {
    RootConfig { column, mean, std_dev }
}

fn term(column: Column, coefficient: f64, transform: PredictorTransform) -> PredictorTerm {
    PredictorTerm { column, coefficient, transform }
}

fn derived(
    column: Column,
    intercept: f64,
    terms: Vec<PredictorTerm>,
    noise_std_dev: f64,
    (low, high): (f64, f64),
) -> DerivedConfig {
    DerivedConfig {
        column,
        intercept,
        terms,
        noise_std_dev,
        clip: ClipRange { low, high },
    }
}

impl ModelConfig {
    /// The canonical causal map. Every predictor is standardized.
    pub fn balanced_scorecard() -> Self {
        use Column::*;
        use PredictorTransform::Standardized as Z;
        Self {
            roots: vec![root(A1, 32.0, 6.0), root(A2, 850.0, 150.0)],
            derived: vec![
                derived(P1, 0.74, vec![term(A1, 0.38, Z), term(A2, 0.31, Z)], 0.04, (0.40, 0.99)),
                derived(P2, 0.35, vec![term(P1, -0.55, Z)], 0.02, (0.01, 0.50)),
                derived(C1, 0.30, vec![term(P1, 0.44, Z), term(P2, -0.28, Z)], 0.03, (0.30, 0.99)),
                derived(C2, 0.20, vec![term(C1, 0.62, Z)], 0.03, (0.30, 0.99)),
                derived(F1, 1500.0, vec![term(C2, 1800.0, Z), term(P1, 900.0, Z)], 200.0, (500.0, 8000.0)),
                derived(F2, 0.05, vec![term(F1, 0.71, Z)], 0.03, (0.01, 0.60)),
            ],
        }
    }

    /// The simpler map: raw predictors after P1, margin driven by
    /// revenue relative to its maximum.
    pub fn raw_variant() -> Self {
        use Column::*;
        use PredictorTransform::{Raw as R, ScaledByMax as M, Standardized as Z};
        Self {
            roots: vec![root(A1, 32.0, 6.0), root(A2, 850.0, 150.0)],
            derived: vec![
                derived(P1, 0.74, vec![term(A1, 0.08, Z), term(A2, 0.06, Z)], 0.04, (0.40, 0.99)),
                derived(P2, 0.35, vec![term(P1, -0.28, R)], 0.02, (0.01, 0.50)),
                derived(C1, 0.30, vec![term(P1, 0.44, R), term(P2, -0.18, R)], 0.03, (0.30, 0.99)),
                derived(C2, 0.20, vec![term(C1, 0.62, R)], 0.03, (0.30, 0.99)),
                derived(F1, 1500.0, vec![term(C2, 1800.0, R), term(P1, 900.0, R)], 200.0, (500.0, 8000.0)),
                derived(F2, 0.05, vec![term(F1, 0.71, M)], 0.03, (0.01, 0.60)),
            ],
        }
    }

    /// Load a model from a JSON file.
    /// In tests, use ModelConfig::balanced_scorecard().
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: ModelConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the map is a well-formed instance of the fixed DAG:
    /// A1, A2 as roots, then P1..F2 in order, every predictor upstream.
    pub fn validate(&self) -> SimResult<()> {
        let expected_roots = [Column::A1, Column::A2];
        let roots: Vec<Column> = self.roots.iter().map(|r| r.column).collect();
        if roots != expected_roots {
            return Err(SimError::invalid_config(format!(
                "roots must be [A1, A2], got {roots:?}"
            )));
        }
        for r in &self.roots {
            if !r.mean.is_finite() || !r.std_dev.is_finite() || r.std_dev < 0.0 {
                return Err(SimError::invalid_config(format!(
                    "{}: mean and std_dev must be finite, std_dev >= 0",
                    r.column
                )));
            }
        }

        let expected_derived = &Column::ALL[expected_roots.len()..];
        let derived: Vec<Column> = self.derived.iter().map(|d| d.column).collect();
        if derived != expected_derived {
            return Err(SimError::invalid_config(format!(
                "derived columns must be {expected_derived:?}, got {derived:?}"
            )));
        }

        for d in &self.derived {
            if d.terms.is_empty() {
                return Err(SimError::invalid_config(format!("{}: no predictors", d.column)));
            }
            for t in &d.terms {
                if t.column >= d.column {
                    return Err(SimError::invalid_config(format!(
                        "{}: predictor {} is not upstream",
                        d.column, t.column
                    )));
                }
                if !t.coefficient.is_finite() {
                    return Err(SimError::invalid_config(format!(
                        "{}: coefficient for {} is not finite",
                        d.column, t.column
                    )));
                }
            }
            if !d.intercept.is_finite() {
                return Err(SimError::invalid_config(format!("{}: intercept is not finite", d.column)));
            }
            if !d.noise_std_dev.is_finite() || d.noise_std_dev < 0.0 {
                return Err(SimError::invalid_config(format!(
                    "{}: noise_std_dev must be finite and >= 0",
                    d.column
                )));
            }
            if d.clip.low.is_nan() || d.clip.high.is_nan() || d.clip.low > d.clip.high {
                return Err(SimError::invalid_config(format!(
                    "{}: clip range [{}, {}] is empty",
                    d.column, d.clip.low, d.clip.high
                )));
            }
        }
        Ok(())
    }

    /// Every (predictor, target, coefficient) edge of the map, in order.
    pub fn edges(&self) -> Vec<(Column, Column, f64)> {
        self.derived
            .iter()
            .flat_map(|d| d.terms.iter().map(move |t| (t.column, d.column, t.coefficient)))
            .collect()
    }

    pub fn root(&self, column: Column) -> Option<&RootConfig> {
        self.roots.iter().find(|r| r.column == column)
    }

    pub fn derived(&self, column: Column) -> Option<&DerivedConfig> {
        self.derived.iter().find(|d| d.column == column)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::balanced_scorecard()
    }
}
