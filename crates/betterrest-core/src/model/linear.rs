//! Linear regression sleep model loaded from a JSON artifact.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Predictor, SleepFeatures};
use crate::error::PredictorError;

const BUNDLED_MODEL: &str = include_str!("../../assets/sleep_calculator.json");
const BUNDLED_NAME: &str = "bundled model";
const SUPPORTED_VERSION: u32 = 1;

const WAKE: &str = "wake";
const ESTIMATED_SLEEP: &str = "estimated_sleep";
const COFFEE: &str = "coffee";

/// On-disk artifact layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelArtifact {
    name: String,
    version: u32,
    #[serde(default = "default_target")]
    target: String,
    intercept: f64,
    features: Vec<FeatureInfo>,
}

fn default_target() -> String {
    "actual_sleep".into()
}

/// One regression term with the domain it was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub name: String,
    pub coefficient: f64,
    pub min: f64,
    pub max: f64,
}

impl FeatureInfo {
    fn term(&self, value: f64) -> Result<f64, PredictorError> {
        if !value.is_finite() {
            return Err(PredictorError::Prediction(format!(
                "feature '{}' is not finite",
                self.name
            )));
        }
        if value < self.min || value > self.max {
            return Err(PredictorError::Prediction(format!(
                "feature '{}' = {value} outside trained range [{}, {}]",
                self.name, self.min, self.max
            )));
        }
        Ok(self.coefficient * value)
    }
}

/// Summary of a loaded model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: u32,
    pub target: String,
    pub intercept: f64,
    pub features: Vec<FeatureInfo>,
}

/// Pre-trained regression predicting actual sleep from wake time, desired
/// sleep and coffee intake.
///
/// Immutable once loaded.
#[derive(Debug, Clone)]
pub struct SleepModel {
    name: String,
    version: u32,
    target: String,
    intercept: f64,
    wake: FeatureInfo,
    estimated_sleep: FeatureInfo,
    coffee: FeatureInfo,
}

impl SleepModel {
    /// Load the artifact shipped with the crate.
    pub fn bundled() -> Result<Self, PredictorError> {
        Self::parse(BUNDLED_MODEL, BUNDLED_NAME)
    }

    /// Load an artifact from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PredictorError> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PredictorError::load(&source_name, e.to_string()))?;
        let model = Self::parse(&content, &source_name)?;
        tracing::info!(path = %source_name, name = %model.name, "loaded sleep model");
        Ok(model)
    }

    /// Load an artifact from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, PredictorError> {
        Self::parse(json, "inline model")
    }

    fn parse(json: &str, source_name: &str) -> Result<Self, PredictorError> {
        let artifact: ModelArtifact = serde_json::from_str(json)
            .map_err(|e| PredictorError::load(source_name, e.to_string()))?;
        Self::from_artifact(artifact, source_name)
    }

    fn from_artifact(artifact: ModelArtifact, source_name: &str) -> Result<Self, PredictorError> {
        if artifact.version != SUPPORTED_VERSION {
            return Err(PredictorError::load(
                source_name,
                format!("unsupported model version {}", artifact.version),
            ));
        }
        if !artifact.intercept.is_finite() {
            return Err(PredictorError::load(source_name, "intercept is not finite"));
        }
        if artifact.features.len() != 3 {
            return Err(PredictorError::load(
                source_name,
                format!("expected 3 features, found {}", artifact.features.len()),
            ));
        }

        let mut wake = None;
        let mut estimated_sleep = None;
        let mut coffee = None;
        for feature in artifact.features {
            if !feature.coefficient.is_finite() {
                return Err(PredictorError::load(
                    source_name,
                    format!("coefficient for '{}' is not finite", feature.name),
                ));
            }
            if feature.min.is_nan() || feature.max.is_nan() || feature.min > feature.max {
                return Err(PredictorError::load(
                    source_name,
                    format!("invalid range for '{}'", feature.name),
                ));
            }
            let slot = match feature.name.as_str() {
                WAKE => &mut wake,
                ESTIMATED_SLEEP => &mut estimated_sleep,
                COFFEE => &mut coffee,
                other => {
                    return Err(PredictorError::load(
                        source_name,
                        format!("unknown feature '{other}'"),
                    ))
                }
            };
            if slot.is_some() {
                return Err(PredictorError::load(
                    source_name,
                    format!("duplicate feature '{}'", feature.name),
                ));
            }
            *slot = Some(feature);
        }

        // Three distinct known names were seen, so every slot is filled.
        match (wake, estimated_sleep, coffee) {
            (Some(wake), Some(estimated_sleep), Some(coffee)) => Ok(Self {
                name: artifact.name,
                version: artifact.version,
                target: artifact.target,
                intercept: artifact.intercept,
                wake,
                estimated_sleep,
                coffee,
            }),
            _ => Err(PredictorError::load(source_name, "missing feature")),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn describe(&self) -> ModelInfo {
        ModelInfo {
            name: self.name.clone(),
            version: self.version,
            target: self.target.clone(),
            intercept: self.intercept,
            features: vec![
                self.wake.clone(),
                self.estimated_sleep.clone(),
                self.coffee.clone(),
            ],
        }
    }
}

impl Predictor for SleepModel {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictorError> {
        let hours = self.intercept
            + self.wake.term(features.wake)?
            + self.estimated_sleep.term(features.estimated_sleep)?
            + self.coffee.term(features.coffee)?;

        if !hours.is_finite() || hours <= 0.0 || hours >= 24.0 {
            return Err(PredictorError::Prediction(format!(
                "predicted sleep {hours} hours is out of range"
            )));
        }
        Ok(hours)
    }
}
