//! Sleep-duration prediction.
//!
//! A [`Predictor`] maps the three form inputs to an estimate of how long the
//! user will actually sleep. [`SleepModel`] is the artifact-backed
//! implementation; tests substitute their own.

mod linear;

pub use linear::{FeatureInfo, ModelInfo, SleepModel};

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::PredictorError;

/// Feature vector handed to a predictor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepFeatures {
    /// Wake time as seconds elapsed since midnight
    pub wake: f64,
    /// Desired sleep in hours
    pub estimated_sleep: f64,
    /// Daily cups of coffee
    pub coffee: f64,
}

/// Feature-to-scalar regression producing predicted actual sleep in hours.
///
/// Implementations must be deterministic and free of interior mutation so a
/// single instance can serve every calculation.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictorError>;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictorError> {
        (**self).predict(features)
    }
}

impl<P: Predictor + ?Sized> Predictor for Arc<P> {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictorError> {
        (**self).predict(features)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictorError> {
        (**self).predict(features)
    }
}

/// Where to load the regression artifact from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelSource {
    /// Artifact compiled into the crate
    #[default]
    Bundled,
    /// JSON artifact on disk
    Path(PathBuf),
}

impl ModelSource {
    /// Bundled unless a path is given.
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => ModelSource::Path(p),
            None => ModelSource::Bundled,
        }
    }

    pub fn load(&self) -> Result<SleepModel, PredictorError> {
        match self {
            ModelSource::Bundled => SleepModel::bundled(),
            ModelSource::Path(path) => SleepModel::from_path(path),
        }
    }

    /// Load a shareable predictor. A load failure is logged and deferred:
    /// the returned predictor reports it on every call.
    pub fn predictor(&self) -> Arc<dyn Predictor> {
        match self.load() {
            Ok(model) => Arc::new(model),
            Err(e) => {
                tracing::warn!(error = %e, "sleep model unavailable");
                Arc::new(UnavailableModel(e.to_string()))
            }
        }
    }
}

/// Stands in for a model that could not be loaded.
#[derive(Debug, Clone)]
pub struct UnavailableModel(String);

impl Predictor for UnavailableModel {
    fn predict(&self, _: &SleepFeatures) -> Result<f64, PredictorError> {
        Err(PredictorError::load("unavailable model", self.0.clone()))
    }
}
