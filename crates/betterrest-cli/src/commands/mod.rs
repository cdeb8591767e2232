pub mod calc;
pub mod config;
pub mod form;
pub mod model;

use std::path::PathBuf;

use betterrest_core::{Config, ModelSource};

/// Model named on the command line, falling back to the configured one.
pub fn model_source(config: &Config, override_path: Option<PathBuf>) -> ModelSource {
    match override_path {
        Some(path) => ModelSource::Path(path),
        None => config.model_source(),
    }
}
