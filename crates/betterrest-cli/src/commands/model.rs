use std::path::PathBuf;

use betterrest_core::Config;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ModelAction {
    /// Print the model's name, version and coefficients as JSON
    Show {
        /// Path to a JSON model artifact
        #[arg(long)]
        model: Option<PathBuf>,
    },
}

pub fn run(action: ModelAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ModelAction::Show { model } => {
            let config = Config::load_or_default();
            let model = super::model_source(&config, model).load()?;
            println!("{}", serde_json::to_string_pretty(&model.describe())?);
        }
    }
    Ok(())
}
