//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod context;
pub mod extract;

use std::path::Path;

use fratgen_core::models::FratgenConfig;

/// Load the pipeline configuration, falling back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FratgenConfig> {
    match config_path {
        Some(path) => Ok(FratgenConfig::from_file(Path::new(path))?),
        None => Ok(FratgenConfig::default()),
    }
}
