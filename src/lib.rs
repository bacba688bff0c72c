pub mod cli;
pub mod config;
pub mod dirty;
pub mod models;
pub mod prompt;
pub mod publish;
pub mod repository;
pub mod schema;
pub mod site;

#[cfg(test)]
mod fixtures;

pub use repository::Repository;

use anyhow::{Context, Result};
use std::fs;

/// Opens the configured store, creating the artifact root on first use.
pub fn open_repository(cfg: &config::AppConfig) -> Result<Repository> {
    let path = cfg.database_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    Repository::new(&path.to_string_lossy())
}
