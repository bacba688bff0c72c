use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const ENV_PREFIX: &str = "RECAP";
pub const DEFAULT_DIR_NAME: &str = "recap";
pub const DEFAULT_DB: &str = "recap";

// RECAP_DIR -> dir, RECAP_DB -> db
#[derive(Debug, Deserialize)]
struct RawConfig {
    dir: Option<String>,
    db: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Artifact root; pages go under `www/`, sidebar fragments under `templates/`.
    pub recap_dir: PathBuf,
    pub recap_db: String,
}

impl AppConfig {
    pub fn new(recap_dir: impl Into<PathBuf>, recap_db: impl Into<String>) -> Self {
        Self {
            recap_dir: recap_dir.into(),
            recap_db: recap_db.into(),
        }
    }

    /// SQLite file backing the store. A bare database name lives next to
    /// the artifacts; an absolute path is taken as is.
    pub fn database_path(&self) -> PathBuf {
        let db = Path::new(&self.recap_db);
        if db.is_absolute() {
            db.to_path_buf()
        } else {
            self.recap_dir.join(format!("{}.db", self.recap_db))
        }
    }

    pub fn static_dir(&self) -> PathBuf {
        self.recap_dir.join("www")
    }

    pub fn template_dir(&self) -> PathBuf {
        self.recap_dir.join("templates")
    }
}

pub fn load() -> Result<AppConfig> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    from_environment(Environment::with_prefix(ENV_PREFIX), home)
}

fn from_environment(env: Environment, home: Option<PathBuf>) -> Result<AppConfig> {
    let settings = Config::builder()
        .add_source(env)
        .build()
        .context("failed to read configuration")?;

    let raw: RawConfig = settings
        .try_deserialize()
        .context("invalid configuration")?;

    let recap_dir = match raw.dir {
        Some(dir) => PathBuf::from(dir),
        None => {
            let dir = home
                .context("RECAP_DIR not set and no home directory to default to")?
                .join(DEFAULT_DIR_NAME);
            warn!("RECAP_DIR not set. Defaulting to \"{}\"", dir.display());
            dir
        }
    };

    let recap_db = match raw.db {
        Some(db) => db,
        None => {
            warn!("RECAP_DB not set. Defaulting to \"{}\"", DEFAULT_DB);
            DEFAULT_DB.to_string()
        }
    };

    Ok(AppConfig {
        recap_dir,
        recap_db,
    })
}
