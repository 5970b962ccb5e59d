use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::{ClientConfig, Result};

const ENV_PREFIX: &str = "CAMPUS";

/// Layers configuration sources, later ones winning:
/// built-in defaults, the TOML file, then `CAMPUS_*` variables (with `.env`
/// files loaded from the working directory upward).
#[derive(Debug, Default)]
pub struct ConfigReader {
    file: Option<PathBuf>,
    cwd: Option<PathBuf>,
    env: Option<HashMap<String, String>>,
}

impl ConfigReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Directory to start `.env` discovery from.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Replaces the process environment as the variable source.
    pub fn env(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    pub fn read(self) -> Result<ClientConfig> {
        if self.env.is_none() {
            let cwd = self
                .cwd
                .clone()
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from("."));
            load_dotenv(&cwd);
        }

        let file = self.file.unwrap_or_else(ClientConfig::config_path);
        debug!(path = %file.display(), "Reading client configuration");

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(self.env.map(|vars| vars.into_iter().collect()));

        let config = Config::builder()
            .add_source(Config::try_from(&ClientConfig::default())?)
            .add_source(File::from(file).required(false))
            .add_source(environment)
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Loads every `.env` between the filesystem root and `cwd`. Variables that
/// are already set are never overridden, so the closest file wins.
fn load_dotenv(cwd: &Path) {
    let mut paths = vec![];
    let mut current = PathBuf::new();

    for component in cwd.components() {
        current.push(component);
        paths.push(current.clone());
    }

    paths.reverse();

    for path in paths {
        let env_file = path.join(".env");
        if env_file.is_file() {
            dotenvy::from_path(&env_file).ok();
        }
    }
}
