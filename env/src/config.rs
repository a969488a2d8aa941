//! Configuration of application

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tokio::{fs::File, io::AsyncReadExt};
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {0:?}: {1}")]
    Io(PathBuf, std::io::Error),

    #[error("invalid config file: {0}")]
    Invalid(#[from] toml::de::Error),
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SolanaConfig {
    // full URL or one of the network shorthands
    pub rpc: String,
    pub keyfile: Option<PathBuf>,
    pub program_id: String,
    pub skip_preflight: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub solana: Option<SolanaConfig>,
}

impl Config {
    pub async fn from_path(path: &Path) -> Result<Config, ConfigError> {
        info!("Load configuration: {:?}", path);
        let mut buf = String::with_capacity(1024);
        let mut f = File::open(path)
            .await
            .map_err(|e| ConfigError::Io(path.to_owned(), e))?;
        f.read_to_string(&mut buf)
            .await
            .map_err(|e| ConfigError::Io(path.to_owned(), e))?;
        Self::from_toml(&buf)
    }

    pub fn from_toml(s: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}
