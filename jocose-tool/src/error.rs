use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JoxError {
    #[error("Config error in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot read config file {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },
}
