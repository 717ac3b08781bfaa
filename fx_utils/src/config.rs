use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Reads and parses a TOML configuration file
pub fn load_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let file_content = std::fs::read_to_string(path)
        .with_context(|| format!("Failure open config file {}", path.display()))?;

    parse_config(&file_content)
        .with_context(|| format!("Failure parse config file {}", path.display()))
}

pub fn parse_config<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(toml::from_str(content)?)
}

/// Loads the file when a path is given, falls back to `T::default()` otherwise
pub fn load_config_or_default<T>(path: Option<impl AsRef<Path>>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match path {
        Some(path) => load_config(path),
        None => Ok(T::default()),
    }
}
