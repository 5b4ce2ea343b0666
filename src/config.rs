use std::{env, path::PathBuf};

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STORE_PATH: &str = "store";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    Directory(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreLocation,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let in_memory = lookup("STORE_IN_MEMORY")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let store = if in_memory {
            StoreLocation::Memory
        } else {
            StoreLocation::Directory(
                lookup("STORE_PATH").map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from),
            )
        };
        Ok(Self { host, port, store })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.store, StoreLocation::Directory(PathBuf::from("store")));
    }

    #[test]
    fn overrides() {
        let config = load(&[("PORT", "8080"), ("HOST", "127.0.0.1"), ("STORE_PATH", "/var/lib/thoughts")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.store, StoreLocation::Directory(PathBuf::from("/var/lib/thoughts")));

        let config = load(&[("STORE_IN_MEMORY", "1"), ("STORE_PATH", "ignored")]).unwrap();
        assert_eq!(config.store, StoreLocation::Memory);
    }

    #[test]
    fn bad_port() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "eighty"));
    }
}
