use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub api_url: String,
    pub storage_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let api_url = lookup("FLEET_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let storage_path = match lookup("FLEET_STORAGE_PATH") {
            Some(path) => PathBuf::from(path),
            None => {
                let home = lookup("HOME")
                    .ok_or_else(|| anyhow!("Set FLEET_STORAGE_PATH or HOME to locate storage"))?;
                PathBuf::from(home).join(".config/fleet-console/storage.json")
            }
        };
        Ok(Self {
            log_level,
            api_url,
            storage_path,
        })
    }
}
