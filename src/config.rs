use std::{env, path::PathBuf};

pub const DEFAULT_DATABASE_URL: &str = "hospital.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Seed CSVs are loaded at start-up only when this is set.
    pub seed_dir: Option<PathBuf>,
    pub roster_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL")
            .map(|url| {
                url.strip_prefix("sqlite://")
                    .map(str::to_string)
                    .unwrap_or(url)
            })
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let seed_dir = get("SEED_DIR").map(PathBuf::from);
        let roster_dir = get("ROSTER_DIR")
            .map(PathBuf::from)
            .or_else(|| seed_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            database_url,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            seed_dir,
            roster_dir,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        }
    }
}
