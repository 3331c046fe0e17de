//! Configuration loading from environment variables.

use crate::date_key::{DateKeyError, decode};
use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/habits.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("HABITS_TODAY: {0}")]
    Today(#[from] DateKeyError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    /// Fixed calendar date used instead of the local clock.
    pub today: Option<NaiveDate>,
}

impl Config {
    /// Reads `PORT`, `HABITS_DATA_PATH` and `HABITS_TODAY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = lookup("HABITS_DATA_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let today = lookup("HABITS_TODAY")
            .map(|value| decode(value.trim()))
            .transpose()?;

        Ok(Self { port, data_path, today })
    }
}
