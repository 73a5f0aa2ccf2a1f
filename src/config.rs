use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;

pub const DEFAULT_BATCH_SIZE: usize = 150;
pub const DEFAULT_MAX_AGE_HOURS: i64 = 24;
/// Upper bound for `max_age_hours`: one hundred years.
pub const MAX_AGE_HOURS_LIMIT: i64 = 24 * 365 * 100;
pub const SYSTEM_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Records appended by every `initialize` call.
    pub synthetic_batch_size: usize,
    pub categories: Vec<String>,
    pub value_min: f64,
    pub value_max: f64,
    /// Synthetic timestamps are spread over this many hours before now.
    pub max_age_hours: i64,
    /// Fixed seed for reproducible synthetic data.
    pub seed: Option<u64>,
    pub system_version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            synthetic_batch_size: DEFAULT_BATCH_SIZE,
            categories: vec!["A".into(), "B".into(), "C".into()],
            value_min: 0.0,
            value_max: 100.0,
            max_age_hours: DEFAULT_MAX_AGE_HOURS,
            seed: None,
            system_version: SYSTEM_VERSION.to_string(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.synthetic_batch_size == 0 {
            return Err(ConfigError::Invalid("synthetic_batch_size must be positive".into()));
        }
        if self.categories.is_empty() {
            return Err(ConfigError::Invalid("at least one category is required".into()));
        }
        if !(self.value_max - self.value_min).is_finite() {
            return Err(ConfigError::Invalid(format!(
                "value range {}..{} must be finite",
                self.value_min, self.value_max
            )));
        }
        if !(self.value_min < self.value_max) {
            return Err(ConfigError::Invalid(format!(
                "value_min ({}) must be below value_max ({})",
                self.value_min, self.value_max
            )));
        }
        if self.max_age_hours <= 0 || self.max_age_hours > MAX_AGE_HOURS_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_age_hours must be between 1 and {}, got {}",
                MAX_AGE_HOURS_LIMIT, self.max_age_hours
            )));
        }
        Ok(())
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}
