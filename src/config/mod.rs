#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_endpoint_path, validate_non_empty_string, validate_path, validate_range,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};

pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub base_url: String,
    pub process_path: String,
    pub stored_path: String,
    pub plan_path: String,
    pub timeout_seconds: u64,
    pub storage_path: String,
    pub total_hours_key: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            process_path: "/process_timetable".to_string(),
            stored_path: "/load_stored_timetable".to_string(),
            plan_path: "/plan".to_string(),
            timeout_seconds: 30,
            storage_path: "./.study-plan-form.json".to_string(),
            total_hours_key: crate::app::page::DEFAULT_TOTAL_HOURS_KEY.to_string(),
        }
    }
}

impl Validate for PlannerConfig {
    fn validate(&self) -> Result<()> {
        validate_url("backend.base_url", &self.base_url)?;
        validate_endpoint_path("backend.process_path", &self.process_path)?;
        validate_endpoint_path("backend.stored_path", &self.stored_path)?;
        validate_endpoint_path("backend.plan_path", &self.plan_path)?;
        validate_range(
            "backend.timeout_seconds",
            self.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validate_path("storage.path", &self.storage_path)?;
        validate_non_empty_string("storage.total_hours_key", &self.total_hours_key)?;
        Ok(())
    }
}

impl ConfigProvider for PlannerConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn process_path(&self) -> &str {
        &self.process_path
    }

    fn stored_path(&self) -> &str {
        &self.stored_path
    }

    fn plan_path(&self) -> &str {
        &self.plan_path
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }

    fn total_hours_key(&self) -> &str {
        &self.total_hours_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PlannerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = PlannerConfig {
            timeout_seconds: 0,
            ..PlannerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
