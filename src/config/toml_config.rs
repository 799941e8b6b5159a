use crate::config::PlannerConfig;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub backend: BackendConfig,
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub process_path: Option<String>,
    pub stored_path: Option<String>,
    pub plan_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: String,
    pub total_hours_key: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PLANNER_URL})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用預設值，轉成執行時配置
    pub fn into_planner_config(self) -> PlannerConfig {
        let defaults = PlannerConfig::default();
        let storage = self.storage;

        PlannerConfig {
            base_url: self.backend.base_url,
            process_path: self.backend.process_path.unwrap_or(defaults.process_path),
            stored_path: self.backend.stored_path.unwrap_or(defaults.stored_path),
            plan_path: self.backend.plan_path.unwrap_or(defaults.plan_path),
            timeout_seconds: self
                .backend
                .timeout_seconds
                .unwrap_or(defaults.timeout_seconds),
            storage_path: storage
                .as_ref()
                .map(|s| s.path.clone())
                .unwrap_or(defaults.storage_path),
            total_hours_key: storage
                .and_then(|s| s.total_hours_key)
                .unwrap_or(defaults.total_hours_key),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_planner_config().validate()
    }
}
