use crate::app::page::InitialData;
use crate::config::toml_config::TomlConfig;
use crate::config::PlannerConfig;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "study-plan-form")]
#[command(about = "Interactive study-plan form backed by the planning server")]
pub struct CliConfig {
    /// Base URL of the planning server
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// File used to cache settings between sessions
    #[arg(long)]
    pub storage_path: Option<String>,

    /// JSON file with previously saved subjects
    #[arg(long)]
    pub initial_subjects: Option<String>,

    /// JSON file with the current timetable slots
    #[arg(long)]
    pub initial_timetable: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// TOML 檔為底，命令列參數覆蓋
    pub fn resolve(&self) -> Result<PlannerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?.into_planner_config()
            }
            None => PlannerConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(storage_path) = &self.storage_path {
            config.storage_path = storage_path.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }

        Ok(config)
    }

    pub fn load_initial_data(&self) -> Result<InitialData> {
        Ok(InitialData {
            subjects_json: read_optional(self.initial_subjects.as_deref())?,
            timetable_json: read_optional(self.initial_timetable.as_deref())?,
        })
    }
}

fn read_optional(path: Option<&str>) -> Result<Option<String>> {
    match path {
        Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_overrides_toml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[backend]
base_url = "http://from-toml:5000"
timeout_seconds = 12
"#
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "study-plan-form",
            "--config",
            file.path().to_str().unwrap(),
            "--base-url",
            "http://from-cli:8080",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.base_url, "http://from-cli:8080");
        assert_eq!(config.timeout_seconds, 12);
    }

    #[test]
    fn test_initial_data_files() {
        let mut subjects = NamedTempFile::new().unwrap();
        write!(subjects, r#"[{{"name":"OS","weight":70,"major":true}}]"#).unwrap();

        let cli = CliConfig::parse_from([
            "study-plan-form",
            "--initial-subjects",
            subjects.path().to_str().unwrap(),
        ]);
        let initial = cli.load_initial_data().unwrap();
        assert!(initial.subjects_json.unwrap().contains("OS"));
        assert!(initial.timetable_json.is_none());
    }
}
