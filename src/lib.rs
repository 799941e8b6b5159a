pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{
    http::HttpBackend,
    notifier::ConsoleNotifier,
    storage::{FileStore, MemoryStore},
};
pub use app::page::{InitialData, PageState, PlannerPage};
pub use config::{toml_config::TomlConfig, PlannerConfig};
pub use utils::error::{PlannerError, Result};
