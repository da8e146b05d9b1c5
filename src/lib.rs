pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::GeminiClient;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, MatchmakerSettings};
pub use core::{engine::MatchmakerEngine, pipeline::MatchmakerPipeline};
pub use domain::model::{AgentRequest, AttendeeRecord, GroupSuggestion, GroupingResponse};
pub use utils::error::{MatchmakerError, Result};
