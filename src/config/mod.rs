pub mod cli;
pub mod toml_config;

use crate::adapters::http::{GeminiClient, DEFAULT_TIMEOUT_SECS, GEMINI_BASE_URL};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_range,
    validate_required_field, validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROSTER_PATH: &str = "students.csv";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_MESSAGE: &str = "Please group the workshop attendees.";
pub const MAX_TIMEOUT_SECS: u64 = 600;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "workshop-matchmaker")]
#[command(about = "Ask a hosted model to group workshop attendees by shared interests")]
pub struct CliConfig {
    /// Roster CSV, relative to --base-dir
    #[arg(long, default_value = DEFAULT_ROSTER_PATH)]
    pub roster_path: String,

    #[arg(long, default_value = ".")]
    pub base_dir: String,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value = GEMINI_BASE_URL)]
    pub api_endpoint: String,

    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// User message that triggers the agent
    #[arg(long, default_value = DEFAULT_MESSAGE)]
    pub message: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// TOML configuration file; replaces the roster and agent options above
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the assembled prompt and schema without calling the model
    #[arg(long)]
    pub dry_run: bool,

    /// Print the groups as JSON
    #[arg(long)]
    pub json: bool,

    /// Log process CPU and memory per phase
    #[arg(long)]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn to_settings(&self) -> MatchmakerSettings {
        MatchmakerSettings {
            roster_path: self.roster_path.clone(),
            base_dir: self.base_dir.clone(),
            model: self.model.clone(),
            api_endpoint: self.api_endpoint.clone(),
            api_key: self.api_key.clone(),
            message: self.message.clone(),
            timeout_seconds: self.timeout_seconds,
            monitor: self.monitor,
        }
    }
}

/// Resolved run settings, whichever source they came from.
#[derive(Clone, Serialize, Deserialize)]
pub struct MatchmakerSettings {
    pub roster_path: String,
    pub base_dir: String,
    pub model: String,
    pub api_endpoint: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub message: String,
    pub timeout_seconds: u64,
    pub monitor: bool,
}

impl Default for MatchmakerSettings {
    fn default() -> Self {
        Self {
            roster_path: DEFAULT_ROSTER_PATH.to_string(),
            base_dir: ".".to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_endpoint: GEMINI_BASE_URL.to_string(),
            api_key: None,
            message: DEFAULT_MESSAGE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            monitor: false,
        }
    }
}

// api_key stays out of logs
impl std::fmt::Debug for MatchmakerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchmakerSettings")
            .field("roster_path", &self.roster_path)
            .field("base_dir", &self.base_dir)
            .field("model", &self.model)
            .field("api_endpoint", &self.api_endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("message", &self.message)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("monitor", &self.monitor)
            .finish()
    }
}

impl MatchmakerSettings {
    /// Builds the model client; the API key is only required here, so dry runs work without one.
    pub fn gemini_client(&self) -> Result<GeminiClient> {
        let api_key = validate_required_field("api_key", &self.api_key)?;
        validate_non_empty_string("api_key", api_key)?;
        GeminiClient::new(&self.api_endpoint, api_key, self.timeout_seconds)
    }
}

impl ConfigProvider for MatchmakerSettings {
    fn roster_path(&self) -> &str {
        &self.roster_path
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn message(&self) -> &str {
        &self.message
    }
}

impl Validate for MatchmakerSettings {
    fn validate(&self) -> Result<()> {
        validate_path("roster_path", &self.roster_path)?;
        // any readable CSV text is accepted; an unusual extension is only worth a warning
        if let Err(e) = validate_file_extension("roster_path", &self.roster_path, &["csv"]) {
            tracing::warn!("⚠️ {}", e);
        }
        validate_path("base_dir", &self.base_dir)?;
        validate_non_empty_string("model", &self.model)?;
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_non_empty_string("message", &self.message)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECS)?;
        Ok(())
    }
}
