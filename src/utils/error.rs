use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchmakerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Roster error at line {line}: {message}")]
    RosterError { line: u64, message: String },

    #[error("Model response error: {message}")]
    ModelResponseError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MatchmakerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::ModelResponseError { .. } => ErrorCategory::Network,
            Self::CsvError(_) | Self::RosterError { .. } | Self::SerializationError(_) => {
                ErrorCategory::Data
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Exit code used by the binary for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check network connectivity and the configured api_endpoint",
            Self::ModelResponseError { .. } => {
                "Verify the API key and model name, then run again"
            }
            Self::CsvError(_) | Self::RosterError { .. } => {
                "Make sure the roster has the columns name, email, interests, looking_to_connect_with on every row"
            }
            Self::SerializationError(_) => "Output could not be rendered as JSON; report this with the command used",
            Self::IoError(_) => "Check that the roster file exists and is readable",
            Self::MissingConfigError { .. } => {
                "Provide the missing value on the command line, in the TOML file or via the environment"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the configuration value and run again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not read the roster file: {}", e),
            Self::CsvError(e) => format!("The roster file is not valid CSV: {}", e),
            Self::RosterError { line, message } => {
                format!("Roster line {} is malformed: {}", line, message)
            }
            Self::ApiError(e) => format!("Could not reach the model service: {}", e),
            Self::ModelResponseError { message } => {
                format!("The model did not return usable groups: {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchmakerError>;
